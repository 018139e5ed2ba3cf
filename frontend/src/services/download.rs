use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Hand PDF bytes to the browser as a file download: wrap them in a Blob,
/// point a temporary anchor at its object URL, click it, clean up.
pub fn save_pdf(bytes: &[u8], filename: &str) -> Result<(), String> {
    let array = Uint8Array::from(bytes);
    let parts = Array::new();
    parts.push(&array.buffer());

    let options = BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Failed to build blob: {:?}", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "No document available".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Element is not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document.body().ok_or_else(|| "No body available".to_string())?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to attach anchor: {:?}", e))?;
    anchor.click();
    anchor.remove();

    let _ = Url::revoke_object_url(&url);
    Ok(())
}
