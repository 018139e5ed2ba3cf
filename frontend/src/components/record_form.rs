use shared::CreateRecordRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecordFormProps {
    pub heading: AttrValue,
    pub submit_label: AttrValue,
    pub on_submit: Callback<CreateRecordRequest>,
}

/// Entry form shared by the income and expense views. Amount parsing is
/// lenient here; the backend is the validator and its message is surfaced
/// through the shared error banner.
#[function_component(RecordForm)]
pub fn record_form(props: &RecordFormProps) -> Html {
    let title = use_state(String::new);
    let amount = use_state(String::new);
    let date = use_state(String::new);
    let category = use_state(String::new);
    let description = use_state(String::new);

    let on_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_title_change = on_input(&title);
    let on_amount_change = on_input(&amount);
    let on_date_change = on_input(&date);
    let on_category_change = on_input(&category);
    let on_description_change = on_input(&description);

    let onsubmit = {
        let title = title.clone();
        let amount = amount.clone();
        let date = date.clone();
        let category = category.clone();
        let description = description.clone();
        let on_submit = props.on_submit.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let amount_value = (*amount).trim().parse::<f64>().unwrap_or(0.0);
            let request = CreateRecordRequest {
                title: (*title).clone(),
                amount: amount_value,
                date: (*date).clone(),
                category: (*category).clone(),
                description: (*description).clone(),
            };
            on_submit.emit(request);

            title.set(String::new());
            amount.set(String::new());
            date.set(String::new());
            category.set(String::new());
            description.set(String::new());
        })
    };

    html! {
        <section class="record-form-section">
            <h2>{props.heading.clone()}</h2>
            <form class="record-form" {onsubmit}>
                <div class="form-group">
                    <label for="record-title">{"Title"}</label>
                    <input
                        type="text"
                        id="record-title"
                        placeholder="Salary, groceries, rent..."
                        value={(*title).clone()}
                        onchange={on_title_change}
                    />
                </div>

                <div class="form-group">
                    <label for="record-amount">{"Amount"}</label>
                    <input
                        type="number"
                        id="record-amount"
                        placeholder="100.00"
                        step="0.01"
                        min="0.01"
                        value={(*amount).clone()}
                        onchange={on_amount_change}
                    />
                </div>

                <div class="form-group">
                    <label for="record-date">{"Date"}</label>
                    <input
                        type="date"
                        id="record-date"
                        value={(*date).clone()}
                        onchange={on_date_change}
                    />
                </div>

                <div class="form-group">
                    <label for="record-category">{"Category"}</label>
                    <input
                        type="text"
                        id="record-category"
                        placeholder="work, food, bills..."
                        value={(*category).clone()}
                        onchange={on_category_change}
                    />
                </div>

                <div class="form-group">
                    <label for="record-description">{"Description"}</label>
                    <input
                        type="text"
                        id="record-description"
                        placeholder="Optional note"
                        value={(*description).clone()}
                        onchange={on_description_change}
                    />
                </div>

                <button type="submit" class="btn btn-primary">
                    {props.submit_label.clone()}
                </button>
            </form>
        </section>
    }
}
