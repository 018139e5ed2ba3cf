use shared::{series, TransactionRecord};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecordListProps {
    pub records: Vec<TransactionRecord>,
    pub loading: bool,
    /// CSS modifier, "income" or "expense"
    pub kind_class: AttrValue,
    pub on_delete: Callback<String>,
    pub on_download_invoice: Callback<String>,
}

fn display_date(raw: &str) -> String {
    series::parse_record_date(raw)
        .map(|date| date.format("%b %e, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[function_component(RecordList)]
pub fn record_list(props: &RecordListProps) -> Html {
    if props.loading && props.records.is_empty() {
        return html! { <div class="loading">{"Loading records..."}</div> };
    }
    if props.records.is_empty() {
        return html! { <p class="record-list-empty">{"No records yet"}</p> };
    }

    html! {
        <ul class="record-list">
            {for props.records.iter().map(|record| {
                let on_delete = {
                    let on_delete = props.on_delete.clone();
                    let id = record.id.clone();
                    Callback::from(move |_| on_delete.emit(id.clone()))
                };
                let on_download = {
                    let on_download_invoice = props.on_download_invoice.clone();
                    let id = record.id.clone();
                    Callback::from(move |_| on_download_invoice.emit(id.clone()))
                };

                html! {
                    <li class={format!("record-item {}", props.kind_class)}>
                        <div class="record-main">
                            <span class="record-title">{&record.title}</span>
                            <span class="record-amount">{format!("{:.2}", record.amount)}</span>
                        </div>
                        <div class="record-meta">
                            <span class="record-date">{display_date(&record.date)}</span>
                            <span class="record-category">{&record.category}</span>
                            {if record.description.is_empty() {
                                html! {}
                            } else {
                                html! { <span class="record-description">{&record.description}</span> }
                            }}
                        </div>
                        <div class="record-actions">
                            <button class="btn download-btn" onclick={on_download}>
                                {"Download Invoice"}
                            </button>
                            <button class="btn delete-btn" onclick={on_delete}>
                                {"Delete"}
                            </button>
                        </div>
                    </li>
                }
            })}
        </ul>
    }
}
