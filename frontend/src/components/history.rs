use shared::{summary, TransactionKind, TransactionRecord};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HistoryProps {
    pub incomes: Vec<TransactionRecord>,
    pub expenses: Vec<TransactionRecord>,
}

/// The three most recent transactions across both ledgers
#[function_component(History)]
pub fn history(props: &HistoryProps) -> Html {
    let recent = summary::recent_history(&props.incomes, &props.expenses);

    html! {
        <div class="history">
            <h2>{"Recent History"}</h2>
            {if recent.is_empty() {
                html! { <p class="history-empty">{"No transactions yet"}</p> }
            } else {
                html! {
                    <ul class="history-items">
                        {for recent.iter().map(|record| {
                            let is_expense =
                                record.extract_kind() == Ok(TransactionKind::Expense);
                            let (item_class, amount_text) = if is_expense {
                                ("history-item expense", format!("-{:.2}", record.amount))
                            } else {
                                ("history-item income", format!("+{:.2}", record.amount))
                            };

                            html! {
                                <li class={item_class}>
                                    <span class="history-title">{&record.title}</span>
                                    <span class="history-amount">{amount_text}</span>
                                </li>
                            }
                        })}
                    </ul>
                }
            }}
        </div>
    }
}
