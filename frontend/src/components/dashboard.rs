use shared::{summary, TransactionRecord};
use yew::prelude::*;

use crate::components::chart::Chart;
use crate::components::history::History;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub incomes: Vec<TransactionRecord>,
    pub expenses: Vec<TransactionRecord>,
    pub loading: bool,
}

fn min_max_text(records: &[TransactionRecord]) -> (String, String) {
    let format = |value: Option<f64>| {
        value
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string())
    };
    (
        format(summary::min_amount(records)),
        format(summary::max_amount(records)),
    )
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let total_income = summary::total(&props.incomes);
    let total_expense = summary::total(&props.expenses);
    let balance = summary::balance(&props.incomes, &props.expenses);

    let (min_income, max_income) = min_max_text(&props.incomes);
    let (min_expense, max_expense) = min_max_text(&props.expenses);

    html! {
        <div class="dashboard">
            <h1>{"All Transactions"}</h1>
            <div class="stats-container">
                <div class="chart-section">
                    <Chart
                        incomes={props.incomes.clone()}
                        expenses={props.expenses.clone()}
                        loading={props.loading}
                    />
                    <div class="amount-cards">
                        <div class="amount-card income">
                            <h2>{"Total Income"}</h2>
                            <p>{format!("{:.2}", total_income)}</p>
                        </div>
                        <div class="amount-card expense">
                            <h2>{"Total Expense"}</h2>
                            <p>{format!("{:.2}", total_expense)}</p>
                        </div>
                        <div class="amount-card balance">
                            <h2>{"Total Balance"}</h2>
                            <p>{format!("{:.2}", balance)}</p>
                        </div>
                    </div>
                </div>
                <div class="history-section">
                    <History
                        incomes={props.incomes.clone()}
                        expenses={props.expenses.clone()}
                    />
                    <h2 class="salary-title">{"Min "}<span>{"Income"}</span>{" Max"}</h2>
                    <div class="salary-item">
                        <p>{min_income}</p>
                        <p>{max_income}</p>
                    </div>
                    <h2 class="salary-title">{"Min "}<span>{"Expense"}</span>{" Max"}</h2>
                    <div class="salary-item">
                        <p>{min_expense}</p>
                        <p>{max_expense}</p>
                    </div>
                </div>
            </div>
        </div>
    }
}
