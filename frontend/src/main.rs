use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::dashboard::Dashboard;
use components::navigation::{Navigation, View};
use components::record_form::RecordForm;
use components::record_list::RecordList;
use hooks::use_records::use_records;
use services::api::ApiClient;
use services::download;

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();
    let records = use_records(&api_client);

    let active_view = use_state(|| View::Dashboard);
    let menu_open = use_state(|| false);

    // Fetch both ledgers once on mount
    use_effect_with((), {
        let refresh_all = records.actions.refresh_all.clone();
        move |_| {
            refresh_all.emit(());
            || ()
        }
    });

    let on_select_view = {
        let active_view = active_view.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |view: View| {
            active_view.set(view);
            menu_open.set(false);
        })
    };

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };

    let on_dismiss_error = {
        let clear_error = records.actions.clear_error.clone();
        Callback::from(move |_| clear_error.emit(()))
    };

    let on_download_invoice = {
        let api_client = api_client.clone();
        Callback::from(move |payment_id: String| {
            let api_client = api_client.clone();
            spawn_local(async move {
                match api_client.download_invoice(&payment_id).await {
                    Ok(bytes) => {
                        let filename = format!("Invoice-{}.pdf", payment_id);
                        if let Err(message) = download::save_pdf(&bytes, &filename) {
                            gloo::console::error!("Failed to save invoice:", message);
                        }
                    }
                    Err(message) => {
                        gloo::console::error!("Error downloading invoice:", message);
                    }
                }
            });
        })
    };

    let view_content = match *active_view {
        View::Dashboard => html! {
            <Dashboard
                incomes={records.state.incomes.clone()}
                expenses={records.state.expenses.clone()}
                loading={records.state.loading}
            />
        },
        View::Incomes => html! {
            <div class="ledger-view">
                <h1>{"Incomes"}</h1>
                <RecordForm
                    heading="Add Income"
                    submit_label="+ Add Income"
                    on_submit={records.actions.add_income.clone()}
                />
                <RecordList
                    records={records.state.incomes.clone()}
                    loading={records.state.loading}
                    kind_class="income"
                    on_delete={records.actions.delete_income.clone()}
                    on_download_invoice={on_download_invoice.clone()}
                />
            </div>
        },
        View::Expenses => html! {
            <div class="ledger-view">
                <h1>{"Expenses"}</h1>
                <RecordForm
                    heading="Add Expense"
                    submit_label="+ Add Expense"
                    on_submit={records.actions.add_expense.clone()}
                />
                <RecordList
                    records={records.state.expenses.clone()}
                    loading={records.state.loading}
                    kind_class="expense"
                    on_delete={records.actions.delete_expense.clone()}
                    on_download_invoice={on_download_invoice.clone()}
                />
            </div>
        },
    };

    html! {
        <div class="app">
            <button class="menu-toggle" onclick={toggle_menu}>
                {if *menu_open { "\u{2716}" } else { "\u{2630}" }}
            </button>

            <div class={if *menu_open { "navigation-container open" } else { "navigation-container" }}>
                <Navigation active={*active_view} on_select={on_select_view} />
            </div>

            {if let Some(error) = records.state.error.as_ref() {
                html! {
                    <div class="error-banner" onclick={on_dismiss_error}>
                        {error}
                    </div>
                }
            } else { html! {} }}

            <main>{view_content}</main>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
