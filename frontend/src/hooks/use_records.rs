use shared::{CreateRecordRequest, TransactionRecord};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// The record lists live here and are passed down by value; there is no
/// global store. Mutations follow the mutate-then-refetch pattern: the
/// server is the source of truth and nothing is updated optimistically.
#[derive(Clone, PartialEq)]
pub struct RecordsState {
    pub incomes: Vec<TransactionRecord>,
    pub expenses: Vec<TransactionRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseRecordsResult {
    pub state: RecordsState,
    pub actions: UseRecordsActions,
}

#[derive(Clone)]
pub struct UseRecordsActions {
    pub refresh_all: Callback<()>,
    pub add_income: Callback<CreateRecordRequest>,
    pub delete_income: Callback<String>,
    pub add_expense: Callback<CreateRecordRequest>,
    pub delete_expense: Callback<String>,
    pub clear_error: Callback<()>,
}

async fn fetch_incomes(
    api_client: &ApiClient,
    incomes: &UseStateHandle<Vec<TransactionRecord>>,
    error: &UseStateHandle<Option<String>>,
) {
    match api_client.get_incomes().await {
        Ok(records) => {
            // Structural equality guards against redundant re-renders when
            // the server returns identical data
            if **incomes != records {
                incomes.set(records);
            }
        }
        Err(message) => error.set(Some(message)),
    }
}

async fn fetch_expenses(
    api_client: &ApiClient,
    expenses: &UseStateHandle<Vec<TransactionRecord>>,
    error: &UseStateHandle<Option<String>>,
) {
    match api_client.get_expenses().await {
        Ok(records) => {
            if **expenses != records {
                expenses.set(records);
            }
        }
        Err(message) => error.set(Some(message)),
    }
}

#[hook]
pub fn use_records(api_client: &ApiClient) -> UseRecordsResult {
    let incomes = use_state(Vec::<TransactionRecord>::new);
    let expenses = use_state(Vec::<TransactionRecord>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let refresh_all = {
        let api_client = api_client.clone();
        let incomes = incomes.clone();
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let incomes = incomes.clone();
            let expenses = expenses.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);
                fetch_incomes(&api_client, &incomes, &error).await;
                fetch_expenses(&api_client, &expenses, &error).await;
                loading.set(false);
            });
        })
    };

    let add_income = {
        let api_client = api_client.clone();
        let incomes = incomes.clone();
        let error = error.clone();

        use_callback((), move |request: CreateRecordRequest, _| {
            let api_client = api_client.clone();
            let incomes = incomes.clone();
            let error = error.clone();

            spawn_local(async move {
                match api_client.add_income(&request).await {
                    Ok(_) => fetch_incomes(&api_client, &incomes, &error).await,
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    let delete_income = {
        let api_client = api_client.clone();
        let incomes = incomes.clone();
        let error = error.clone();

        use_callback((), move |id: String, _| {
            let api_client = api_client.clone();
            let incomes = incomes.clone();
            let error = error.clone();

            spawn_local(async move {
                match api_client.delete_income(&id).await {
                    Ok(_) => fetch_incomes(&api_client, &incomes, &error).await,
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    let add_expense = {
        let api_client = api_client.clone();
        let expenses = expenses.clone();
        let error = error.clone();

        use_callback((), move |request: CreateRecordRequest, _| {
            let api_client = api_client.clone();
            let expenses = expenses.clone();
            let error = error.clone();

            spawn_local(async move {
                match api_client.add_expense(&request).await {
                    Ok(_) => fetch_expenses(&api_client, &expenses, &error).await,
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    let delete_expense = {
        let api_client = api_client.clone();
        let expenses = expenses.clone();
        let error = error.clone();

        use_callback((), move |id: String, _| {
            let api_client = api_client.clone();
            let expenses = expenses.clone();
            let error = error.clone();

            spawn_local(async move {
                match api_client.delete_expense(&id).await {
                    Ok(_) => fetch_expenses(&api_client, &expenses, &error).await,
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    let clear_error = {
        let error = error.clone();
        use_callback((), move |_, _| {
            error.set(None);
        })
    };

    let state = RecordsState {
        incomes: (*incomes).clone(),
        expenses: (*expenses).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    let actions = UseRecordsActions {
        refresh_all,
        add_income,
        delete_income,
        add_expense,
        delete_expense,
        clear_error,
    };

    UseRecordsResult { state, actions }
}
