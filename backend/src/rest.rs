use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use shared::{ApiErrorBody, CreateRecordRequest, TransactionKind};
use tracing::info;

use crate::domain::{InvoiceService, RecordError, RecordService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub records: RecordService,
    pub invoices: InvoiceService,
}

impl AppState {
    pub fn new(records: RecordService, invoices: InvoiceService) -> Self {
        Self { records, invoices }
    }
}

/// Axum handler for GET /api/v1/get-incomes
pub async fn list_incomes(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/v1/get-incomes");
    list_records(&state, TransactionKind::Income).await
}

/// Axum handler for GET /api/v1/get-expenses
pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/v1/get-expenses");
    list_records(&state, TransactionKind::Expense).await
}

async fn list_records(state: &AppState, kind: TransactionKind) -> axum::response::Response {
    match state.records.list(kind).await {
        Ok(response) => (StatusCode::OK, Json(response.records)).into_response(),
        Err(e) => {
            tracing::error!("Error listing {} records: {:?}", kind, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing records").into_response()
        }
    }
}

/// Axum handler for POST /api/v1/add-income
pub async fn add_income(
    State(state): State<AppState>,
    Json(request): Json<CreateRecordRequest>,
) -> impl IntoResponse {
    info!("POST /api/v1/add-income - request: {:?}", request);
    create_record(&state, TransactionKind::Income, request).await
}

/// Axum handler for POST /api/v1/add-expense
pub async fn add_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateRecordRequest>,
) -> impl IntoResponse {
    info!("POST /api/v1/add-expense - request: {:?}", request);
    create_record(&state, TransactionKind::Expense, request).await
}

async fn create_record(
    state: &AppState,
    kind: TransactionKind,
    request: CreateRecordRequest,
) -> axum::response::Response {
    match state.records.create(kind, request).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(RecordError::Storage(e)) => {
            tracing::error!("Error storing {} record: {:?}", kind, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error storing record").into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorBody { message: e.to_string() }),
        )
            .into_response(),
    }
}

/// Axum handler for DELETE /api/v1/delete-income/:id
pub async fn delete_income(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/v1/delete-income/{}", id);
    delete_record(&state, TransactionKind::Income, &id).await
}

/// Axum handler for DELETE /api/v1/delete-expense/:id
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/v1/delete-expense/{}", id);
    delete_record(&state, TransactionKind::Expense, &id).await
}

async fn delete_record(
    state: &AppState,
    kind: TransactionKind,
    id: &str,
) -> axum::response::Response {
    match state.records.delete(kind, id).await {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Record not found").into_response(),
        Err(e) => {
            tracing::error!("Error deleting {} record {}: {:?}", kind, id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting record").into_response()
        }
    }
}

/// Axum handler for GET /invoice/:payment_id
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /invoice/{}", payment_id);

    match state.invoices.render_invoice(&payment_id).await {
        Ok(Some(bytes)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"Invoice-{}.pdf\"", payment_id),
                ),
            ],
            bytes,
        )
            .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Unknown payment id").into_response(),
        Err(e) => {
            tracing::error!("Error rendering invoice for {}: {:?}", payment_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error rendering invoice").into_response()
        }
    }
}
