use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, Level};

mod db;
mod domain;
mod rest;

use domain::{InvoiceService, RecordService};
use rest::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up database");
    let db = db::DbConnection::init().await?;

    let state = AppState::new(RecordService::new(db.clone()), InvoiceService::new(db));

    // CORS setup to allow the frontend dev server to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    // Record endpoints keep the paths the dashboard has always called
    let api_routes = Router::new()
        .route("/get-incomes", get(rest::list_incomes))
        .route("/add-income", post(rest::add_income))
        .route("/delete-income/:id", delete(rest::delete_income))
        .route("/get-expenses", get(rest::list_expenses))
        .route("/add-expense", post(rest::add_expense))
        .route("/delete-expense/:id", delete(rest::delete_expense));

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .route("/invoice/:payment_id", get(rest::get_invoice))
        .fallback_service(ServeDir::new(PathBuf::from("../frontend/dist")))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 5000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
