pub mod config;
pub mod ledger;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::{
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use config::FileConfig;
use ledger::PaymentLedger;

pub struct AppState {
    pub ledger: PaymentLedger,
    pub default_amount: f64,
}

impl AppState {
    pub fn from_config(config: &FileConfig) -> Self {
        Self {
            ledger: PaymentLedger::new(&config.payments),
            default_amount: config.payments.default_amount,
        }
    }
}

/// All routes. GET and HEAD paths other than `/health` fall through to
/// `static_dir` when one is given. Anything else unmatched is a plain 404.
pub fn router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/submit-payment", post(routes::payment::submit_payment))
        .route("/submit", post(routes::payment::submit_payment))
        .route("/process", post(routes::process::process_payment))
        .with_state(state);

    match static_dir {
        Some(dir) => app.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .fallback(not_found.into_service()),
        ),
        None => app.fallback(not_found),
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
