use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use fatura_core::health::{healthz, readyz};
use fatura_core::middleware::request_id_layer;

use crate::handlers::{
    company::public_company,
    provision::create_admin,
    setup::{check_tables, database_status, verify_setup},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Provisioning
        .route("/admin/users", post(create_admin))
        // Setup diagnostics
        .route("/setup/tables", get(check_tables))
        .route("/setup/status", get(database_status))
        .route("/setup/verify", get(verify_setup))
        // Branding
        .route("/company", get(public_company))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
