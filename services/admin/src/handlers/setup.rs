use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::tables::{CheckTablesUseCase, DatabaseStatus, DatabaseStatusUseCase, TableReport};
use crate::usecase::verify::{SetupReport, VerifySetupUseCase};

// ── GET /setup/tables ────────────────────────────────────────────────────────

pub async fn check_tables(State(state): State<AppState>) -> Json<TableReport> {
    let usecase = CheckTablesUseCase {
        prober: state.relation_prober(),
    };
    Json(usecase.execute().await)
}

// ── GET /setup/status ────────────────────────────────────────────────────────

pub async fn database_status(State(state): State<AppState>) -> Json<DatabaseStatus> {
    let usecase = DatabaseStatusUseCase {
        prober: state.relation_prober(),
        profiles: state.profile_repo(),
    };
    Json(usecase.execute().await)
}

// ── GET /setup/verify ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyParams {
    pub email: String,
}

pub async fn verify_setup(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<Json<SetupReport>, AdminServiceError> {
    let usecase = VerifySetupUseCase {
        profiles: state.profile_repo(),
        tenants: state.tenant_repo(),
        permissions: state.permission_repo(),
        identities: state.identity_provider(),
    };
    Ok(Json(usecase.execute(&params.email).await?))
}
