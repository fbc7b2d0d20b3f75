use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::types::SagaState;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::provision::{
    ProvisionAdminInput, ProvisionAdminUseCase, ProvisionOutcome, TracingProgress,
};

// ── POST /admin/users ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAdminRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Serialize)]
pub struct CreateAdminResponse {
    pub user_id: String,
    pub outcome: ProvisionOutcome,
    pub state: SagaState,
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(body): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<CreateAdminResponse>), AdminServiceError> {
    let usecase = ProvisionAdminUseCase {
        tenants: state.tenant_repo(),
        identities: state.identity_provider(),
        profiles: state.profile_repo(),
        permissions: state.permission_repo(),
        progress: TracingProgress,
    };
    let output = usecase
        .execute(ProvisionAdminInput {
            email: body.email,
            password: body.password,
            full_name: body.full_name,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateAdminResponse {
            user_id: output.user_id.to_string(),
            outcome: output.outcome,
            state: output.state,
        }),
    ))
}
