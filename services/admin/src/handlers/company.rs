use axum::{Json, extract::State};

use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::company::{PublicCompany, PublicCompanyUseCase};

// ── GET /company ─────────────────────────────────────────────────────────────

/// Public branding data for unauthenticated pages.
pub async fn public_company(
    State(state): State<AppState>,
) -> Result<Json<PublicCompany>, AdminServiceError> {
    let usecase = PublicCompanyUseCase {
        tenants: state.tenant_repo(),
    };
    Ok(Json(usecase.execute().await?))
}
