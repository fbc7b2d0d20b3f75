use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::types::CompensationOutcome;

/// Admin service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least 8 characters")]
    PasswordTooShort,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("company not found")]
    CompanyNotFound,
    /// Profile upsert failed after the identity had already been created.
    /// Carries the outcome of the compensating identity deletion so callers
    /// can tell a clean rollback from a leaked identity.
    #[error("profile write failed: {source}")]
    ProfileWriteFailed {
        source: anyhow::Error,
        compensation: CompensationOutcome,
    },
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AdminServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::CompanyNotFound => "COMPANY_NOT_FOUND",
            Self::ProfileWriteFailed { .. } => "PROFILE_WRITE_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AdminServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidEmail | Self::PasswordTooShort => StatusCode::BAD_REQUEST,
            Self::ProfileNotFound | Self::CompanyNotFound => StatusCode::NOT_FOUND,
            Self::ProfileWriteFailed { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::ProfileWriteFailed {
                source,
                compensation,
            } => {
                tracing::error!(
                    error = %source,
                    ?compensation,
                    kind = "PROFILE_WRITE_FAILED",
                    "profile write failed"
                );
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn assert_error(
        error: AdminServiceError,
        expected_status: StatusCode,
        expected_kind: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn should_return_invalid_email() {
        assert_error(
            AdminServiceError::InvalidEmail,
            StatusCode::BAD_REQUEST,
            "INVALID_EMAIL",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_password_too_short() {
        assert_error(
            AdminServiceError::PasswordTooShort,
            StatusCode::BAD_REQUEST,
            "PASSWORD_TOO_SHORT",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_profile_not_found() {
        assert_error(
            AdminServiceError::ProfileNotFound,
            StatusCode::NOT_FOUND,
            "PROFILE_NOT_FOUND",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_company_not_found() {
        assert_error(
            AdminServiceError::CompanyNotFound,
            StatusCode::NOT_FOUND,
            "COMPANY_NOT_FOUND",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_profile_write_failed() {
        assert_error(
            AdminServiceError::ProfileWriteFailed {
                source: anyhow::anyhow!("db unavailable"),
                compensation: CompensationOutcome::IdentityDeleted,
            },
            StatusCode::INTERNAL_SERVER_ERROR,
            "PROFILE_WRITE_FAILED",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_internal() {
        assert_error(
            AdminServiceError::Internal(anyhow::anyhow!("db error")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
        )
        .await;
    }
}
