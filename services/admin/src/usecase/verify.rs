//! Post-bootstrap verification: can the admin actually sign in?

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use fatura_domain::permission::PermissionGrant;
use fatura_domain::profile::{UserRole, UserStatus};

use crate::domain::repository::{
    IdentityProvider, PermissionRepository, ProfileRepository, TenantRepository,
};
use crate::error::AdminServiceError;

#[derive(Debug, Serialize)]
pub struct CompanyCheck {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct IdentityCheck {
    pub email_confirmed: bool,
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// Everything the verify flow inspects about one admin account.
#[derive(Debug, Serialize)]
pub struct SetupReport {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub role_admin: bool,
    pub status_active: bool,
    pub company: Option<CompanyCheck>,
    pub permissions: Vec<PermissionGrant>,
    /// None when the provider has no identity for this email (or the
    /// listing failed).
    pub identity: Option<IdentityCheck>,
    /// Profile present, active, admin, and backed by an identity.
    pub ready: bool,
}

pub struct VerifySetupUseCase<P, T, G, I>
where
    P: ProfileRepository,
    T: TenantRepository,
    G: PermissionRepository,
    I: IdentityProvider,
{
    pub profiles: P,
    pub tenants: T,
    pub permissions: G,
    pub identities: I,
}

impl<P, T, G, I> VerifySetupUseCase<P, T, G, I>
where
    P: ProfileRepository,
    T: TenantRepository,
    G: PermissionRepository,
    I: IdentityProvider,
{
    pub async fn execute(&self, email: &str) -> Result<SetupReport, AdminServiceError> {
        let profile = self
            .profiles
            .find_by_email(email)
            .await?
            .ok_or(AdminServiceError::ProfileNotFound)?;

        let company = match profile.company_id {
            Some(company_id) => self
                .tenants
                .find_by_id(company_id)
                .await?
                .map(|company| CompanyCheck {
                    id: company.id,
                    name: company.name,
                }),
            None => None,
        };

        let permissions = self.permissions.list_for_user(profile.id).await?;

        // Identity listing failures degrade to "not found"; the profile
        // checks above are still worth reporting.
        let identity = match self.identities.list().await {
            Ok(identities) => identities
                .into_iter()
                .find(|identity| identity.email == profile.email)
                .map(|identity| IdentityCheck {
                    email_confirmed: identity.email_confirmed,
                    last_sign_in_at: identity.last_sign_in_at,
                }),
            Err(e) => {
                tracing::warn!(error = %e, "could not list identities during verify");
                None
            }
        };

        let role_admin = profile.role == UserRole::Admin;
        let status_active = profile.status == UserStatus::Active;
        let ready = role_admin && status_active && identity.is_some();

        Ok(SetupReport {
            user_id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role,
            status: profile.status,
            role_admin,
            status_active,
            company,
            permissions,
            identity,
            ready,
        })
    }
}
