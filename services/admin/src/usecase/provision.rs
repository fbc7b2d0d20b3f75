//! First-admin provisioning saga.
//!
//! Strictly sequential: tenant resolution → identity create → profile upsert
//! → permission grant. The only compensation in the system is the identity
//! delete after a failed profile write. Concurrent invocations for the same
//! email are not serialized; acceptable for a one-time bootstrap flow.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use fatura_domain::company::Company;
use fatura_domain::permission::VIEW_DASHBOARD_SUMMARY;
use fatura_domain::profile::{Profile, UserRole, UserStatus};

use crate::domain::repository::{
    IdentityProvider, PermissionRepository, ProfileRepository, ProgressSink, TenantRepository,
};
use crate::domain::types::{
    CompensationOutcome, CreateIdentityOutcome, GrantOutcome, SagaState, validate_email,
    validate_password,
};
use crate::error::AdminServiceError;

pub struct ProvisionAdminInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionOutcome {
    /// Fresh identity, profile, and permission grant.
    Created,
    /// Identity already existed; the matching profile was promoted in place.
    Promoted,
}

#[derive(Debug)]
pub struct ProvisionOutput {
    pub user_id: Uuid,
    pub outcome: ProvisionOutcome,
    /// Terminal saga state, for diagnostics.
    pub state: SagaState,
}

/// Progress sink that forwards step messages to the log.
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn notify(&self, message: &str) {
        tracing::info!("{message}");
    }
}

pub struct ProvisionAdminUseCase<T, I, P, G, S>
where
    T: TenantRepository,
    I: IdentityProvider,
    P: ProfileRepository,
    G: PermissionRepository,
    S: ProgressSink,
{
    pub tenants: T,
    pub identities: I,
    pub profiles: P,
    pub permissions: G,
    pub progress: S,
}

impl<T, I, P, G, S> ProvisionAdminUseCase<T, I, P, G, S>
where
    T: TenantRepository,
    I: IdentityProvider,
    P: ProfileRepository,
    G: PermissionRepository,
    S: ProgressSink,
{
    pub async fn execute(
        &self,
        input: ProvisionAdminInput,
    ) -> Result<ProvisionOutput, AdminServiceError> {
        // Validation happens before any backend call.
        if !validate_email(&input.email) {
            return Err(AdminServiceError::InvalidEmail);
        }
        if !validate_password(&input.password) {
            return Err(AdminServiceError::PasswordTooShort);
        }

        // Step 1: tenant resolution. Fatal on failure; nothing to compensate.
        self.progress.notify("Checking for default company...");
        let company_id = match self.tenants.find_first().await? {
            Some(company) => {
                self.progress
                    .notify(&format!("Found company: {}", company.name));
                company.id
            }
            None => {
                self.progress.notify("Creating default company...");
                let company = Company::bootstrap_default(&input.email, Utc::now());
                self.tenants.create(&company).await?;
                self.progress
                    .notify(&format!("Created default company: {}", company.name));
                company.id
            }
        };
        tracing::debug!(state = ?SagaState::TenantResolved, "saga transition");

        // Step 2: identity check-and-create.
        self.progress.notify("Creating authentication identity...");
        let identity = match self.identities.create(&input.email, &input.password).await? {
            CreateIdentityOutcome::Created(identity) => identity,
            CreateIdentityOutcome::AlreadyExists => {
                // Idempotent promote-existing path.
                self.progress
                    .notify("Identity already exists, promoting existing user...");
                let existing = self
                    .identities
                    .list()
                    .await?
                    .into_iter()
                    .find(|identity| identity.email == input.email)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "identity provider reported an existing identity for {} \
                             but the listing does not contain it",
                            input.email
                        )
                    })?;
                self.profiles
                    .promote(
                        existing.id,
                        UserRole::Admin,
                        UserStatus::Active,
                        &input.full_name,
                    )
                    .await?;
                self.progress.notify("Updated existing user to admin");
                return Ok(ProvisionOutput {
                    user_id: existing.id,
                    outcome: ProvisionOutcome::Promoted,
                    state: SagaState::ProfileReady,
                });
            }
        };
        tracing::debug!(state = ?SagaState::IdentityReady, "saga transition");

        // Step 3: profile upsert. On failure, best-effort compensating delete
        // of the identity created above; the outcome stays observable in the
        // returned error.
        self.progress.notify("Writing admin profile...");
        let now = Utc::now();
        let profile = Profile {
            id: identity.id,
            email: input.email.clone(),
            full_name: input.full_name.clone(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            company_id: Some(company_id),
            created_at: now,
            updated_at: now,
        };
        if let Err(e) = self.profiles.upsert(&profile).await {
            tracing::debug!(state = ?SagaState::Compensating, "saga transition");
            let compensation = match self.identities.delete(identity.id).await {
                Ok(()) => CompensationOutcome::IdentityDeleted,
                Err(delete_error) => {
                    tracing::warn!(
                        error = %delete_error,
                        identity_id = %identity.id,
                        "compensating identity delete failed"
                    );
                    CompensationOutcome::DeleteFailed(delete_error.to_string())
                }
            };
            return Err(AdminServiceError::ProfileWriteFailed {
                source: anyhow::Error::new(e),
                compensation,
            });
        }
        tracing::debug!(state = ?SagaState::ProfileReady, "saga transition");

        // Step 4: permission grant. Non-fatal; only duplicate conflicts are
        // expected, anything else is logged and swallowed.
        self.progress.notify("Assigning permissions...");
        match self
            .permissions
            .grant(identity.id, VIEW_DASHBOARD_SUMMARY)
            .await
        {
            Ok(GrantOutcome::Granted) => self.progress.notify("Permissions assigned"),
            Ok(GrantOutcome::AlreadyGranted) => {
                tracing::info!(permission = VIEW_DASHBOARD_SUMMARY, "already granted");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    permission = VIEW_DASHBOARD_SUMMARY,
                    "permission grant failed"
                );
            }
        }

        self.progress.notify("Admin user created successfully");
        Ok(ProvisionOutput {
            user_id: identity.id,
            outcome: ProvisionOutcome::Created,
            state: SagaState::PermissionsAssigned,
        })
    }
}
