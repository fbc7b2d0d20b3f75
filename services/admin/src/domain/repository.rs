#![allow(async_fn_in_trait)]

use uuid::Uuid;

use fatura_domain::company::Company;
use fatura_domain::permission::PermissionGrant;
use fatura_domain::profile::{Profile, UserRole, UserStatus};

use crate::domain::types::{CreateIdentityOutcome, GrantOutcome, Identity, ProbeOutcome};
use crate::error::AdminServiceError;

/// Repository for the tenant (company) relation.
pub trait TenantRepository: Send + Sync {
    /// First company in insertion order, if any. Bootstrap reuses it
    /// unconditionally — there is no tenant-selection logic.
    async fn find_first(&self) -> Result<Option<Company>, AdminServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AdminServiceError>;
    async fn create(&self, company: &Company) -> Result<(), AdminServiceError>;
}

/// Repository for application profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AdminServiceError>;

    /// Write a profile keyed by identity id; conflict on id overwrites.
    async fn upsert(&self, profile: &Profile) -> Result<(), AdminServiceError>;

    /// Update role/status/name of an existing profile in place.
    async fn promote(
        &self,
        id: Uuid,
        role: UserRole,
        status: UserStatus,
        full_name: &str,
    ) -> Result<(), AdminServiceError>;

    /// Whether any profile exists at all.
    async fn any(&self) -> Result<bool, AdminServiceError>;
}

/// Repository for per-user permission grants.
pub trait PermissionRepository: Send + Sync {
    /// Insert a grant. Duplicate `(user, permission)` pairs are reported as
    /// `AlreadyGranted`, never as an error.
    async fn grant(
        &self,
        user_id: Uuid,
        permission_name: &str,
    ) -> Result<GrantOutcome, AdminServiceError>;

    async fn list_for_user(&self, user_id: Uuid)
    -> Result<Vec<PermissionGrant>, AdminServiceError>;
}

/// Port for the external identity provider's admin API. Every call requires
/// the elevated service-role credential supplied at construction.
pub trait IdentityProvider: Send + Sync {
    /// Create an auto-confirmed identity. "Already exists" conflicts are
    /// classified by the adapter and surfaced as an outcome, not an error.
    async fn create(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CreateIdentityOutcome, AdminServiceError>;

    async fn list(&self) -> Result<Vec<Identity>, AdminServiceError>;

    async fn delete(&self, id: Uuid) -> Result<(), AdminServiceError>;
}

/// Port issuing metadata-only existence probes against the backing store.
pub trait RelationProber: Send + Sync {
    async fn probe(&self, relation: &str) -> ProbeOutcome;
}

/// Sink for human-readable step notifications. Messages carry no semantic
/// weight; sinks may drop them.
pub trait ProgressSink {
    fn notify(&self, message: &str);
}
