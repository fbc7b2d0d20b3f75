use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Minimum accepted password length for provisioned identities.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Every relation the full application schema is expected to contain, in
/// probe order. The admin service only owns the first three; the rest are
/// created by the main application's migrations and probed here for
/// deployment diagnostics.
pub const REQUIRED_RELATIONS: [&str; 23] = [
    "companies",
    "profiles",
    "user_permissions",
    "user_invitations",
    "customers",
    "product_categories",
    "products",
    "quotations",
    "quotation_items",
    "proforma_invoices",
    "proforma_items",
    "invoices",
    "invoice_items",
    "credit_notes",
    "credit_note_items",
    "payments",
    "payment_allocations",
    "delivery_notes",
    "delivery_note_items",
    "stock_movements",
    "tax_settings",
    "lpos",
    "lpo_items",
];

/// Principal record owned by the identity provider. Never persisted locally.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub email_confirmed: bool,
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// Result of an identity-create call, classified at the adapter boundary.
#[derive(Debug)]
pub enum CreateIdentityOutcome {
    Created(Identity),
    /// The provider already holds an identity for this email. Recoverable:
    /// the saga switches to the promote-existing path.
    AlreadyExists,
}

/// Result of a permission-grant insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    Granted,
    /// Duplicate `(user, permission)` pair. Tolerated, informational.
    AlreadyGranted,
}

/// Result of one relation probe, classified at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Exists,
    /// "relation … does not exist"-style error.
    Missing(String),
    /// Any other probe failure (permissions, connectivity). The report
    /// treats these as existing but records the message.
    Failed(String),
}

/// What happened to the identity after a failed profile write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompensationOutcome {
    IdentityDeleted,
    /// Best-effort delete failed; the identity is leaked and needs manual
    /// cleanup. Never re-thrown.
    DeleteFailed(String),
}

/// Provisioning saga states. Transitions are strictly forward; `Compensating`
/// is reachable only from `IdentityReady`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SagaState {
    Start,
    TenantResolved,
    IdentityReady,
    ProfileReady,
    PermissionsAssigned,
    Compensating,
    Failed,
}

/// Shape check matching the bootstrap scripts: one `@`, no whitespace, and a
/// dot-separated domain with non-empty parts.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_plain_addresses() {
        assert!(validate_email("admin@mail.com"));
        assert!(validate_email("a.b+c@sub.example.co"));
    }

    #[test]
    fn should_reject_malformed_addresses() {
        assert!(!validate_email(""));
        assert!(!validate_email("admin"));
        assert!(!validate_email("admin@"));
        assert!(!validate_email("@mail.com"));
        assert!(!validate_email("admin@mail"));
        assert!(!validate_email("admin@.com"));
        assert!(!validate_email("admin@mail."));
        assert!(!validate_email("ad min@mail.com"));
        assert!(!validate_email("admin@ma@il.com"));
    }

    #[test]
    fn should_enforce_minimum_password_length() {
        assert!(validate_password("Admin.12"));
        assert!(!validate_password("Admin.1"));
        assert!(!validate_password(""));
    }

    #[test]
    fn should_probe_the_owned_relations_first() {
        assert_eq!(
            &REQUIRED_RELATIONS[..3],
            &["companies", "profiles", "user_permissions"]
        );
        assert_eq!(REQUIRED_RELATIONS.len(), 23);
    }
}
