//! Company (tenant) domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Company name used when bootstrap has to create the first tenant.
pub const DEFAULT_COMPANY_NAME: &str = "Fatura Trading";

/// Currency assigned to a bootstrap-created tenant.
pub const DEFAULT_CURRENCY: &str = "KES";

/// Tenant root. Owns customers, documents, and users in the wider application.
#[derive(Debug, Clone)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    /// Contact email.
    pub email: String,
    /// ISO 4217 currency code.
    pub currency: String,
    pub logo_url: Option<String>,
    /// Brand primary color as a 6-digit HEX string (e.g. "#FF8C42").
    pub primary_color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// The tenant created by bootstrap when no company exists yet.
    /// The admin's email doubles as the contact address.
    pub fn bootstrap_default(contact_email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: DEFAULT_COMPANY_NAME.to_owned(),
            email: contact_email.to_owned(),
            currency: DEFAULT_CURRENCY.to_owned(),
            logo_url: None,
            primary_color: None,
            created_at: now,
            updated_at: now,
        }
    }
}
