//! Profile domain types.
//!
//! A Profile is the application-side user record, one-to-one with an
//! identity-provider principal (same id).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application role stored on the profile.
///
/// Wire format: snake_case string ("admin", "accountant", "stock_manager",
/// "user"), matching the `profiles.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Accountant,
    StockManager,
    User,
}

impl UserRole {
    /// Parse from the stored string value. Returns `None` for unknown values.
    pub fn parse(v: &str) -> Option<Self> {
        match v {
            "admin" => Some(Self::Admin),
            "accountant" => Some(Self::Accountant),
            "stock_manager" => Some(Self::StockManager),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Accountant => "accountant",
            Self::StockManager => "stock_manager",
            Self::User => "user",
        }
    }
}

/// Account status gating sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    /// Parse from the stored string value. Returns `None` for unknown values.
    pub fn parse(v: &str) -> Option<Self> {
        match v {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

/// Application user record. `id` equals the identity-provider principal id;
/// `company_id` references an existing Company or is null.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_known_roles() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("accountant"), Some(UserRole::Accountant));
        assert_eq!(
            UserRole::parse("stock_manager"),
            Some(UserRole::StockManager)
        );
        assert_eq!(UserRole::parse("user"), Some(UserRole::User));
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn should_round_trip_role_via_str() {
        for role in [
            UserRole::Admin,
            UserRole::Accountant,
            UserRole::StockManager,
            UserRole::User,
        ] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn should_parse_known_statuses() {
        assert_eq!(UserStatus::parse("active"), Some(UserStatus::Active));
        assert_eq!(UserStatus::parse("inactive"), Some(UserStatus::Inactive));
        assert_eq!(UserStatus::parse("pending"), Some(UserStatus::Pending));
        assert_eq!(UserStatus::parse("locked"), None);
    }

    #[test]
    fn should_round_trip_role_via_serde() {
        for role in [
            UserRole::Admin,
            UserRole::Accountant,
            UserRole::StockManager,
            UserRole::User,
        ] {
            let json = serde_json::to_string(&role).unwrap();
            let parsed: UserRole = serde_json::from_str(&json).unwrap();
            assert_eq!(role, parsed);
        }
        assert_eq!(
            serde_json::to_string(&UserRole::StockManager).unwrap(),
            "\"stock_manager\""
        );
    }
}
