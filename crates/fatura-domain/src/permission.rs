//! Per-user permission grants.

use serde::Serialize;
use uuid::Uuid;

/// Permission granted to the first admin during bootstrap.
pub const VIEW_DASHBOARD_SUMMARY: &str = "view_dashboard_summary";

/// A named permission granted (or revoked) for one user.
/// Unique per `(user_id, permission_name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGrant {
    pub user_id: Uuid,
    pub permission_name: String,
    pub granted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_grant_fields() {
        let grant = PermissionGrant {
            user_id: Uuid::now_v7(),
            permission_name: VIEW_DASHBOARD_SUMMARY.to_owned(),
            granted: true,
        };
        let json = serde_json::to_value(&grant).unwrap();
        assert_eq!(json["permission_name"], "view_dashboard_summary");
        assert_eq!(json["granted"], true);
    }
}
