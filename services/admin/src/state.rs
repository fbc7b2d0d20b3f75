use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbPermissionRepository, DbProfileRepository, DbRelationProber, DbTenantRepository,
};
use crate::infra::identity::HttpIdentityProvider;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub identity: HttpIdentityProvider,
}

impl AppState {
    pub fn tenant_repo(&self) -> DbTenantRepository {
        DbTenantRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn permission_repo(&self) -> DbPermissionRepository {
        DbPermissionRepository {
            db: self.db.clone(),
        }
    }

    pub fn relation_prober(&self) -> DbRelationProber {
        DbRelationProber {
            db: self.db.clone(),
        }
    }

    pub fn identity_provider(&self) -> HttpIdentityProvider {
        self.identity.clone()
    }
}
