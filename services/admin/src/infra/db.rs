use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QuerySelect, SqlErr, Statement, sea_query::OnConflict,
};
use uuid::Uuid;

use fatura_admin_schema::{companies, profiles, user_permissions};
use fatura_domain::company::Company;
use fatura_domain::permission::PermissionGrant;
use fatura_domain::profile::{Profile, UserRole, UserStatus};

use crate::domain::repository::{
    PermissionRepository, ProfileRepository, RelationProber, TenantRepository,
};
use crate::domain::types::{GrantOutcome, ProbeOutcome};
use crate::error::AdminServiceError;

// ── Tenant repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTenantRepository {
    pub db: DatabaseConnection,
}

impl TenantRepository for DbTenantRepository {
    async fn find_first(&self) -> Result<Option<Company>, AdminServiceError> {
        let model = companies::Entity::find()
            .one(&self.db)
            .await
            .context("find first company")?;
        Ok(model.map(company_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AdminServiceError> {
        let model = companies::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find company by id")?;
        Ok(model.map(company_from_model))
    }

    async fn create(&self, company: &Company) -> Result<(), AdminServiceError> {
        companies::ActiveModel {
            id: Set(company.id),
            name: Set(company.name.clone()),
            email: Set(company.email.clone()),
            currency: Set(company.currency.clone()),
            logo_url: Set(company.logo_url.clone()),
            primary_color: Set(company.primary_color.clone()),
            created_at: Set(company.created_at),
            updated_at: Set(company.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create company")?;
        Ok(())
    }
}

fn company_from_model(model: companies::Model) -> Company {
    Company {
        id: model.id,
        name: model.name,
        email: model.email,
        currency: model.currency,
        logo_url: model.logo_url,
        primary_color: model.primary_color,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AdminServiceError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find profile by email")?;
        model.map(profile_from_model).transpose()
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), AdminServiceError> {
        let row = profiles::ActiveModel {
            id: Set(profile.id),
            email: Set(profile.email.clone()),
            full_name: Set(profile.full_name.clone()),
            role: Set(profile.role.as_str().to_owned()),
            status: Set(profile.status.as_str().to_owned()),
            company_id: Set(profile.company_id),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        };
        profiles::Entity::insert(row)
            .on_conflict(
                OnConflict::column(profiles::Column::Id)
                    .update_columns([
                        profiles::Column::Email,
                        profiles::Column::FullName,
                        profiles::Column::Role,
                        profiles::Column::Status,
                        profiles::Column::CompanyId,
                        profiles::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert profile")?;
        Ok(())
    }

    async fn promote(
        &self,
        id: Uuid,
        role: UserRole,
        status: UserStatus,
        full_name: &str,
    ) -> Result<(), AdminServiceError> {
        let mut row = profiles::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        row.role = Set(role.as_str().to_owned());
        row.status = Set(status.as_str().to_owned());
        row.full_name = Set(full_name.to_owned());
        row.updated_at = Set(Utc::now());
        row.update(&self.db).await.context("promote profile")?;
        Ok(())
    }

    async fn any(&self) -> Result<bool, AdminServiceError> {
        let first = profiles::Entity::find()
            .limit(1)
            .all(&self.db)
            .await
            .context("check for existing profiles")?;
        Ok(!first.is_empty())
    }
}

fn profile_from_model(model: profiles::Model) -> Result<Profile, AdminServiceError> {
    let role = UserRole::parse(&model.role)
        .ok_or_else(|| anyhow::anyhow!("unknown role in profiles row: {}", model.role))?;
    let status = UserStatus::parse(&model.status)
        .ok_or_else(|| anyhow::anyhow!("unknown status in profiles row: {}", model.status))?;
    Ok(Profile {
        id: model.id,
        email: model.email,
        full_name: model.full_name,
        role,
        status,
        company_id: model.company_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Permission repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPermissionRepository {
    pub db: DatabaseConnection,
}

impl PermissionRepository for DbPermissionRepository {
    async fn grant(
        &self,
        user_id: Uuid,
        permission_name: &str,
    ) -> Result<GrantOutcome, AdminServiceError> {
        let row = user_permissions::ActiveModel {
            user_id: Set(user_id),
            permission_name: Set(permission_name.to_owned()),
            granted: Set(true),
            created_at: Set(Utc::now()),
        };
        match user_permissions::Entity::insert(row)
            .exec_without_returning(&self.db)
            .await
        {
            Ok(_) => Ok(GrantOutcome::Granted),
            // The composite primary key makes duplicates an expected outcome.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(GrantOutcome::AlreadyGranted)
            }
            Err(e) => Err(anyhow::Error::new(e).context("grant permission").into()),
        }
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PermissionGrant>, AdminServiceError> {
        let models = user_permissions::Entity::find()
            .filter(user_permissions::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list permissions for user")?;
        Ok(models
            .into_iter()
            .map(|model| PermissionGrant {
                user_id: model.user_id,
                permission_name: model.permission_name,
                granted: model.granted,
            })
            .collect())
    }
}

// ── Relation prober ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRelationProber {
    pub db: DatabaseConnection,
}

impl RelationProber for DbRelationProber {
    async fn probe(&self, relation: &str) -> ProbeOutcome {
        // Metadata-only read; relation names come from a fixed internal list,
        // never from user input.
        let sql = format!("SELECT 1 FROM \"{relation}\" LIMIT 0");
        let statement = Statement::from_string(self.db.get_database_backend(), sql);
        match self.db.execute(statement).await {
            Ok(_) => ProbeOutcome::Exists,
            Err(e) => classify_probe_error(&e, relation),
        }
    }
}

/// The one place in the service that inspects backend error text. Everything
/// downstream works with `ProbeOutcome`.
fn classify_probe_error(e: &DbErr, relation: &str) -> ProbeOutcome {
    let message = e.to_string();
    if message.contains("does not exist") || message.contains("relation") {
        ProbeOutcome::Missing(format!("relation \"{relation}\" does not exist"))
    } else {
        ProbeOutcome::Failed(message)
    }
}
