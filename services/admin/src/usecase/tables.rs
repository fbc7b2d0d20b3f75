//! Deployment diagnostics: relation existence report and database status.

use serde::Serialize;

use crate::domain::repository::{ProfileRepository, RelationProber};
use crate::domain::types::{ProbeOutcome, REQUIRED_RELATIONS};

#[derive(Debug, Clone, Serialize)]
pub struct RelationCheck {
    pub relation: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub tables: Vec<RelationCheck>,
    pub total_checked: usize,
    pub total_exists: usize,
    pub all_exist: bool,
}

pub struct CheckTablesUseCase<R: RelationProber> {
    pub prober: R,
}

impl<R: RelationProber> CheckTablesUseCase<R> {
    /// Probe the full expected application schema.
    pub async fn execute(&self) -> TableReport {
        self.check(&REQUIRED_RELATIONS).await
    }

    pub async fn check(&self, relations: &[&str]) -> TableReport {
        build_report(&self.prober, relations).await
    }
}

/// Single pass, no retries. A probe failure that is not a missing relation
/// counts as existing so unrelated errors (e.g. permissions) do not block
/// setup; the message is kept in the report.
async fn build_report<R: RelationProber>(prober: &R, relations: &[&str]) -> TableReport {
    let mut tables = Vec::with_capacity(relations.len());
    for relation in relations {
        let check = match prober.probe(relation).await {
            ProbeOutcome::Exists => RelationCheck {
                relation: (*relation).to_owned(),
                exists: true,
                error: None,
            },
            ProbeOutcome::Missing(message) => RelationCheck {
                relation: (*relation).to_owned(),
                exists: false,
                error: Some(message),
            },
            ProbeOutcome::Failed(message) => RelationCheck {
                relation: (*relation).to_owned(),
                exists: true,
                error: Some(message),
            },
        };
        tables.push(check);
    }

    let total_exists = tables.iter().filter(|t| t.exists).count();
    TableReport {
        total_checked: tables.len(),
        total_exists,
        all_exist: total_exists == tables.len(),
        tables,
    }
}

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub tables_ready: bool,
    pub missing: Vec<RelationCheck>,
    pub users_exist: bool,
    pub total_found: usize,
    pub total_required: usize,
    pub ready: bool,
}

pub struct DatabaseStatusUseCase<R: RelationProber, P: ProfileRepository> {
    pub prober: R,
    pub profiles: P,
}

impl<R: RelationProber, P: ProfileRepository> DatabaseStatusUseCase<R, P> {
    pub async fn execute(&self) -> DatabaseStatus {
        let report = build_report(&self.prober, &REQUIRED_RELATIONS).await;

        // Only meaningful once the schema is in place; a probe error degrades
        // to "no users" rather than failing the whole status call.
        let users_exist = if report.all_exist {
            match self.profiles.any().await {
                Ok(any) => any,
                Err(e) => {
                    tracing::warn!(error = %e, "could not check for existing users");
                    false
                }
            }
        } else {
            false
        };

        DatabaseStatus {
            tables_ready: report.all_exist,
            missing: report
                .tables
                .iter()
                .filter(|t| !t.exists)
                .cloned()
                .collect(),
            users_exist,
            total_found: report.total_exists,
            total_required: report.total_checked,
            ready: report.all_exist && users_exist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use uuid::Uuid;

    use fatura_domain::profile::{Profile, UserRole, UserStatus};

    use crate::error::AdminServiceError;

    struct MockProber {
        missing: HashSet<&'static str>,
        failing: HashSet<&'static str>,
    }

    impl MockProber {
        fn all_exist() -> Self {
            Self {
                missing: HashSet::new(),
                failing: HashSet::new(),
            }
        }
    }

    impl RelationProber for MockProber {
        async fn probe(&self, relation: &str) -> ProbeOutcome {
            if self.missing.contains(relation) {
                ProbeOutcome::Missing(format!("relation \"{relation}\" does not exist"))
            } else if self.failing.contains(relation) {
                ProbeOutcome::Failed("permission denied".to_owned())
            } else {
                ProbeOutcome::Exists
            }
        }
    }

    struct MockProfiles {
        any: Result<bool, ()>,
    }

    impl ProfileRepository for MockProfiles {
        async fn find_by_email(&self, _email: &str) -> Result<Option<Profile>, AdminServiceError> {
            Ok(None)
        }
        async fn upsert(&self, _profile: &Profile) -> Result<(), AdminServiceError> {
            Ok(())
        }
        async fn promote(
            &self,
            _id: Uuid,
            _role: UserRole,
            _status: UserStatus,
            _full_name: &str,
        ) -> Result<(), AdminServiceError> {
            Ok(())
        }
        async fn any(&self) -> Result<bool, AdminServiceError> {
            self.any
                .map_err(|_| anyhow::anyhow!("profiles unreachable").into())
        }
    }

    #[tokio::test]
    async fn should_report_all_relations_existing() {
        let uc = CheckTablesUseCase {
            prober: MockProber::all_exist(),
        };
        let report = uc.execute().await;
        assert!(report.all_exist);
        assert_eq!(report.total_checked, REQUIRED_RELATIONS.len());
        assert_eq!(report.total_exists, report.total_checked);
        assert!(report.tables.iter().all(|t| t.error.is_none()));
    }

    #[tokio::test]
    async fn should_flag_exactly_the_missing_relation() {
        let uc = CheckTablesUseCase {
            prober: MockProber {
                missing: HashSet::from(["payments"]),
                failing: HashSet::new(),
            },
        };
        let report = uc.execute().await;
        assert!(!report.all_exist);
        assert_eq!(report.total_exists, report.total_checked - 1);
        let missing: Vec<_> = report.tables.iter().filter(|t| !t.exists).collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].relation, "payments");
        assert!(missing[0].error.as_deref().unwrap().contains("does not exist"));
    }

    #[tokio::test]
    async fn should_treat_ambiguous_probe_errors_as_existing() {
        let uc = CheckTablesUseCase {
            prober: MockProber {
                missing: HashSet::new(),
                failing: HashSet::from(["profiles"]),
            },
        };
        let report = uc.execute().await;
        assert!(report.all_exist);
        let flagged = report
            .tables
            .iter()
            .find(|t| t.relation == "profiles")
            .unwrap();
        assert!(flagged.exists);
        assert_eq!(flagged.error.as_deref(), Some("permission denied"));
    }

    #[tokio::test]
    async fn should_preserve_probe_order() {
        let uc = CheckTablesUseCase {
            prober: MockProber::all_exist(),
        };
        let report = uc.check(&["companies", "profiles"]).await;
        let order: Vec<_> = report.tables.iter().map(|t| t.relation.as_str()).collect();
        assert_eq!(order, ["companies", "profiles"]);
    }

    #[tokio::test]
    async fn should_report_ready_when_tables_and_users_exist() {
        let uc = DatabaseStatusUseCase {
            prober: MockProber::all_exist(),
            profiles: MockProfiles { any: Ok(true) },
        };
        let status = uc.execute().await;
        assert!(status.tables_ready);
        assert!(status.users_exist);
        assert!(status.ready);
        assert!(status.missing.is_empty());
    }

    #[tokio::test]
    async fn should_skip_user_check_when_tables_missing() {
        let uc = DatabaseStatusUseCase {
            prober: MockProber {
                missing: HashSet::from(["lpos"]),
                failing: HashSet::new(),
            },
            profiles: MockProfiles { any: Ok(true) },
        };
        let status = uc.execute().await;
        assert!(!status.tables_ready);
        assert!(!status.users_exist);
        assert!(!status.ready);
        assert_eq!(status.missing.len(), 1);
    }

    #[tokio::test]
    async fn should_degrade_user_check_errors_to_false() {
        let uc = DatabaseStatusUseCase {
            prober: MockProber::all_exist(),
            profiles: MockProfiles { any: Err(()) },
        };
        let status = uc.execute().await;
        assert!(status.tables_ready);
        assert!(!status.users_exist);
        assert!(!status.ready);
    }
}
