//! Bootstrap CLI — provisions and verifies the first admin account.
//!
//! # Usage
//!
//! ```bash
//! # Create (or promote) the first admin
//! bootstrap create-admin --email admin@example.com --password 'Secret.123' --full-name "Admin User"
//!
//! # Flags fall back to ADMIN_EMAIL / ADMIN_PASSWORD / ADMIN_FULL_NAME
//! ADMIN_EMAIL=admin@example.com ADMIN_PASSWORD=Secret.123 bootstrap create-admin
//!
//! # Verify an existing admin can sign in
//! bootstrap verify --email admin@example.com
//!
//! # Report which expected relations exist
//! bootstrap check-tables
//! ```
//!
//! Requires `DATABASE_URL`, `IDENTITY_URL`, and `SERVICE_ROLE_KEY`.
//! Exits 0 on success, 1 on any failure.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sea_orm::{Database, DatabaseConnection};

use fatura_admin::domain::repository::ProgressSink;
use fatura_admin::domain::types::CompensationOutcome;
use fatura_admin::error::AdminServiceError;
use fatura_admin::infra::db::{
    DbPermissionRepository, DbProfileRepository, DbRelationProber, DbTenantRepository,
};
use fatura_admin::infra::identity::HttpIdentityProvider;
use fatura_admin::usecase::provision::{ProvisionAdminInput, ProvisionAdminUseCase};
use fatura_admin::usecase::tables::CheckTablesUseCase;
use fatura_admin::usecase::verify::VerifySetupUseCase;

#[derive(Parser)]
#[command(about = "Bootstrap and verify the first admin account")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the first admin user, or promote an existing one
    CreateAdmin {
        /// Admin email address (falls back to ADMIN_EMAIL)
        #[arg(long)]
        email: Option<String>,

        /// Admin password, minimum 8 characters (falls back to ADMIN_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Display name (falls back to ADMIN_FULL_NAME, then "Admin User")
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Check that an admin account is set up and can sign in
    Verify {
        /// Email to verify (falls back to ADMIN_EMAIL)
        #[arg(long)]
        email: Option<String>,
    },

    /// Report which expected database relations exist
    CheckTables,
}

/// Backend endpoints and the elevated credential, resolved before any
/// backend call so a misconfigured run fails without side effects.
struct BootstrapEnv {
    database_url: String,
    identity_url: String,
    service_role_key: String,
}

fn load_env() -> Result<BootstrapEnv> {
    let Ok(service_role_key) = std::env::var("SERVICE_ROLE_KEY") else {
        bail!(
            "SERVICE_ROLE_KEY environment variable is required\n\n\
             Setup:\n\
             1. Open your identity provider's settings and copy the service \
             role key (NOT the anon key)\n\
             2. export SERVICE_ROLE_KEY=\"your-service-role-key\"\n\
             3. Run this command again"
        );
    };
    Ok(BootstrapEnv {
        database_url: std::env::var("DATABASE_URL").context("DATABASE_URL is required")?,
        identity_url: std::env::var("IDENTITY_URL").context("IDENTITY_URL is required")?,
        service_role_key,
    })
}

fn arg_or_env(flag: Option<String>, var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(var).ok())
}

/// Progress sink printing each saga step to stdout.
struct StdoutProgress;

impl ProgressSink for StdoutProgress {
    fn notify(&self, message: &str) {
        println!("  {message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = load_env()?;

    let db = Database::connect(&env.database_url)
        .await
        .context("failed to connect to database")?;
    let identity = HttpIdentityProvider::new(&env.identity_url, &env.service_role_key);

    match args.command {
        Command::CreateAdmin {
            email,
            password,
            full_name,
        } => create_admin(&db, identity, email, password, full_name).await,
        Command::Verify { email } => verify(&db, identity, email).await,
        Command::CheckTables => check_tables(&db).await,
    }
}

async fn create_admin(
    db: &DatabaseConnection,
    identity: HttpIdentityProvider,
    email: Option<String>,
    password: Option<String>,
    full_name: Option<String>,
) -> Result<()> {
    let Some(email) = arg_or_env(email, "ADMIN_EMAIL") else {
        bail!("email is required (--email or ADMIN_EMAIL)");
    };
    let Some(password) = arg_or_env(password, "ADMIN_PASSWORD") else {
        bail!("password is required (--password or ADMIN_PASSWORD)");
    };
    let full_name =
        arg_or_env(full_name, "ADMIN_FULL_NAME").unwrap_or_else(|| "Admin User".to_owned());

    println!("Creating first admin user...");
    let usecase = ProvisionAdminUseCase {
        tenants: DbTenantRepository { db: db.clone() },
        identities: identity,
        profiles: DbProfileRepository { db: db.clone() },
        permissions: DbPermissionRepository { db: db.clone() },
        progress: StdoutProgress,
    };

    match usecase
        .execute(ProvisionAdminInput {
            email: email.clone(),
            password,
            full_name: full_name.clone(),
        })
        .await
    {
        Ok(output) => {
            println!();
            println!("SUCCESS ({:?})", output.outcome);
            println!("  Email:     {email}");
            println!("  Full name: {full_name}");
            println!("  Role:      admin");
            println!("  Status:    active");
            println!("  User id:   {}", output.user_id);
            println!();
            println!("Sign in with this email and the password you just set.");
            Ok(())
        }
        Err(AdminServiceError::ProfileWriteFailed {
            source,
            compensation,
        }) => {
            eprintln!("error: profile write failed: {source:#}");
            match compensation {
                CompensationOutcome::IdentityDeleted => {
                    eprintln!("cleaned up the auth identity created during this run");
                }
                CompensationOutcome::DeleteFailed(reason) => {
                    eprintln!("warning: could not clean up the auth identity: {reason}");
                }
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

async fn verify(
    db: &DatabaseConnection,
    identity: HttpIdentityProvider,
    email: Option<String>,
) -> Result<()> {
    let Some(email) = arg_or_env(email, "ADMIN_EMAIL") else {
        bail!("email is required (--email or ADMIN_EMAIL)");
    };

    println!("Verifying admin setup for {email}...");
    let usecase = VerifySetupUseCase {
        profiles: DbProfileRepository { db: db.clone() },
        tenants: DbTenantRepository { db: db.clone() },
        permissions: DbPermissionRepository { db: db.clone() },
        identities: identity,
    };

    let report = match usecase.execute(&email).await {
        Ok(report) => report,
        Err(AdminServiceError::ProfileNotFound) => {
            eprintln!("no profile found for {email}");
            eprintln!("run: bootstrap create-admin --email {email}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    println!("  profile:   found ({})", report.user_id);
    println!(
        "  status:    {} {}",
        report.status.as_str(),
        if report.status_active { "[ok]" } else { "[expected active]" }
    );
    println!(
        "  role:      {} {}",
        report.role.as_str(),
        if report.role_admin { "[ok]" } else { "[expected admin]" }
    );
    match &report.company {
        Some(company) => println!("  company:   {}", company.name),
        None => println!("  company:   none assigned"),
    }
    if report.permissions.is_empty() {
        println!("  permissions: none (admin role grants all)");
    } else {
        println!("  permissions: {}", report.permissions.len());
        for grant in &report.permissions {
            let mark = if grant.granted { "granted" } else { "revoked" };
            println!("    - {} ({mark})", grant.permission_name);
        }
    }
    match &report.identity {
        Some(check) => {
            println!(
                "  identity:  found (confirmed: {}, last sign-in: {})",
                check.email_confirmed,
                check
                    .last_sign_in_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "never".to_owned()),
            );
        }
        None => println!("  identity:  NOT FOUND"),
    }

    println!();
    if report.ready {
        println!("VERIFICATION SUCCESSFUL — {email} can sign in");
        Ok(())
    } else {
        eprintln!("verification failed — see checks above");
        std::process::exit(1);
    }
}

async fn check_tables(db: &DatabaseConnection) -> Result<()> {
    let usecase = CheckTablesUseCase {
        prober: DbRelationProber { db: db.clone() },
    };
    let report = usecase.execute().await;

    for table in &report.tables {
        match (table.exists, &table.error) {
            (true, None) => println!("  ok      {}", table.relation),
            (true, Some(error)) => println!("  ok?     {} ({error})", table.relation),
            (false, _) => println!("  MISSING {}", table.relation),
        }
    }
    println!();
    println!(
        "{}/{} relations present",
        report.total_exists, report.total_checked
    );

    if report.all_exist {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
