/// Admin service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AdminConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Base URL of the identity provider admin API (e.g. "http://identity:9999").
    pub identity_url: String,
    /// Elevated service-role credential for identity admin calls. Distinct
    /// from end-user session tokens; every write in this service requires it.
    pub service_role_key: String,
    /// TCP port to listen on (default 3114). Env var: `ADMIN_PORT`.
    pub admin_port: u16,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            identity_url: std::env::var("IDENTITY_URL").expect("IDENTITY_URL"),
            service_role_key: std::env::var("SERVICE_ROLE_KEY").expect("SERVICE_ROLE_KEY"),
            admin_port: std::env::var("ADMIN_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
        }
    }
}
