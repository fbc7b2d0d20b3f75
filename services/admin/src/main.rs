use sea_orm::Database;
use tracing::info;

use fatura_admin::config::AdminConfig;
use fatura_admin::infra::identity::HttpIdentityProvider;
use fatura_admin::router::build_router;
use fatura_admin::state::AppState;

#[tokio::main]
async fn main() {
    fatura_core::tracing::init_tracing();

    let config = AdminConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let identity = HttpIdentityProvider::new(&config.identity_url, &config.service_role_key);

    let state = AppState { db, identity };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.admin_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("admin service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
