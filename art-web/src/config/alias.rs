//! runtime state

use std::sync::Arc;

use super::{AppConfig, AuthConfig};
use crate::repo::sea::sync_schema;
use crate::util::jwt::JwtConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub jwt: Arc<JwtConfig>,
    pub auth: Arc<AuthConfig>,
}

pub async fn init_shared_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let url = config.db_config.connect_url();
    let mut opt = ConnectOptions::new(url);
    if opt.get_url().starts_with("sqlite::memory:") {
        opt.max_connections(1);
    }
    opt.sqlx_logging(false);
    let conn = Database::connect(opt).await.map_err(|e| {
        tracing::error!("create db conn error: {:?}", e);
        e
    })?;
    tracing::debug!("db conn initialized");
    sync_schema(&conn).await?;
    tracing::debug!("app state initialized");
    Ok(AppState {
        conn,
        jwt: Arc::new(config.jwt_config.clone()),
        auth: Arc::new(config.auth.clone()),
    })
}
