//! Server state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtService;
use crate::core::Config;

/// Shared per-request state: configuration, the connection pool and the
/// token validator. `Clone` is shallow; all shared mutable state lives in
/// the store, never in-process.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Postgres connection pool
    pub db: PgPool,
    /// JWT validation service
    jwt: Arc<JwtService>,
}

impl ServerState {
    /// Connect the pool, apply migrations and build the state.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = crate::db::connect(&config.database_url, config.db_max_connections).await?;
        tracing::info!("database connected, schema up to date");

        Ok(Self {
            config: config.clone(),
            db,
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
        })
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
