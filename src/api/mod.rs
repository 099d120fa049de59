use crate::common::context::Context;
use crate::common::init;
use crate::common::redis_pool::{PoolResult, RedisPool};
use crate::common::state::AppState;
use crate::common::storage::PublicStorage;
use crate::settings::AppSettings;
use async_trait::async_trait;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::{MySql, Pool};
use std::convert::Infallible;
use std::net::SocketAddr;
use tracing::info;

pub mod v1;

pub struct RequestContext {
    pub db: Pool<MySql>,
    pub redis: RedisPool,
    pub storage: PublicStorage,
}

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/v1", v1::router())
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    let app = router().with_state(state);
    let addr = SocketAddr::new(settings.app_host, settings.app_port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            db: state.db.clone(),
            redis: state.redis.clone(),
            storage: state.storage.clone(),
        })
    }
}

#[async_trait]
impl Context for RequestContext {
    fn db(&self) -> &Pool<MySql> {
        &self.db
    }

    fn storage(&self) -> &PublicStorage {
        &self.storage
    }

    async fn redis(&self) -> PoolResult {
        self.redis.get().await
    }
}
