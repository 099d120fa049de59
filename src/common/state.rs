use crate::common::context::Context;
use crate::common::redis_pool::{PoolResult, RedisPool};
use crate::common::storage::PublicStorage;
use async_trait::async_trait;
use sqlx::{MySql, Pool};

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<MySql>,
    pub redis: RedisPool,
    pub storage: PublicStorage,
}

#[async_trait]
impl Context for AppState {
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
