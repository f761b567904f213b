use std::sync::Arc;

use ai::clients::openai::Client as AIClient;
use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres, Transaction};
use standard_error::StandardError;

use crate::pkg::internal::classifier::{config::ClassifierConfig, Classifier};
use crate::{conf::settings, prelude::Result};

pub fn db_pool() -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[async_trait::async_trait]
pub trait GetTxn {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>>;
}

#[async_trait::async_trait]
impl GetTxn for PgPool {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub ai_client: Arc<AIClient>,
    pub classifier: Arc<Classifier>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        let ai = AIClient::from_url(&settings.ai_key, &settings.ai_endpoint)
            .map_err(|_| StandardError::new("ERR-AI-000"))?;
        Ok(AppState {
            db_pool: Arc::new(db_pool()?),
            ai_client: Arc::new(ai),
            classifier: Arc::new(Classifier::new(ClassifierConfig::default())?),
        })
    }
}
