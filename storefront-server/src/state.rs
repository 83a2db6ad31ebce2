//! Application state for storefront-server

use shared::CurrencyFormat;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::services::pricing::{PgPriceRepository, PricingService};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Display format of recalculated prices
    pub currency: CurrencyFormat,
}

impl AppState {
    /// Connect to PostgreSQL and apply pending migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self {
            pool,
            currency: config.currency.clone(),
        })
    }

    /// Pricing service over this state's pool
    pub fn pricing(&self) -> PricingService<PgPriceRepository> {
        PricingService::new(PgPriceRepository::new(self.pool.clone()), self.currency.clone())
    }
}
