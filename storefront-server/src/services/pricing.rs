//! Price recalculation
//!
//! The displayed price of a product is its base price plus the price
//! modifiers of its active attributes. Recalculation writes the result back
//! to `products.price`; `base_price` is never touched, so running it twice
//! yields the same price.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{BulkRecalculateResult, ProductAttribute, RecalculatedPrice};
use shared::pricing::compute_total_price;
use shared::CurrencyFormat;
use sqlx::PgPool;

use crate::db::{self, BoxError};
use crate::error::{ServiceError, ServiceResult};

/// Storage seam of the pricing service
#[async_trait]
pub trait PriceRepository: Send + Sync {
    /// Base price of a product, `None` when the product does not exist
    async fn base_price(&self, product_id: i64) -> Result<Option<Decimal>, BoxError>;
    async fn attributes(&self, product_id: i64) -> Result<Vec<ProductAttribute>, BoxError>;
    /// Persist the displayed price; `false` when the product vanished
    async fn set_price(&self, product_id: i64, price: Decimal) -> Result<bool, BoxError>;
    async fn product_ids(&self) -> Result<Vec<i64>, BoxError>;
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgPriceRepository {
    pool: PgPool,
}

impl PgPriceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceRepository for PgPriceRepository {
    async fn base_price(&self, product_id: i64) -> Result<Option<Decimal>, BoxError> {
        let product = db::products::get_product(&self.pool, product_id).await?;
        Ok(product.map(|p| p.base_price))
    }

    async fn attributes(&self, product_id: i64) -> Result<Vec<ProductAttribute>, BoxError> {
        db::product_attributes::list_attributes(&self.pool, Some(product_id)).await
    }

    async fn set_price(&self, product_id: i64, price: Decimal) -> Result<bool, BoxError> {
        db::products::set_price(&self.pool, product_id, price).await
    }

    async fn product_ids(&self) -> Result<Vec<i64>, BoxError> {
        db::products::list_product_ids(&self.pool).await
    }
}

pub struct PricingService<R> {
    repo: R,
    currency: CurrencyFormat,
}

impl<R: PriceRepository> PricingService<R> {
    pub fn new(repo: R, currency: CurrencyFormat) -> Self {
        Self { repo, currency }
    }

    /// Recompute and persist the displayed price of one product.
    pub async fn recalculate(&self, product_id: i64) -> ServiceResult<RecalculatedPrice> {
        let base_price = self
            .repo
            .base_price(product_id)
            .await?
            .ok_or_else(|| product_not_found(product_id))?;
        let attributes = self.repo.attributes(product_id).await?;

        let total_price = compute_total_price(base_price, &attributes);
        if !self.repo.set_price(product_id, total_price).await? {
            return Err(product_not_found(product_id).into());
        }

        tracing::info!(product_id, %total_price, "Product price recalculated");
        Ok(RecalculatedPrice {
            product_id,
            total_price,
            formatted_price: self.currency.format(total_price),
        })
    }

    /// Recalculate every product. Individual failures are recorded, the
    /// batch always runs to the end.
    pub async fn recalculate_all(&self) -> ServiceResult<BulkRecalculateResult> {
        let ids = self.repo.product_ids().await?;
        let mut result = BulkRecalculateResult::default();

        for product_id in ids {
            match self.recalculate(product_id).await {
                Ok(_) => result.record_success(),
                Err(e) => {
                    let message = match &e {
                        ServiceError::App(app) => app.message.clone(),
                        ServiceError::Db(db) => db.to_string(),
                    };
                    tracing::warn!(product_id, error = %message, "Price recalculation failed");
                    result.record_failure(product_id, message);
                }
            }
        }

        tracing::info!(
            successful = result.successful,
            failed = result.failed,
            "Bulk price recalculation finished"
        );
        Ok(result)
    }
}

fn product_not_found(product_id: i64) -> AppError {
    AppError::new(ErrorCode::ProductNotFound).with_detail("productId", product_id)
}
