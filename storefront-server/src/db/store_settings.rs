//! Store settings database operations (singleton row `id = 1`)

use shared::models::{StoreSettings, StoreSettingsUpdate};
use shared::util::now_millis;
use sqlx::PgPool;

use super::BoxError;

pub async fn get_settings(pool: &PgPool) -> Result<StoreSettings, BoxError> {
    let row: StoreSettings = sqlx::query_as(
        r#"
        SELECT site_name, store_title, store_image_url, store_address, store_neighborhood,
               store_hours, delivery_time, delivery_fee_range, payment_methods,
               banner_image_url, updated_at
        FROM store_settings WHERE id = 1
        "#,
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Partial update; absent fields keep their current value
pub async fn update_settings(
    pool: &PgPool,
    data: &StoreSettingsUpdate,
) -> Result<StoreSettings, BoxError> {
    let row: StoreSettings = sqlx::query_as(
        r#"
        UPDATE store_settings SET
            site_name = COALESCE($1, site_name),
            store_title = COALESCE($2, store_title),
            store_image_url = COALESCE($3, store_image_url),
            store_address = COALESCE($4, store_address),
            store_neighborhood = COALESCE($5, store_neighborhood),
            store_hours = COALESCE($6, store_hours),
            delivery_time = COALESCE($7, delivery_time),
            delivery_fee_range = COALESCE($8, delivery_fee_range),
            payment_methods = COALESCE($9, payment_methods),
            banner_image_url = COALESCE($10, banner_image_url),
            updated_at = $11
        WHERE id = 1
        RETURNING site_name, store_title, store_image_url, store_address, store_neighborhood,
                  store_hours, delivery_time, delivery_fee_range, payment_methods,
                  banner_image_url, updated_at
        "#,
    )
    .bind(&data.site_name)
    .bind(&data.store_title)
    .bind(&data.store_image_url)
    .bind(&data.store_address)
    .bind(&data.store_neighborhood)
    .bind(&data.store_hours)
    .bind(&data.delivery_time)
    .bind(&data.delivery_fee_range)
    .bind(&data.payment_methods)
    .bind(&data.banner_image_url)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}
