//! Product attribute (specification) database operations

use rust_decimal::Decimal;
use shared::models::{ProductAttribute, ProductAttributeCreate};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

pub async fn list_attributes(
    pool: &PgPool,
    product_id: Option<i64>,
) -> Result<Vec<ProductAttribute>, BoxError> {
    let rows: Vec<ProductAttribute> = sqlx::query_as(
        r#"
        SELECT id, product_id, attribute_name, attribute_value, price_modifier,
               is_active, created_at
        FROM product_attributes
        WHERE ($1::bigint IS NULL OR product_id = $1)
        ORDER BY product_id, created_at, id
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create_attribute(
    pool: &PgPool,
    data: &ProductAttributeCreate,
) -> Result<ProductAttribute, BoxError> {
    let row: ProductAttribute = sqlx::query_as(
        r#"
        INSERT INTO product_attributes (
            id, product_id, attribute_name, attribute_value, price_modifier,
            is_active, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, product_id, attribute_name, attribute_value, price_modifier,
                  is_active, created_at
        "#,
    )
    .bind(snowflake_id())
    .bind(data.product_id)
    .bind(data.attribute_name.trim())
    .bind(data.attribute_value.trim())
    .bind(data.price_modifier.unwrap_or(Decimal::ZERO))
    .bind(data.is_active.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete_attribute(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM product_attributes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove every attribute of a product; returns the number removed
pub async fn delete_product_attributes(pool: &PgPool, product_id: i64) -> Result<u64, BoxError> {
    let result = sqlx::query("DELETE FROM product_attributes WHERE product_id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
