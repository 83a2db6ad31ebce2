//! Product database operations

use rust_decimal::Decimal;
use shared::models::{Product, ProductCreate, ProductQuery, ProductUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.base_price, \
     p.original_price, p.category_id, p.image_url, p.is_available, p.is_featured, \
     p.is_promotion, p.created_at, p.updated_at";

// ── Read ──

/// Storefront listing: available products only unless `admin` is set,
/// ordered by category then name.
pub async fn list_products(pool: &PgPool, query: &ProductQuery) -> Result<Vec<Product>, BoxError> {
    let sql = format!(
        r#"
        SELECT {PRODUCT_COLUMNS}
        FROM products p
        JOIN categories c ON c.id = p.category_id
        WHERE ($1 OR p.is_available)
          AND ($2::bigint IS NULL OR p.category_id = $2)
          AND ($3::boolean IS NULL OR p.is_featured = $3)
        ORDER BY c.display_order, p.name, p.id
        "#
    );
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(query.admin)
        .bind(query.category_id)
        .bind(query.featured)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get_product(pool: &PgPool, id: i64) -> Result<Option<Product>, BoxError> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Products by id (checkout); missing ids are simply absent from the result
pub async fn get_products(pool: &PgPool, ids: &[i64]) -> Result<Vec<Product>, BoxError> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ANY($1)");
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_product_ids(pool: &PgPool) -> Result<Vec<i64>, BoxError> {
    let ids: Vec<(i64,)> = sqlx::query_as("SELECT id FROM products ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(ids.into_iter().map(|(id,)| id).collect())
}

// ── Write ──

/// Insert a product; the submitted price is both the displayed and the base
/// price.
pub async fn create_product(pool: &PgPool, data: &ProductCreate) -> Result<Product, BoxError> {
    let now = now_millis();
    let sql = format!(
        r#"
        INSERT INTO products AS p (
            id, name, description, price, base_price, original_price,
            category_id, image_url, is_available, is_featured, is_promotion,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $4, $5, $6, $7, $8, $9, $10, $11, $11)
        RETURNING {PRODUCT_COLUMNS}
        "#
    );
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(snowflake_id())
        .bind(data.name.trim())
        .bind(data.description.trim())
        .bind(data.price)
        .bind(data.original_price)
        .bind(data.category_id)
        .bind(data.image_url.as_deref().filter(|u| !u.trim().is_empty()))
        .bind(data.is_available.unwrap_or(true))
        .bind(data.is_featured.unwrap_or(false))
        .bind(data.is_promotion.unwrap_or(false))
        .bind(now)
        .fetch_one(pool)
        .await?;
    Ok(product)
}

/// Partial update. A new price replaces both the displayed and the base price;
/// `original_price: Some(None)` clears the original price.
pub async fn update_product(
    pool: &PgPool,
    id: i64,
    data: &ProductUpdate,
) -> Result<Option<Product>, BoxError> {
    let sql = format!(
        r#"
        UPDATE products AS p SET
            name = COALESCE($2, p.name),
            description = COALESCE($3, p.description),
            price = COALESCE($4, p.price),
            base_price = COALESCE($4, p.base_price),
            original_price = CASE WHEN $12 THEN $5 ELSE p.original_price END,
            category_id = COALESCE($6, p.category_id),
            image_url = COALESCE($7, p.image_url),
            is_available = COALESCE($8, p.is_available),
            is_featured = COALESCE($9, p.is_featured),
            is_promotion = COALESCE($10, p.is_promotion),
            updated_at = $11
        WHERE p.id = $1
        RETURNING {PRODUCT_COLUMNS}
        "#
    );
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .bind(data.name.as_deref().map(str::trim))
        .bind(data.description.as_deref().map(str::trim))
        .bind(data.price)
        .bind(data.original_price.flatten())
        .bind(data.category_id)
        .bind(&data.image_url)
        .bind(data.is_available)
        .bind(data.is_featured)
        .bind(data.is_promotion)
        .bind(now_millis())
        .bind(data.original_price.is_some())
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

/// Persist a recalculated displayed price
pub async fn set_price(pool: &PgPool, id: i64, price: Decimal) -> Result<bool, BoxError> {
    let result = sqlx::query("UPDATE products SET price = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(price)
        .bind(now_millis())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a product; images, attributes and inventory cascade.
pub async fn delete_product(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
