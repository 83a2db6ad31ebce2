//! Product image database operations
//!
//! The `products.image_url` column mirrors the main gallery image and is kept
//! in sync inside the same transaction.

use shared::models::{ProductImage, ProductImageCreate};
use shared::util::{now_millis, snowflake_id};
use sqlx::{PgPool, Postgres, Transaction};

use super::BoxError;

pub async fn list_images(pool: &PgPool, product_id: i64) -> Result<Vec<ProductImage>, BoxError> {
    let rows: Vec<ProductImage> = sqlx::query_as(
        r#"
        SELECT id, product_id, image_url, display_order, is_main, alt_text, created_at
        FROM product_images
        WHERE product_id = $1
        ORDER BY display_order, id
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn url_exists(pool: &PgPool, product_id: i64, image_url: &str) -> Result<bool, BoxError> {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM product_images WHERE product_id = $1 AND image_url = $2)",
    )
    .bind(product_id)
    .bind(image_url)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Append an image.
///
/// Defaults: `display_order` = current count, `is_main` = gallery was empty.
/// A new main image clears the flag on every other image.
pub async fn create_image(
    pool: &PgPool,
    product_id: i64,
    data: &ProductImageCreate,
) -> Result<ProductImage, BoxError> {
    let mut tx = pool.begin().await?;

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM product_images WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&mut *tx)
            .await?;

    let display_order = data.display_order.unwrap_or(count as i32);
    let is_main = data.is_main.unwrap_or(count == 0);
    let image_url = data.image_url.trim();

    if is_main {
        sqlx::query("UPDATE product_images SET is_main = FALSE WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
    }

    let image: ProductImage = sqlx::query_as(
        r#"
        INSERT INTO product_images (
            id, product_id, image_url, display_order, is_main, alt_text, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, product_id, image_url, display_order, is_main, alt_text, created_at
        "#,
    )
    .bind(snowflake_id())
    .bind(product_id)
    .bind(image_url)
    .bind(display_order)
    .bind(is_main)
    .bind(&data.alt_text)
    .bind(now_millis())
    .fetch_one(&mut *tx)
    .await?;

    if is_main {
        sync_product_image_url(&mut tx, product_id).await?;
    }

    tx.commit().await?;
    Ok(image)
}

/// Delete one image. If it was the main image, the new first image is
/// promoted. Remaining images are renumbered 0..n-1.
pub async fn delete_image(pool: &PgPool, product_id: i64, image_id: i64) -> Result<bool, BoxError> {
    let mut tx = pool.begin().await?;

    let removed: Option<(bool,)> = sqlx::query_as(
        "DELETE FROM product_images WHERE id = $1 AND product_id = $2 RETURNING is_main",
    )
    .bind(image_id)
    .bind(product_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((was_main,)) = removed else {
        tx.commit().await?;
        return Ok(false);
    };

    renumber(&mut tx, product_id).await?;

    if was_main {
        sqlx::query(
            r#"
            UPDATE product_images SET is_main = TRUE
            WHERE id = (
                SELECT id FROM product_images
                WHERE product_id = $1
                ORDER BY display_order, id
                LIMIT 1
            )
            "#,
        )
        .bind(product_id)
        .execute(&mut *tx)
        .await?;
        sync_product_image_url(&mut tx, product_id).await?;
    }

    tx.commit().await?;
    Ok(true)
}

/// Delete the whole gallery of a product; returns the number of rows removed
pub async fn delete_all_images(pool: &PgPool, product_id: i64) -> Result<u64, BoxError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM product_images WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut *tx)
        .await?;
    sync_product_image_url(&mut tx, product_id).await?;
    tx.commit().await?;
    Ok(result.rows_affected())
}

/// Make `image_id` the only main image of the product.
pub async fn set_main_image(pool: &PgPool, product_id: i64, image_id: i64) -> Result<bool, BoxError> {
    let mut tx = pool.begin().await?;

    let exists: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM product_images WHERE id = $1 AND product_id = $2 FOR UPDATE")
            .bind(image_id)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_none() {
        tx.commit().await?;
        return Ok(false);
    }

    sqlx::query("UPDATE product_images SET is_main = (id = $2) WHERE product_id = $1")
        .bind(product_id)
        .bind(image_id)
        .execute(&mut *tx)
        .await?;
    sync_product_image_url(&mut tx, product_id).await?;

    tx.commit().await?;
    Ok(true)
}

async fn renumber(tx: &mut Transaction<'_, Postgres>, product_id: i64) -> Result<(), BoxError> {
    sqlx::query(
        r#"
        UPDATE product_images pi SET display_order = r.pos
        FROM (
            SELECT id, (ROW_NUMBER() OVER (ORDER BY display_order, id) - 1)::integer AS pos
            FROM product_images
            WHERE product_id = $1
        ) r
        WHERE pi.id = r.id
        "#,
    )
    .bind(product_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Copy the main image URL (or NULL) onto the product row
async fn sync_product_image_url(
    tx: &mut Transaction<'_, Postgres>,
    product_id: i64,
) -> Result<(), BoxError> {
    sqlx::query(
        r#"
        UPDATE products SET image_url = (
            SELECT image_url FROM product_images
            WHERE product_id = $1 AND is_main
            LIMIT 1
        ), updated_at = $2
        WHERE id = $1
        "#,
    )
    .bind(product_id)
    .bind(now_millis())
    .execute(&mut **tx)
    .await?;
    Ok(())
}
