//! Category database operations

use shared::models::{Category, CategoryUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, BoxError> {
    let rows: Vec<Category> = sqlx::query_as(
        "SELECT id, name, slug, icon, display_order, created_at FROM categories ORDER BY display_order, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_category(pool: &PgPool, id: i64) -> Result<Option<Category>, BoxError> {
    let row: Option<Category> = sqlx::query_as(
        "SELECT id, name, slug, icon, display_order, created_at FROM categories WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn category_exists(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Whether another category already uses `slug`
pub async fn slug_taken(pool: &PgPool, slug: &str, except_id: Option<i64>) -> Result<bool, BoxError> {
    let (taken,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE slug = $1 AND ($2::bigint IS NULL OR id <> $2))",
    )
    .bind(slug)
    .bind(except_id)
    .fetch_one(pool)
    .await?;
    Ok(taken)
}

pub async fn count_products(pool: &PgPool, category_id: i64) -> Result<i64, BoxError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products WHERE category_id = $1")
        .bind(category_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a category. Without an explicit order it is appended after the
/// last one.
pub async fn create_category(
    pool: &PgPool,
    name: &str,
    slug: &str,
    icon: Option<&str>,
    display_order: Option<i32>,
) -> Result<Category, BoxError> {
    let row: Category = sqlx::query_as(
        r#"
        INSERT INTO categories (id, name, slug, icon, display_order, created_at)
        VALUES (
            $1, $2, $3, $4,
            COALESCE($5, (SELECT COUNT(*)::integer + 1 FROM categories)),
            $6
        )
        RETURNING id, name, slug, icon, display_order, created_at
        "#,
    )
    .bind(snowflake_id())
    .bind(name)
    .bind(slug)
    .bind(icon)
    .bind(display_order)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update_category(
    pool: &PgPool,
    id: i64,
    data: &CategoryUpdate,
) -> Result<Option<Category>, BoxError> {
    let row: Option<Category> = sqlx::query_as(
        r#"
        UPDATE categories SET
            name = COALESCE($2, name),
            slug = COALESCE($3, slug),
            icon = COALESCE($4, icon),
            display_order = COALESCE($5, display_order)
        WHERE id = $1
        RETURNING id, name, slug, icon, display_order, created_at
        "#,
    )
    .bind(id)
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.slug.as_deref())
    .bind(data.icon.as_deref())
    .bind(data.display_order)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete_category(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
