//! Banner database operations

use shared::models::{Banner, BannerCreate, BannerUpdate, DEFAULT_GRADIENT};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

const BANNER_COLUMNS: &str = "id, name, title, description, price, image_url, \
     gradient_color1, gradient_color2, gradient_color3, gradient_color4, \
     use_background_image, is_customizable, html_content, is_active, created_at, updated_at";

pub async fn list_banners(pool: &PgPool) -> Result<Vec<Banner>, BoxError> {
    let sql = format!("SELECT {BANNER_COLUMNS} FROM banners ORDER BY created_at DESC, id");
    let rows = sqlx::query_as::<_, Banner>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn get_banner(pool: &PgPool, id: i64) -> Result<Option<Banner>, BoxError> {
    let sql = format!("SELECT {BANNER_COLUMNS} FROM banners WHERE id = $1");
    let row = sqlx::query_as::<_, Banner>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn get_active_banner(pool: &PgPool) -> Result<Option<Banner>, BoxError> {
    let sql = format!(
        "SELECT {BANNER_COLUMNS} FROM banners WHERE is_active ORDER BY updated_at DESC LIMIT 1"
    );
    let row = sqlx::query_as::<_, Banner>(&sql).fetch_optional(pool).await?;
    Ok(row)
}

/// Insert a banner; creating it active deactivates every other banner.
pub async fn create_banner(pool: &PgPool, data: &BannerCreate) -> Result<Banner, BoxError> {
    let now = now_millis();
    let is_active = data.is_active.unwrap_or(false);
    let mut tx = pool.begin().await?;

    if is_active {
        sqlx::query("UPDATE banners SET is_active = FALSE, updated_at = $1 WHERE is_active")
            .bind(now)
            .execute(&mut *tx)
            .await?;
    }

    let sql = format!(
        r#"
        INSERT INTO banners (
            id, name, title, description, price, image_url,
            gradient_color1, gradient_color2, gradient_color3, gradient_color4,
            use_background_image, is_customizable, html_content, is_active,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
        RETURNING {BANNER_COLUMNS}
        "#
    );
    let gradient = |value: &Option<String>, idx: usize| {
        value
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GRADIENT[idx].to_string())
    };
    let banner = sqlx::query_as::<_, Banner>(&sql)
        .bind(snowflake_id())
        .bind(data.name.trim())
        .bind(data.title.trim())
        .bind(&data.description)
        .bind(data.price)
        .bind(&data.image_url)
        .bind(gradient(&data.gradient_color1, 0))
        .bind(gradient(&data.gradient_color2, 1))
        .bind(gradient(&data.gradient_color3, 2))
        .bind(gradient(&data.gradient_color4, 3))
        .bind(data.use_background_image.unwrap_or(false))
        .bind(data.is_customizable.unwrap_or(false))
        .bind(&data.html_content)
        .bind(is_active)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(banner)
}

pub async fn update_banner(
    pool: &PgPool,
    id: i64,
    data: &BannerUpdate,
) -> Result<Option<Banner>, BoxError> {
    let sql = format!(
        r#"
        UPDATE banners SET
            name = COALESCE($2, name),
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            price = COALESCE($5, price),
            image_url = COALESCE($6, image_url),
            gradient_color1 = COALESCE($7, gradient_color1),
            gradient_color2 = COALESCE($8, gradient_color2),
            gradient_color3 = COALESCE($9, gradient_color3),
            gradient_color4 = COALESCE($10, gradient_color4),
            use_background_image = COALESCE($11, use_background_image),
            is_customizable = COALESCE($12, is_customizable),
            html_content = COALESCE($13, html_content),
            updated_at = $14
        WHERE id = $1
        RETURNING {BANNER_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, Banner>(&sql)
        .bind(id)
        .bind(data.name.as_deref().map(str::trim))
        .bind(data.title.as_deref().map(str::trim))
        .bind(&data.description)
        .bind(data.price)
        .bind(&data.image_url)
        .bind(&data.gradient_color1)
        .bind(&data.gradient_color2)
        .bind(&data.gradient_color3)
        .bind(&data.gradient_color4)
        .bind(data.use_background_image)
        .bind(data.is_customizable)
        .bind(&data.html_content)
        .bind(now_millis())
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Make `id` the only active banner.
pub async fn activate_banner(pool: &PgPool, id: i64) -> Result<Option<Banner>, BoxError> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE banners SET is_active = FALSE, updated_at = $2 WHERE is_active AND id <> $1")
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    let sql = format!(
        "UPDATE banners SET is_active = TRUE, updated_at = $2 WHERE id = $1 RETURNING {BANNER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, Banner>(&sql)
        .bind(id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

    if row.is_none() {
        // Unknown banner: leave the current active banner untouched
        tx.rollback().await?;
        return Ok(None);
    }

    tx.commit().await?;
    Ok(row)
}

pub async fn delete_banner(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM banners WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
