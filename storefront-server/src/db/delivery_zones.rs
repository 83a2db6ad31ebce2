//! Delivery zone database operations

use shared::models::{DeliveryZone, DeliveryZoneCreate, DeliveryZoneUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

pub async fn list_zones(pool: &PgPool, active_only: bool) -> Result<Vec<DeliveryZone>, BoxError> {
    let rows: Vec<DeliveryZone> = sqlx::query_as(
        r#"
        SELECT id, neighborhood_name, delivery_fee, is_active, created_at, updated_at
        FROM delivery_zones
        WHERE (NOT $1 OR is_active)
        ORDER BY neighborhood_name
        "#,
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_zone(pool: &PgPool, id: i64) -> Result<Option<DeliveryZone>, BoxError> {
    let row: Option<DeliveryZone> = sqlx::query_as(
        r#"
        SELECT id, neighborhood_name, delivery_fee, is_active, created_at, updated_at
        FROM delivery_zones WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Case-insensitive name lookup, optionally ignoring one zone
pub async fn name_taken(pool: &PgPool, name: &str, except_id: Option<i64>) -> Result<bool, BoxError> {
    let (taken,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM delivery_zones
            WHERE LOWER(neighborhood_name) = LOWER($1)
              AND ($2::bigint IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(name.trim())
    .bind(except_id)
    .fetch_one(pool)
    .await?;
    Ok(taken)
}

pub async fn create_zone(pool: &PgPool, data: &DeliveryZoneCreate) -> Result<DeliveryZone, BoxError> {
    let row: DeliveryZone = sqlx::query_as(
        r#"
        INSERT INTO delivery_zones (
            id, neighborhood_name, delivery_fee, is_active, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, neighborhood_name, delivery_fee, is_active, created_at, updated_at
        "#,
    )
    .bind(snowflake_id())
    .bind(data.neighborhood_name.trim())
    .bind(data.delivery_fee)
    .bind(data.is_active.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update_zone(
    pool: &PgPool,
    id: i64,
    data: &DeliveryZoneUpdate,
) -> Result<Option<DeliveryZone>, BoxError> {
    let row: Option<DeliveryZone> = sqlx::query_as(
        r#"
        UPDATE delivery_zones SET
            neighborhood_name = COALESCE($2, neighborhood_name),
            delivery_fee = COALESCE($3, delivery_fee),
            is_active = COALESCE($4, is_active),
            updated_at = $5
        WHERE id = $1
        RETURNING id, neighborhood_name, delivery_fee, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(data.neighborhood_name.as_deref().map(str::trim))
    .bind(data.delivery_fee)
    .bind(data.is_active)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete_zone(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM delivery_zones WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
