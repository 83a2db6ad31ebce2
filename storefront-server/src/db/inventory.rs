//! Inventory database operations

use shared::models::{InventoryCreate, InventoryItem, InventoryUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

const INVENTORY_SELECT: &str = r#"
    SELECT i.id, i.product_id, p.name AS product_name, i.current_stock, i.min_stock,
           i.cost_per_unit, i.supplier, i.last_restocked, i.is_active, i.notes,
           i.created_at, i.updated_at
    FROM inventory i
    JOIN products p ON p.id = i.product_id
"#;

pub async fn list_inventory(pool: &PgPool) -> Result<Vec<InventoryItem>, BoxError> {
    let sql = format!("{INVENTORY_SELECT} ORDER BY p.name, i.id");
    let rows = sqlx::query_as::<_, InventoryItem>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn get_item(pool: &PgPool, id: i64) -> Result<Option<InventoryItem>, BoxError> {
    let sql = format!("{INVENTORY_SELECT} WHERE i.id = $1");
    let row = sqlx::query_as::<_, InventoryItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create_item(pool: &PgPool, data: &InventoryCreate) -> Result<InventoryItem, BoxError> {
    let now = now_millis();
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO inventory (
            id, product_id, current_stock, min_stock, cost_per_unit, supplier,
            last_restocked, is_active, notes, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $7, $7)
        RETURNING id
        "#,
    )
    .bind(snowflake_id())
    .bind(data.product_id)
    .bind(data.current_stock)
    .bind(data.min_stock.unwrap_or(0))
    .bind(data.cost_per_unit)
    .bind(&data.supplier)
    .bind(now)
    .bind(&data.notes)
    .fetch_one(pool)
    .await?;

    get_item(pool, id)
        .await?
        .ok_or_else(|| "inventory item vanished after insert".into())
}

/// Partial update; a stock increase stamps `last_restocked`.
pub async fn update_item(
    pool: &PgPool,
    id: i64,
    data: &InventoryUpdate,
) -> Result<Option<InventoryItem>, BoxError> {
    let now = now_millis();
    let updated: Option<(i64,)> = sqlx::query_as(
        r#"
        UPDATE inventory SET
            last_restocked = CASE
                WHEN $2::integer IS NOT NULL AND $2 > current_stock THEN $8
                ELSE last_restocked
            END,
            current_stock = COALESCE($2, current_stock),
            min_stock = COALESCE($3, min_stock),
            cost_per_unit = COALESCE($4, cost_per_unit),
            supplier = COALESCE($5, supplier),
            is_active = COALESCE($6, is_active),
            notes = COALESCE($7, notes),
            updated_at = $8
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(id)
    .bind(data.current_stock)
    .bind(data.min_stock)
    .bind(data.cost_per_unit)
    .bind(&data.supplier)
    .bind(data.is_active)
    .bind(&data.notes)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    match updated {
        Some(_) => get_item(pool, id).await,
        None => Ok(None),
    }
}
