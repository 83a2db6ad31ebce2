//! Order database operations
//!
//! Status columns are TEXT holding the wire values of `OrderStatus` and
//! `PaymentStatus`; rows are converted on read.

use rust_decimal::Decimal;
use shared::models::{Order, OrderItem, OrderStatus, OrderSummary, PaymentStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;
use std::collections::HashMap;

use super::BoxError;

const ORDER_COLUMNS: &str = "id, order_number, customer_name, customer_phone, customer_address, \
     delivery_zone_id, neighborhood, payment_method, notes, subtotal, delivery_fee, total, \
     order_status, payment_status, created_at, updated_at";

#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_number: i64,
    customer_name: String,
    customer_phone: String,
    customer_address: String,
    delivery_zone_id: Option<i64>,
    neighborhood: Option<String>,
    payment_method: String,
    notes: Option<String>,
    subtotal: Decimal,
    delivery_fee: Decimal,
    total: Decimal,
    order_status: String,
    payment_status: String,
    created_at: i64,
    updated_at: i64,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, BoxError> {
        Ok(Order {
            order_status: self.order_status.parse::<OrderStatus>()?,
            payment_status: self.payment_status.parse::<PaymentStatus>()?,
            id: self.id,
            order_number: self.order_number,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            delivery_zone_id: self.delivery_zone_id,
            neighborhood: self.neighborhood,
            payment_method: self.payment_method,
            notes: self.notes,
            subtotal: self.subtotal,
            delivery_fee: self.delivery_fee,
            total: self.total,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
        })
    }
}

/// Order ready to insert; prices already resolved from the catalog
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub delivery_zone_id: Option<i64>,
    pub neighborhood: Option<String>,
    pub payment_method: String,
    pub notes: Option<String>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub lines: Vec<NewOrderLine>,
}

#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

// ── Read ──

pub async fn list_orders(
    pool: &PgPool,
    status: Option<OrderStatus>,
) -> Result<Vec<Order>, BoxError> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE ($1::text IS NULL OR order_status = $1) ORDER BY created_at DESC, id DESC"
    );
    let rows = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let items: Vec<OrderItem> = sqlx::query_as(
        r#"
        SELECT id, order_id, product_id, product_name, unit_price, quantity, line_total
        FROM order_items
        WHERE order_id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut item_map: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        item_map.entry(item.order_id).or_default().push(item);
    }

    rows.into_iter()
        .map(|r| {
            let items = item_map.remove(&r.id).unwrap_or_default();
            r.into_order(items)
        })
        .collect()
}

pub async fn get_order(pool: &PgPool, id: i64) -> Result<Option<Order>, BoxError> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
    let Some(row) = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    let items: Vec<OrderItem> = sqlx::query_as(
        r#"
        SELECT id, order_id, product_id, product_name, unit_price, quantity, line_total
        FROM order_items WHERE order_id = $1 ORDER BY id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    row.into_order(items).map(Some)
}

/// Dashboard counters; "today" starts at `since` (ms)
pub async fn summary(pool: &PgPool, since: i64) -> Result<OrderSummary, BoxError> {
    let (today_orders, preparing, today_revenue): (i64, i64, Decimal) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE created_at >= $1),
            COUNT(*) FILTER (WHERE order_status = $2),
            COALESCE(SUM(total) FILTER (WHERE created_at >= $1 AND payment_status = $3), 0)
        FROM orders
        "#,
    )
    .bind(since)
    .bind(OrderStatus::Preparando.as_str())
    .bind(PaymentStatus::Paid.as_str())
    .fetch_one(pool)
    .await?;

    Ok(OrderSummary {
        today_orders,
        preparing,
        today_revenue,
    })
}

// ── Write ──

pub async fn create_order(pool: &PgPool, data: NewOrder) -> Result<Order, BoxError> {
    let now = now_millis();
    let order_id = snowflake_id();
    let mut tx = pool.begin().await?;

    let sql = format!(
        r#"
        INSERT INTO orders (
            id, customer_name, customer_phone, customer_address, delivery_zone_id,
            neighborhood, payment_method, notes, subtotal, delivery_fee, total,
            order_status, payment_status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
        RETURNING {ORDER_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(order_id)
        .bind(&data.customer_name)
        .bind(&data.customer_phone)
        .bind(&data.customer_address)
        .bind(data.delivery_zone_id)
        .bind(&data.neighborhood)
        .bind(&data.payment_method)
        .bind(&data.notes)
        .bind(data.subtotal)
        .bind(data.delivery_fee)
        .bind(data.total)
        .bind(OrderStatus::Pendente.as_str())
        .bind(PaymentStatus::Pending.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

    let item_ids: Vec<i64> = data.lines.iter().map(|_| snowflake_id()).collect();
    let order_ids: Vec<i64> = data.lines.iter().map(|_| order_id).collect();
    let product_ids: Vec<i64> = data.lines.iter().map(|l| l.product_id).collect();
    let names: Vec<String> = data.lines.iter().map(|l| l.product_name.clone()).collect();
    let unit_prices: Vec<Decimal> = data.lines.iter().map(|l| l.unit_price).collect();
    let quantities: Vec<i32> = data.lines.iter().map(|l| l.quantity).collect();
    let line_totals: Vec<Decimal> = data.lines.iter().map(|l| l.line_total).collect();

    let items: Vec<OrderItem> = sqlx::query_as(
        r#"
        INSERT INTO order_items (
            id, order_id, product_id, product_name, unit_price, quantity, line_total
        )
        SELECT * FROM UNNEST($1::bigint[], $2::bigint[], $3::bigint[], $4::text[], $5::numeric[], $6::integer[], $7::numeric[])
        RETURNING id, order_id, product_id, product_name, unit_price, quantity, line_total
        "#,
    )
    .bind(&item_ids)
    .bind(&order_ids)
    .bind(&product_ids)
    .bind(&names)
    .bind(&unit_prices)
    .bind(&quantities)
    .bind(&line_totals)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    row.into_order(items)
}

pub async fn update_order_status(
    pool: &PgPool,
    id: i64,
    status: OrderStatus,
) -> Result<bool, BoxError> {
    let result = sqlx::query("UPDATE orders SET order_status = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(status.as_str())
        .bind(now_millis())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_payment_status(
    pool: &PgPool,
    id: i64,
    status: PaymentStatus,
) -> Result<bool, BoxError> {
    let result =
        sqlx::query("UPDATE orders SET payment_status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(now_millis())
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_order(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
