//! Order API: storefront checkout plus back-office order management
//!
//! Line prices always come from the catalog; the client only sends product
//! ids and quantities.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    DeliveryZone, Order, OrderCreate, OrderQuery, OrderStatusUpdate, OrderSummary,
    PaymentStatusUpdate, Product,
};
use shared::pricing::{line_total, order_totals};
use shared::util::start_of_day_millis;

use super::{ApiResult, internal};
use crate::db;
use crate::db::orders::{NewOrder, NewOrderLine};
use crate::state::AppState;
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_LINE_QUANTITY, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_required_text,
};

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        // Static segment, must not be captured by /{id}
        .route("/summary", get(summary))
        .route("/{id}", get(get_by_id).delete(delete))
        .route("/{id}/status", put(update_status))
        .route("/{id}/payment-status", put(update_payment_status))
}

/// GET /api/orders[?status=]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> ApiResult<Vec<Order>> {
    let orders = db::orders::list_orders(&state.pool, query.status)
        .await
        .map_err(internal)?;
    Ok(Json(orders))
}

/// GET /api/orders/summary - dashboard counters for the current day
pub async fn summary(State(state): State<AppState>) -> ApiResult<OrderSummary> {
    let summary = db::orders::summary(&state.pool, start_of_day_millis())
        .await
        .map_err(internal)?;
    Ok(Json(summary))
}

/// GET /api/orders/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Order> {
    let order = db::orders::get_order(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(order))
}

/// POST /api/orders - checkout
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OrderCreate>,
) -> ApiResult<Order> {
    validate_order(&payload)?;

    let zone = match payload.delivery_zone_id {
        Some(zone_id) => Some(
            db::delivery_zones::get_zone(&state.pool, zone_id)
                .await
                .map_err(internal)?
                .ok_or_else(|| {
                    AppError::new(ErrorCode::DeliveryZoneNotFound)
                        .with_detail("deliveryZoneId", zone_id)
                })?,
        ),
        None => None,
    };

    let ids: Vec<i64> = payload.items.iter().map(|l| l.product_id).collect();
    let products: HashMap<i64, Product> = db::products::get_products(&state.pool, &ids)
        .await
        .map_err(internal)?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let new_order = price_order(&payload, &products, zone.as_ref())?;
    let order = db::orders::create_order(&state.pool, new_order)
        .await
        .map_err(internal)?;

    tracing::info!(
        order_id = order.id,
        order_number = order.order_number,
        total = %order.total,
        items = order.items.len(),
        "Order created"
    );
    Ok(Json(order))
}

/// PUT /api/orders/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> ApiResult<Order> {
    let updated = db::orders::update_order_status(&state.pool, id, payload.order_status)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(not_found(id));
    }
    tracing::info!(order_id = id, status = payload.order_status.as_str(), "Order status changed");
    reload(&state, id).await
}

/// PUT /api/orders/:id/payment-status
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentStatusUpdate>,
) -> ApiResult<Order> {
    let updated = db::orders::update_payment_status(&state.pool, id, payload.payment_status)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(not_found(id));
    }
    reload(&state, id).await
}

/// DELETE /api/orders/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<bool> {
    let deleted = db::orders::delete_order(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(not_found(id));
    }
    tracing::info!(order_id = id, "Order deleted");
    Ok(Json(true))
}

async fn reload(state: &AppState, id: i64) -> ApiResult<Order> {
    let order = db::orders::get_order(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(order))
}

fn validate_order(payload: &OrderCreate) -> Result<(), AppError> {
    validate_required_text(&payload.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_required_text(&payload.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.customer_address, "customerAddress", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.payment_method, "paymentMethod", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for line in &payload.items {
        if !(1..=MAX_LINE_QUANTITY).contains(&line.quantity) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("quantity must be between 1 and {MAX_LINE_QUANTITY}"),
            )
            .with_detail("productId", line.product_id)
            .with_detail("quantity", line.quantity));
        }
    }
    Ok(())
}

/// Resolve catalog prices and totals for a validated checkout payload.
fn price_order(
    payload: &OrderCreate,
    products: &HashMap<i64, Product>,
    zone: Option<&DeliveryZone>,
) -> Result<NewOrder, AppError> {
    if let Some(zone) = zone
        && !zone.is_active
    {
        return Err(AppError::new(ErrorCode::DeliveryZoneInactive)
            .with_detail("deliveryZoneId", zone.id));
    }

    let mut lines = Vec::with_capacity(payload.items.len());
    for input in &payload.items {
        let product = products.get(&input.product_id).ok_or_else(|| {
            AppError::new(ErrorCode::ProductNotFound).with_detail("productId", input.product_id)
        })?;
        if !product.is_available {
            return Err(AppError::new(ErrorCode::ProductUnavailable)
                .with_detail("productId", product.id)
                .with_detail("name", product.name.clone()));
        }
        lines.push(NewOrderLine {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity: input.quantity,
            line_total: line_total(product.price, input.quantity),
        });
    }

    let delivery_fee = zone.map(|z| z.delivery_fee).unwrap_or_default();
    let (subtotal, total) = order_totals(lines.iter().map(|l| l.line_total), delivery_fee);

    Ok(NewOrder {
        customer_name: payload.customer_name.trim().to_string(),
        customer_phone: payload.customer_phone.trim().to_string(),
        customer_address: payload.customer_address.trim().to_string(),
        delivery_zone_id: zone.map(|z| z.id),
        neighborhood: zone.map(|z| z.neighborhood_name.clone()),
        payment_method: payload.payment_method.trim().to_string(),
        notes: payload.notes.clone(),
        subtotal,
        delivery_fee,
        total,
        lines,
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", id)
}
