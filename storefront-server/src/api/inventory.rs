//! Inventory API

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{InventoryCreate, InventoryItem, InventoryQuery, InventoryUpdate};

use super::products::ensure_product;
use super::{ApiResult, internal};
use crate::db::{self, is_unique_violation};
use crate::state::AppState;
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_price, validate_optional_text,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/inventory", get(list).post(create))
        .route("/api/inventory/{id}", put(update))
}

/// GET /api/inventory[?stock=all|low|out|normal]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> ApiResult<Vec<InventoryItem>> {
    let items = db::inventory::list_inventory(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(
        items
            .into_iter()
            .filter(|item| query.stock.matches(item.stock_level()))
            .collect(),
    ))
}

/// POST /api/inventory - one row per product
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<InventoryCreate>,
) -> ApiResult<InventoryItem> {
    validate_stock(Some(payload.current_stock), payload.min_stock)?;
    validate_optional_price(payload.cost_per_unit, "costPerUnit")?;
    validate_optional_text(&payload.supplier, "supplier", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    ensure_product(&state, payload.product_id).await?;

    let item = db::inventory::create_item(&state.pool, &payload)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists("inventory item")
                    .with_detail("productId", payload.product_id)
            } else {
                internal(e)
            }
        })?;
    Ok(Json(item))
}

/// PUT /api/inventory/:id - raising the stock stamps `lastRestocked`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryUpdate>,
) -> ApiResult<InventoryItem> {
    validate_stock(payload.current_stock, payload.min_stock)?;
    validate_optional_price(payload.cost_per_unit, "costPerUnit")?;
    validate_optional_text(&payload.supplier, "supplier", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let item = db::inventory::update_item(&state.pool, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            AppError::new(ErrorCode::InventoryItemNotFound).with_detail("inventoryId", id)
        })?;
    tracing::info!(
        inventory_id = id,
        stock = item.current_stock,
        level = ?item.stock_level(),
        "Inventory updated"
    );
    Ok(Json(item))
}

fn validate_stock(current: Option<i32>, min: Option<i32>) -> Result<(), AppError> {
    for (field, value) in [("currentStock", current), ("minStock", min)] {
        if let Some(v) = value
            && v < 0
        {
            return Err(AppError::new(ErrorCode::InventoryStockNegative).with_detail("field", field));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_stock_rejected() {
        let err = validate_stock(Some(-1), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InventoryStockNegative);
        assert!(validate_stock(Some(0), Some(-3)).is_err());
        assert!(validate_stock(Some(0), Some(0)).is_ok());
        assert!(validate_stock(None, None).is_ok());
    }
}
