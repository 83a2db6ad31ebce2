//! Product attribute ("specification") API

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{ProductAttribute, ProductAttributeCreate, ProductAttributeQuery};

use super::products::ensure_product;
use super::{ApiResult, internal};
use crate::db;
use crate::state::AppState;
use crate::validation::{MAX_NAME_LEN, validate_required_text};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/product-attributes", get(list).post(create))
        .route("/api/product-attributes/{id}", delete(delete_one))
        .route("/api/products/{id}/attributes", delete(delete_for_product))
}

/// GET /api/product-attributes[?productId=]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductAttributeQuery>,
) -> ApiResult<Vec<ProductAttribute>> {
    let attributes = db::product_attributes::list_attributes(&state.pool, query.product_id)
        .await
        .map_err(internal)?;
    Ok(Json(attributes))
}

/// POST /api/product-attributes
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductAttributeCreate>,
) -> ApiResult<ProductAttribute> {
    validate_required_text(&payload.attribute_name, "attributeName", MAX_NAME_LEN)?;
    validate_required_text(&payload.attribute_value, "attributeValue", MAX_NAME_LEN)?;
    if let Some(modifier) = payload.price_modifier
        && modifier.normalize().scale() > 2
    {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            "priceModifier must have at most 2 decimal places",
        ));
    }
    ensure_product(&state, payload.product_id).await?;

    let attribute = db::product_attributes::create_attribute(&state.pool, &payload)
        .await
        .map_err(internal)?;
    Ok(Json(attribute))
}

/// DELETE /api/product-attributes/:id
pub async fn delete_one(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<bool> {
    let deleted = db::product_attributes::delete_attribute(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::AttributeNotFound).with_detail("attributeId", id));
    }
    Ok(Json(true))
}

/// DELETE /api/products/:id/attributes - returns the number removed
pub async fn delete_for_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> ApiResult<u64> {
    let removed = db::product_attributes::delete_product_attributes(&state.pool, product_id)
        .await
        .map_err(internal)?;
    Ok(Json(removed))
}
