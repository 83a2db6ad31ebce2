//! Product API
//!
//! The storefront lists available products only; `?admin=true` returns the
//! whole catalog for the back office.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Product, ProductCreate, ProductDetail, ProductQuery, ProductSummary, ProductUpdate,
};

use super::{ApiResult, internal};
use crate::db;
use crate::state::AppState;
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_image_url, validate_optional_price,
    validate_price, validate_required_text,
};

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Vec<ProductSummary>> {
    let products = db::products::list_products(&state.pool, &query)
        .await
        .map_err(internal)?;
    Ok(Json(products.into_iter().map(ProductSummary::from).collect()))
}

/// GET /api/products/:id - product with ordered images and attributes
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ProductDetail> {
    let product = db::products::get_product(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    let images = db::product_images::list_images(&state.pool, id)
        .await
        .map_err(internal)?;
    let attributes = db::product_attributes::list_attributes(&state.pool, Some(id))
        .await
        .map_err(internal)?;

    Ok(Json(ProductDetail {
        discount_percent: product.discount_percent(),
        product,
        images,
        attributes,
    }))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductCreate>,
) -> ApiResult<Product> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_price(payload.price, "price")?;
    validate_optional_price(payload.original_price, "originalPrice")?;
    validate_optional_image_url(&payload.image_url, "imageUrl")?;
    ensure_category(&state, payload.category_id).await?;

    let product = db::products::create_product(&state.pool, &payload)
        .await
        .map_err(internal)?;
    tracing::info!(product_id = product.id, name = %product.name, "Product created");
    Ok(Json(product))
}

/// PUT /api/products/:id - partial update; a new price resets the base price
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> ApiResult<Product> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(description) = &payload.description {
        validate_required_text(description, "description", MAX_NOTE_LEN)?;
    }
    validate_optional_price(payload.price, "price")?;
    validate_optional_price(payload.original_price.flatten(), "originalPrice")?;
    validate_optional_image_url(&payload.image_url, "imageUrl")?;
    if let Some(category_id) = payload.category_id {
        ensure_category(&state, category_id).await?;
    }

    let product = db::products::update_product(&state.pool, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - images and attributes cascade
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<bool> {
    let deleted = db::products::delete_product(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(not_found(id));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(Json(true))
}

async fn ensure_category(state: &AppState, category_id: i64) -> Result<(), AppError> {
    let exists = db::categories::category_exists(&state.pool, category_id)
        .await
        .map_err(internal)?;
    if !exists {
        return Err(AppError::new(ErrorCode::CategoryNotFound).with_detail("categoryId", category_id));
    }
    Ok(())
}

pub(crate) fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ProductNotFound).with_detail("productId", id)
}

/// Existence check shared by the nested product resources
pub(crate) async fn ensure_product(state: &AppState, id: i64) -> Result<(), AppError> {
    db::products::get_product(&state.pool, id)
        .await
        .map_err(internal)?
        .map(|_| ())
        .ok_or_else(|| not_found(id))
}
