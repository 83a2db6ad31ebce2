//! Product gallery API
//!
//! The admin client persists a gallery by clearing the stored images,
//! re-creating them in order and promoting the main one.

use axum::extract::{Path, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{ProductImage, ProductImageCreate};

use super::products::ensure_product;
use super::{ApiResult, internal};
use crate::db;
use crate::state::AppState;
use crate::validation::{MAX_SHORT_TEXT_LEN, validate_image_url, validate_optional_text};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/products/{id}/images",
            get(list).post(create).delete(delete_all),
        )
        .route("/api/products/{id}/images/{image_id}", delete(delete_one))
        .route("/api/products/{id}/main-image/{image_id}", put(set_main))
}

/// GET /api/products/:id/images - ordered by displayOrder
pub async fn list(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> ApiResult<Vec<ProductImage>> {
    ensure_product(&state, product_id).await?;
    let images = db::product_images::list_images(&state.pool, product_id)
        .await
        .map_err(internal)?;
    Ok(Json(images))
}

/// POST /api/products/:id/images
pub async fn create(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(mut payload): Json<ProductImageCreate>,
) -> ApiResult<ProductImage> {
    payload.image_url = payload.image_url.trim().to_string();
    validate_image_url(&payload.image_url, "imageUrl")?;
    validate_optional_text(&payload.alt_text, "altText", MAX_SHORT_TEXT_LEN)?;
    if let Some(order) = payload.display_order
        && order < 0
    {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "displayOrder must not be negative",
        ));
    }
    ensure_product(&state, product_id).await?;

    let duplicate = db::product_images::url_exists(&state.pool, product_id, &payload.image_url)
        .await
        .map_err(internal)?;
    if duplicate {
        return Err(AppError::new(ErrorCode::ImageUrlDuplicate)
            .with_detail("imageUrl", payload.image_url.clone()));
    }

    let image = db::product_images::create_image(&state.pool, product_id, &payload)
        .await
        .map_err(internal)?;
    Ok(Json(image))
}

/// DELETE /api/products/:id/images - clear the gallery, returns the count
pub async fn delete_all(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> ApiResult<u64> {
    let removed = db::product_images::delete_all_images(&state.pool, product_id)
        .await
        .map_err(internal)?;
    Ok(Json(removed))
}

/// DELETE /api/products/:id/images/:image_id
pub async fn delete_one(
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(i64, i64)>,
) -> ApiResult<bool> {
    let deleted = db::product_images::delete_image(&state.pool, product_id, image_id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(image_not_found(image_id));
    }
    Ok(Json(true))
}

/// PUT /api/products/:id/main-image/:image_id - returns the updated gallery
pub async fn set_main(
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(i64, i64)>,
) -> ApiResult<Vec<ProductImage>> {
    let updated = db::product_images::set_main_image(&state.pool, product_id, image_id)
        .await
        .map_err(internal)?;
    if !updated {
        return Err(image_not_found(image_id));
    }
    let images = db::product_images::list_images(&state.pool, product_id)
        .await
        .map_err(internal)?;
    Ok(Json(images))
}

fn image_not_found(image_id: i64) -> AppError {
    AppError::new(ErrorCode::ImageNotFound).with_detail("imageId", image_id)
}
