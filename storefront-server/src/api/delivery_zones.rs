//! Delivery zone API

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{DeliveryZone, DeliveryZoneCreate, DeliveryZoneQuery, DeliveryZoneUpdate};

use super::{ApiResult, internal};
use crate::db::{self, BoxError, is_unique_violation};
use crate::state::AppState;
use crate::validation::{MAX_NAME_LEN, validate_optional_price, validate_price, validate_required_text};

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/delivery-zones", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /api/delivery-zones[?active=true]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DeliveryZoneQuery>,
) -> ApiResult<Vec<DeliveryZone>> {
    let zones = db::delivery_zones::list_zones(&state.pool, query.active)
        .await
        .map_err(internal)?;
    Ok(Json(zones))
}

/// GET /api/delivery-zones/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<DeliveryZone> {
    let zone = db::delivery_zones::get_zone(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(zone))
}

/// POST /api/delivery-zones
pub async fn create(
    State(state): State<AppState>,
    Json(mut payload): Json<DeliveryZoneCreate>,
) -> ApiResult<DeliveryZone> {
    validate_required_text(&payload.neighborhood_name, "neighborhoodName", MAX_NAME_LEN)?;
    validate_price(payload.delivery_fee, "deliveryFee")?;
    payload.neighborhood_name = payload.neighborhood_name.trim().to_string();
    ensure_name_free(&state, &payload.neighborhood_name, None).await?;

    let zone = db::delivery_zones::create_zone(&state.pool, &payload)
        .await
        .map_err(|e| name_conflict_or_internal(e, &payload.neighborhood_name))?;
    tracing::info!(zone_id = zone.id, neighborhood = %zone.neighborhood_name, "Delivery zone created");
    Ok(Json(zone))
}

/// PUT /api/delivery-zones/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<DeliveryZoneUpdate>,
) -> ApiResult<DeliveryZone> {
    if let Some(name) = payload.neighborhood_name.take() {
        validate_required_text(&name, "neighborhoodName", MAX_NAME_LEN)?;
        let name = name.trim().to_string();
        ensure_name_free(&state, &name, Some(id)).await?;
        payload.neighborhood_name = Some(name);
    }
    validate_optional_price(payload.delivery_fee, "deliveryFee")?;

    let name = payload.neighborhood_name.clone().unwrap_or_default();
    let zone = db::delivery_zones::update_zone(&state.pool, id, &payload)
        .await
        .map_err(|e| name_conflict_or_internal(e, &name))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(zone))
}

/// DELETE /api/delivery-zones/:id - past orders keep their neighborhood name
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<bool> {
    let deleted = db::delivery_zones::delete_zone(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(not_found(id));
    }
    Ok(Json(true))
}

async fn ensure_name_free(state: &AppState, name: &str, except_id: Option<i64>) -> Result<(), AppError> {
    let taken = db::delivery_zones::name_taken(&state.pool, name, except_id)
        .await
        .map_err(internal)?;
    if taken {
        return Err(name_exists(name));
    }
    Ok(())
}

fn name_conflict_or_internal(e: BoxError, name: &str) -> AppError {
    if is_unique_violation(&e) {
        name_exists(name)
    } else {
        internal(e)
    }
}

fn name_exists(name: &str) -> AppError {
    AppError::new(ErrorCode::DeliveryZoneNameExists).with_detail("neighborhoodName", name)
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::DeliveryZoneNotFound).with_detail("deliveryZoneId", id)
}
