//! Store settings API (singleton row)

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use shared::models::{StoreSettings, StoreSettingsUpdate};

use super::{ApiResult, internal};
use crate::db;
use crate::state::AppState;
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_image_url, validate_optional_text,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/store/settings", get(get_settings).put(update_settings))
}

/// GET /api/store/settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<StoreSettings> {
    let settings = db::store_settings::get_settings(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(settings))
}

/// PUT /api/store/settings - partial update
pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<StoreSettingsUpdate>,
) -> ApiResult<StoreSettings> {
    validate_optional_text(&payload.site_name, "siteName", MAX_NAME_LEN)?;
    validate_optional_text(&payload.store_title, "storeTitle", MAX_NAME_LEN)?;
    validate_optional_image_url(&payload.store_image_url, "storeImageUrl")?;
    validate_optional_text(&payload.store_address, "storeAddress", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.store_neighborhood, "storeNeighborhood", MAX_NAME_LEN)?;
    validate_optional_text(&payload.store_hours, "storeHours", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.delivery_time, "deliveryTime", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.delivery_fee_range, "deliveryFeeRange", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.payment_methods, "paymentMethods", MAX_NOTE_LEN)?;
    validate_optional_image_url(&payload.banner_image_url, "bannerImageUrl")?;

    let settings = db::store_settings::update_settings(&state.pool, &payload)
        .await
        .map_err(internal)?;
    tracing::info!("Store settings updated");
    Ok(Json(settings))
}
