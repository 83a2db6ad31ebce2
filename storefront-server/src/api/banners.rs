//! Banner API
//!
//! At most one banner is active; activation is transactional.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{Banner, BannerCreate, BannerUpdate};

use super::{ApiResult, internal};
use crate::db;
use crate::state::AppState;
use crate::validation::{
    MAX_HTML_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_image_url,
    validate_optional_price, validate_optional_text, validate_required_text,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/banners", routes())
        .route("/api/active-banner", get(active))
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
        .route("/{id}/activate", put(activate))
}

/// GET /api/banners
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Banner>> {
    let banners = db::banners::list_banners(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(banners))
}

/// GET /api/banners/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Banner> {
    let banner = db::banners::get_banner(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(banner))
}

/// GET /api/active-banner - `null` when no banner is active
pub async fn active(State(state): State<AppState>) -> ApiResult<Option<Banner>> {
    let banner = db::banners::get_active_banner(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(banner))
}

/// POST /api/banners
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BannerCreate>,
) -> ApiResult<Banner> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_price(payload.price, "price")?;
    validate_optional_image_url(&payload.image_url, "imageUrl")?;
    validate_optional_text(&payload.html_content, "htmlContent", MAX_HTML_LEN)?;
    for (field, color) in [
        ("gradientColor1", &payload.gradient_color1),
        ("gradientColor2", &payload.gradient_color2),
        ("gradientColor3", &payload.gradient_color3),
        ("gradientColor4", &payload.gradient_color4),
    ] {
        validate_optional_text(color, field, MAX_SHORT_TEXT_LEN)?;
    }

    let banner = db::banners::create_banner(&state.pool, &payload)
        .await
        .map_err(internal)?;
    tracing::info!(banner_id = banner.id, active = banner.is_active, "Banner created");
    Ok(Json(banner))
}

/// PUT /api/banners/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BannerUpdate>,
) -> ApiResult<Banner> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_price(payload.price, "price")?;
    validate_optional_image_url(&payload.image_url, "imageUrl")?;
    validate_optional_text(&payload.html_content, "htmlContent", MAX_HTML_LEN)?;

    let banner = db::banners::update_banner(&state.pool, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(banner))
}

/// PUT /api/banners/:id/activate - deactivates every other banner
pub async fn activate(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Banner> {
    let banner = db::banners::activate_banner(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(banner_id = id, "Banner activated");
    Ok(Json(banner))
}

/// DELETE /api/banners/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<bool> {
    let deleted = db::banners::delete_banner(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(not_found(id));
    }
    Ok(Json(true))
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::BannerNotFound).with_detail("bannerId", id)
}
