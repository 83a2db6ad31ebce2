//! Category API

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{Category, CategoryCreate, CategoryUpdate, slugify};

use super::{ApiResult, internal};
use crate::db::{self, BoxError, is_unique_violation};
use crate::state::AppState;
use crate::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

/// GET /api/categories - ordered by displayOrder
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = db::categories::list_categories(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(categories))
}

/// GET /api/categories/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Category> {
    let category = db::categories::get_category(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// POST /api/categories - a blank slug is derived from the name
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CategoryCreate>,
) -> ApiResult<Category> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.icon, "icon", MAX_SHORT_TEXT_LEN)?;
    if let Some(order) = payload.display_order {
        validate_non_negative(order, "displayOrder")?;
    }

    let name = payload.name.trim();
    let slug = resolve_slug(payload.slug.as_deref(), name)?;
    ensure_slug_free(&state, &slug, None).await?;

    let category = db::categories::create_category(
        &state.pool,
        name,
        &slug,
        payload.icon.as_deref(),
        payload.display_order,
    )
    .await
    .map_err(|e| slug_conflict_or_internal(e, &slug))?;

    tracing::info!(category_id = category.id, slug = %category.slug, "Category created");
    Ok(Json(category))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<CategoryUpdate>,
) -> ApiResult<Category> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.icon, "icon", MAX_SHORT_TEXT_LEN)?;
    if let Some(order) = payload.display_order {
        validate_non_negative(order, "displayOrder")?;
    }

    // A slug sent blank is re-derived from the (new or current) name
    if let Some(raw) = payload.slug.take() {
        let name = match &payload.name {
            Some(name) => name.trim().to_string(),
            None => {
                db::categories::get_category(&state.pool, id)
                    .await
                    .map_err(internal)?
                    .ok_or_else(|| not_found(id))?
                    .name
            }
        };
        let slug = resolve_slug(Some(&raw), &name)?;
        ensure_slug_free(&state, &slug, Some(id)).await?;
        payload.slug = Some(slug);
    }

    let slug = payload.slug.clone().unwrap_or_default();
    let category = db::categories::update_category(&state.pool, id, &payload)
        .await
        .map_err(|e| slug_conflict_or_internal(e, &slug))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id - refused while products reference it
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<bool> {
    let products = db::categories::count_products(&state.pool, id)
        .await
        .map_err(internal)?;
    if products > 0 {
        return Err(AppError::new(ErrorCode::CategoryHasProducts)
            .with_detail("categoryId", id)
            .with_detail("products", products));
    }

    let deleted = db::categories::delete_category(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(not_found(id));
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(Json(true))
}

fn resolve_slug(requested: Option<&str>, name: &str) -> Result<String, AppError> {
    let slug = match requested.map(str::trim) {
        Some(s) if !s.is_empty() => slugify(s),
        _ => slugify(name),
    };
    if slug.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "slug must contain at least one letter or digit",
        )
        .with_detail("field", "slug"));
    }
    Ok(slug)
}

async fn ensure_slug_free(state: &AppState, slug: &str, except_id: Option<i64>) -> Result<(), AppError> {
    let taken = db::categories::slug_taken(&state.pool, slug, except_id)
        .await
        .map_err(internal)?;
    if taken {
        return Err(slug_exists(slug));
    }
    Ok(())
}

fn slug_conflict_or_internal(e: BoxError, slug: &str) -> AppError {
    if is_unique_violation(&e) {
        slug_exists(slug)
    } else {
        internal(e)
    }
}

fn slug_exists(slug: &str) -> AppError {
    AppError::new(ErrorCode::CategorySlugExists).with_detail("slug", slug)
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::CategoryNotFound).with_detail("categoryId", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_slug_is_derived_from_name() {
        assert_eq!(resolve_slug(None, "Bebidas Geladas").unwrap(), "bebidas-geladas");
        assert_eq!(resolve_slug(Some("   "), "Lanches").unwrap(), "lanches");
    }

    #[test]
    fn test_explicit_slug_is_normalized() {
        assert_eq!(resolve_slug(Some("Promoções do Dia"), "x").unwrap(), "promocoes-do-dia");
    }

    #[test]
    fn test_unsluggable_name_is_rejected() {
        let err = resolve_slug(None, "!!!").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
