//! Price recalculation endpoints

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use shared::models::{BulkRecalculateResult, RecalculatedPrice};

use super::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products/{id}/recalculate-price", post(recalculate))
        .route("/api/products/recalculate-all-prices", post(recalculate_all))
}

/// POST /api/products/:id/recalculate-price
pub async fn recalculate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<RecalculatedPrice> {
    let result = state.pricing().recalculate(id).await?;
    Ok(Json(result))
}

/// POST /api/products/recalculate-all-prices
pub async fn recalculate_all(State(state): State<AppState>) -> ApiResult<BulkRecalculateResult> {
    let result = state.pricing().recalculate_all().await?;
    Ok(Json(result))
}
