//! HTTP API of storefront-server
//!
//! Each resource module exposes `router()`; `build_router` merges them and
//! `build_app` adds the tower middleware.

pub mod banners;
pub mod categories;
pub mod delivery_zones;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod pricing;
pub mod product_attributes;
pub mod product_images;
pub mod products;
pub mod store_settings;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use http::HeaderValue;
use shared::error::{AppError, ErrorCode};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::AppState;

/// Handler result: JSON body or the error envelope
pub(crate) type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Catalog
        .merge(products::router())
        .merge(product_images::router())
        .merge(product_attributes::router())
        .merge(pricing::router())
        .merge(categories::router())
        // Storefront content
        .merge(banners::router())
        .merge(store_settings::router())
        // Checkout and back office
        .merge(delivery_zones::router())
        .merge(orders::router())
        .merge(inventory::router())
        // Health - public route
        .merge(health::router())
}

/// Build the application with all middleware; state is attached by the caller
pub fn build_app(config: &Config) -> Router<AppState> {
    build_router().layer(
        ServiceBuilder::new()
            // Trace - Request tracing (logs at INFO level), outermost
            .layer(TraceLayer::new_for_http())
            // CORS - Handle cross-origin requests
            .layer(cors_layer(config))
            // Body limit - enforced by the body extractors (413)
            .layer(DefaultBodyLimit::max(config.max_body_size)),
    )
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Log an infrastructure failure and hide it behind `InternalError`
pub(crate) fn internal(e: impl std::fmt::Display) -> AppError {
    tracing::error!("Storefront query error: {e}");
    AppError::new(ErrorCode::InternalError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use shared::CurrencyFormat;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    /// App over a pool that never connects; only routes that fail before
    /// touching the database can be exercised.
    fn app() -> Router {
        let config = Config {
            database_url: "postgres://localhost/unused".into(),
            http_port: 0,
            database_max_connections: 1,
            environment: "development".into(),
            cors_allowed_origins: vec![],
            max_body_size: 1024,
            currency: CurrencyFormat::default(),
        };
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        build_app(&config).with_state(AppState {
            pool,
            currency: config.currency.clone(),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        let body = body.to_string();
        Request::post(uri)
            .header("content-type", "application/json")
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "storefront-server");
    }

    #[tokio::test]
    async fn test_product_with_empty_name_is_rejected() {
        let (status, body) = send(post_json(
            "/api/products",
            serde_json::json!({
                "name": "  ",
                "description": "Notebook",
                "price": "8999.00",
                "categoryId": 1
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::RequiredField.code());
        assert_eq!(body["details"]["field"], "name");
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let (status, body) = send(post_json(
            "/api/products",
            serde_json::json!({
                "name": "Notebook",
                "description": "16GB",
                "price": "-1.00",
                "categoryId": 1
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::ProductInvalidPrice.code());
    }

    #[tokio::test]
    async fn test_empty_order_is_rejected() {
        let (status, body) = send(post_json(
            "/api/orders",
            serde_json::json!({
                "customerName": "Maria",
                "customerPhone": "11999990000",
                "customerAddress": "Rua A, 1",
                "paymentMethod": "pix",
                "items": []
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::OrderEmpty.code());
    }

    #[tokio::test]
    async fn test_invalid_image_url_is_rejected() {
        let (status, body) = send(post_json(
            "/api/products/1/images",
            serde_json::json!({ "imageUrl": "not a url" }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::ImageUrlInvalid.code());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let name = "x".repeat(4096);
        let (status, _) = send(post_json(
            "/api/categories",
            serde_json::json!({ "name": name }),
        ))
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
