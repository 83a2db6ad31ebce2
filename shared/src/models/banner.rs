//! Banner Model
//!
//! Promotional hero banner of the storefront home page. At most one banner
//! is active at a time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Banner entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: i64,
    /// Internal name shown in the back office
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub gradient_color1: String,
    pub gradient_color2: String,
    pub gradient_color3: String,
    pub gradient_color4: String,
    pub use_background_image: bool,
    /// Raw HTML replaces the templated layout when set
    pub is_customizable: bool,
    pub html_content: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create banner payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerCreate {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub gradient_color1: Option<String>,
    pub gradient_color2: Option<String>,
    pub gradient_color3: Option<String>,
    pub gradient_color4: Option<String>,
    pub use_background_image: Option<bool>,
    pub is_customizable: Option<bool>,
    pub html_content: Option<String>,
    pub is_active: Option<bool>,
}

/// Update banner payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub gradient_color1: Option<String>,
    pub gradient_color2: Option<String>,
    pub gradient_color3: Option<String>,
    pub gradient_color4: Option<String>,
    pub use_background_image: Option<bool>,
    pub is_customizable: Option<bool>,
    pub html_content: Option<String>,
}

/// Default gradient stops for new banners
pub const DEFAULT_GRADIENT: [&str; 4] = ["#1e3a8a", "#3b82f6", "#60a5fa", "#93c5fd"];
