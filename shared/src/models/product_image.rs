//! Product Image Model

use serde::{Deserialize, Serialize};

/// Product gallery image (persisted row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    pub image_url: String,
    /// 0-based render sequence
    pub display_order: i32,
    pub is_main: bool,
    pub alt_text: Option<String>,
    pub created_at: i64,
}

/// Create product image payload (`POST /api/products/:id/images`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImageCreate {
    pub image_url: String,
    pub display_order: Option<i32>,
    pub is_main: Option<bool>,
    pub alt_text: Option<String>,
}
