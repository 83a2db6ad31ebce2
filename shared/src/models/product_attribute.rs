//! Product Attribute Model
//!
//! Attributes are the product "specifications": a named technical property
//! that may carry a signed price adjustment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product attribute entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ProductAttribute {
    pub id: i64,
    pub product_id: i64,
    pub attribute_name: String,
    pub attribute_value: String,
    /// Signed amount added to the base price while active
    pub price_modifier: Decimal,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create product attribute payload (`POST /api/product-attributes`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributeCreate {
    pub product_id: i64,
    pub attribute_name: String,
    pub attribute_value: String,
    pub price_modifier: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Filters for `GET /api/product-attributes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributeQuery {
    pub product_id: Option<i64>,
}
