//! Delivery Zone Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Delivery zone (a neighborhood with a flat delivery fee)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct DeliveryZone {
    pub id: i64,
    /// Unique, compared case-insensitively
    pub neighborhood_name: String,
    pub delivery_fee: Decimal,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create delivery zone payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryZoneCreate {
    pub neighborhood_name: String,
    pub delivery_fee: Decimal,
    pub is_active: Option<bool>,
}

/// Update delivery zone payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryZoneUpdate {
    pub neighborhood_name: Option<String>,
    pub delivery_fee: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Filters for `GET /api/delivery-zones`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryZoneQuery {
    /// Only zones accepting orders (checkout)
    #[serde(default)]
    pub active: bool,
}
