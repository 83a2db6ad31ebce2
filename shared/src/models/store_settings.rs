//! Store Settings Model

use serde::{Deserialize, Serialize};

/// Store-wide settings (singleton row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub site_name: String,
    pub store_title: String,
    pub store_image_url: Option<String>,
    pub store_address: String,
    pub store_neighborhood: String,
    pub store_hours: String,
    pub delivery_time: String,
    pub delivery_fee_range: String,
    pub payment_methods: String,
    pub banner_image_url: Option<String>,
    pub updated_at: i64,
}

/// Partial update for store settings; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettingsUpdate {
    pub site_name: Option<String>,
    pub store_title: Option<String>,
    pub store_image_url: Option<String>,
    pub store_address: Option<String>,
    pub store_neighborhood: Option<String>,
    pub store_hours: Option<String>,
    pub delivery_time: Option<String>,
    pub delivery_fee_range: Option<String>,
    pub payment_methods: Option<String>,
    pub banner_image_url: Option<String>,
}
