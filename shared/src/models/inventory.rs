//! Inventory Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock record for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i64,
    pub product_id: i64,
    /// Joined from products
    pub product_name: String,
    pub current_stock: i32,
    pub min_stock: i32,
    pub cost_per_unit: Option<Decimal>,
    pub supplier: Option<String>,
    pub last_restocked: Option<i64>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InventoryItem {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.current_stock, self.min_stock)
    }
}

/// Stock level of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Out,
    Low,
    Normal,
}

impl StockLevel {
    pub fn classify(current: i32, min: i32) -> Self {
        if current <= 0 {
            StockLevel::Out
        } else if current <= min {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }
}

/// `?stock=` filter of `GET /api/inventory`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockFilter {
    #[default]
    All,
    /// At or below minimum, out of stock included
    Low,
    Out,
    Normal,
}

impl StockFilter {
    pub fn matches(&self, level: StockLevel) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Low => matches!(level, StockLevel::Low | StockLevel::Out),
            StockFilter::Out => level == StockLevel::Out,
            StockFilter::Normal => level == StockLevel::Normal,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryQuery {
    #[serde(default)]
    pub stock: StockFilter,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCreate {
    pub product_id: i64,
    pub current_stock: i32,
    pub min_stock: Option<i32>,
    pub cost_per_unit: Option<Decimal>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

/// Update inventory item payload
///
/// Raising `currentStock` stamps `lastRestocked`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    pub current_stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub cost_per_unit: Option<Decimal>,
    pub supplier: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(StockLevel::classify(0, 5), StockLevel::Out);
        assert_eq!(StockLevel::classify(5, 5), StockLevel::Low);
        assert_eq!(StockLevel::classify(6, 5), StockLevel::Normal);
        assert_eq!(StockLevel::classify(0, 0), StockLevel::Out);
    }

    #[test]
    fn test_low_filter_includes_out() {
        assert!(StockFilter::Low.matches(StockLevel::Out));
        assert!(StockFilter::Low.matches(StockLevel::Low));
        assert!(!StockFilter::Low.matches(StockLevel::Normal));
        assert!(!StockFilter::Out.matches(StockLevel::Low));
        assert!(StockFilter::All.matches(StockLevel::Normal));
    }

    #[test]
    fn test_filter_from_query_value() {
        let q: InventoryQuery = serde_json::from_str(r#"{"stock":"out"}"#).unwrap();
        assert_eq!(q.stock, StockFilter::Out);
        let q: InventoryQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.stock, StockFilter::All);
    }
}
