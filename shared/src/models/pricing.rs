//! Price recalculation results

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of `POST /api/products/:id/recalculate-price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculatedPrice {
    pub product_id: i64,
    /// JSON number, unlike other money fields
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// Localized display string, e.g. `R$ 1.234,56`
    pub formatted_price: String,
}

/// Per-product failure inside a bulk recalculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculationFailure {
    pub product_id: i64,
    pub message: String,
}

/// Result of `POST /api/products/recalculate-all-prices`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRecalculateResult {
    pub successful: usize,
    pub failed: usize,
    pub failures: Vec<RecalculationFailure>,
}

impl BulkRecalculateResult {
    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self, product_id: i64, message: impl Into<String>) {
        self.failed += 1;
        self.failures.push(RecalculationFailure {
            product_id,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_price_is_a_number() {
        let result = RecalculatedPrice {
            product_id: 3,
            total_price: Decimal::new(10500, 2),
            formatted_price: "R$ 105,00".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalPrice"], 105.0);
        assert_eq!(json["formattedPrice"], "R$ 105,00");
    }

    #[test]
    fn test_bulk_counters() {
        let mut result = BulkRecalculateResult::default();
        result.record_success();
        result.record_success();
        result.record_failure(9, "Product not found");
        assert_eq!(result.successful, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.failures[0].product_id, 9);
    }
}
