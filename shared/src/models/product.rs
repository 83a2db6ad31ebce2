//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::{ProductAttribute, ProductImage};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Displayed price (base price plus active attribute modifiers)
    pub price: Decimal,
    /// Price before attribute modifiers
    pub base_price: Decimal,
    /// "From" price shown struck through when greater than `price`
    pub original_price: Option<Decimal>,
    pub category_id: i64,
    /// Primary image, mirrors the main gallery image
    pub image_url: Option<String>,
    pub is_available: bool,
    pub is_featured: bool,
    pub is_promotion: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// Whole-number discount shown on the storefront, if any
    pub fn discount_percent(&self) -> Option<u32> {
        crate::pricing::discount_percent(self.original_price, self.price)
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub category_id: i64,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_promotion: Option<bool>,
}

/// Update product payload
///
/// A new `price` replaces both the displayed and the base price.
/// `originalPrice`: absent keeps it, `null` clears it, a value sets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Option<Decimal>>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_promotion: Option<bool>,
}

/// Wraps a field that is present in the body, including an explicit `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Product as listed on the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percent: Option<u32>,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        let discount_percent = product.discount_percent();
        Self {
            product,
            discount_percent,
        }
    }
}

/// Product with its gallery and specifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percent: Option<u32>,
    pub images: Vec<ProductImage>,
    pub attributes: Vec<ProductAttribute>,
}

/// Listing filters for `GET /api/products`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Include unavailable products (back office)
    #[serde(default)]
    pub admin: bool,
    pub category_id: Option<i64>,
    pub featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 1,
            name: "Notebook".into(),
            description: "14 polegadas".into(),
            price: Decimal::new(899900, 2),
            base_price: Decimal::new(899900, 2),
            original_price: Some(Decimal::new(999900, 2)),
            category_id: 7,
            image_url: None,
            is_available: true,
            is_featured: false,
            is_promotion: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_serializes_money_as_string_and_camel_case() {
        let json = serde_json::to_value(product()).unwrap();
        assert_eq!(json["price"], "8999.00");
        assert_eq!(json["basePrice"], "8999.00");
        assert_eq!(json["categoryId"], 7);
        assert_eq!(json["isPromotion"], true);
    }

    #[test]
    fn test_summary_flattens_and_adds_discount() {
        let json = serde_json::to_value(ProductSummary::from(product())).unwrap();
        assert_eq!(json["name"], "Notebook");
        assert_eq!(json["discountPercent"], 10);
    }

    #[test]
    fn test_update_original_price_is_three_state() {
        let keep: ProductUpdate = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(keep.original_price, None);

        let clear: ProductUpdate = serde_json::from_str(r#"{"originalPrice":null}"#).unwrap();
        assert_eq!(clear.original_price, Some(None));

        let set: ProductUpdate = serde_json::from_str(r#"{"originalPrice":"150.00"}"#).unwrap();
        assert_eq!(set.original_price, Some(Some(Decimal::new(15000, 2))));

        let json = serde_json::to_value(ProductUpdate::default()).unwrap();
        assert!(json.get("originalPrice").is_none());
        let json = serde_json::to_value(clear).unwrap();
        assert!(json["originalPrice"].is_null());
    }

    #[test]
    fn test_query_defaults() {
        let q: ProductQuery = serde_json::from_str("{}").unwrap();
        assert!(!q.admin);
        assert!(q.category_id.is_none());
    }
}
