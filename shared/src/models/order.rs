//! Order Model
//!
//! Checkout orders. Line prices are copied from the catalog at checkout time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Order fulfilment status (wire values are the storefront's Portuguese labels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, waiting for the kitchen/warehouse
    Pendente,
    Preparando,
    /// Out for delivery
    Entregando,
    Entregue,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendente => "pendente",
            OrderStatus::Preparando => "preparando",
            OrderStatus::Entregando => "entregando",
            OrderStatus::Entregue => "entregue",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(OrderStatus::Pendente),
            "preparando" => Ok(OrderStatus::Preparando),
            "entregando" => Ok(OrderStatus::Entregando),
            "entregue" => Ok(OrderStatus::Entregue),
            other => Err(AppError::with_message(
                ErrorCode::OrderStatusInvalid,
                format!("Invalid order status: {other}"),
            )),
        }
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(AppError::with_message(
                ErrorCode::PaymentStatusInvalid,
                format!("Invalid payment status: {other}"),
            )),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Sequential, human-facing number
    pub order_number: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub delivery_zone_id: Option<i64>,
    /// Neighborhood name copied from the zone at checkout
    pub neighborhood: Option<String>,
    pub payment_method: String,
    pub notes: Option<String>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Product name snapshot
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// Checkout payload (`POST /api/orders`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub delivery_zone_id: Option<i64>,
    pub payment_method: String,
    pub notes: Option<String>,
    pub items: Vec<OrderLineInput>,
}

/// Requested order line; the price is taken from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub product_id: i64,
    pub quantity: i32,
}

/// `PUT /api/orders/:id/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub order_status: OrderStatus,
}

/// `PUT /api/orders/:id/payment-status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdate {
    pub payment_status: PaymentStatus,
}

/// Filters for `GET /api/orders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
}

/// Dashboard counters (`GET /api/orders/summary`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Orders created today
    pub today_orders: i64,
    /// Orders currently in `preparando`
    pub preparing: i64,
    /// Sum of today's paid orders
    pub today_revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Entregando).unwrap(),
            "\"entregando\""
        );
        let s: OrderStatus = serde_json::from_str("\"preparando\"").unwrap();
        assert_eq!(s, OrderStatus::Preparando);
        assert_eq!("entregue".parse::<OrderStatus>().unwrap(), OrderStatus::Entregue);
    }

    #[test]
    fn test_invalid_status_maps_to_error_code() {
        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderStatusInvalid);
        let err = "refunded".parse::<PaymentStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentStatusInvalid);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for status in [
            OrderStatus::Pendente,
            OrderStatus::Preparando,
            OrderStatus::Entregando,
            OrderStatus::Entregue,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(PaymentStatus::Paid.as_str(), "paid");
    }
}
