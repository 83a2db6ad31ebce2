//! Unified error codes for the storefront
//!
//! Error codes are shared by the server, the admin client and the web
//! frontend. They are organized by range:
//! - 0xxx: General errors
//! - 1xxx: Catalog errors (products, categories, attributes)
//! - 2xxx: Media errors (product images)
//! - 3xxx: Marketing errors (banners)
//! - 4xxx: Order errors
//! - 5xxx: Delivery errors
//! - 6xxx: Inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 1001,
    /// Product has invalid price
    ProductInvalidPrice = 1002,
    /// Product is not available for sale
    ProductUnavailable = 1003,
    /// Category not found
    CategoryNotFound = 1101,
    /// Category has products
    CategoryHasProducts = 1102,
    /// Category slug already exists
    CategorySlugExists = 1103,
    /// Product attribute not found
    AttributeNotFound = 1201,

    // ==================== 2xxx: Media ====================
    /// Product image not found
    ImageNotFound = 2001,
    /// Image URL is empty or malformed
    ImageUrlInvalid = 2002,
    /// Image URL already present in the gallery
    ImageUrlDuplicate = 2003,
    /// Gallery index out of range
    ImageIndexOutOfRange = 2004,

    // ==================== 3xxx: Marketing ====================
    /// Banner not found
    BannerNotFound = 3001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Unknown order status
    OrderStatusInvalid = 4003,
    /// Unknown payment status
    PaymentStatusInvalid = 4004,

    // ==================== 5xxx: Delivery ====================
    /// Delivery zone not found
    DeliveryZoneNotFound = 5001,
    /// Delivery zone neighborhood already exists
    DeliveryZoneNameExists = 5002,
    /// Delivery zone is not accepting orders
    DeliveryZoneInactive = 5003,

    // ==================== 6xxx: Inventory ====================
    /// Inventory item not found
    InventoryItemNotFound = 6001,
    /// Stock values must not be negative
    InventoryStockNegative = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductUnavailable => "Product is not available",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Cannot delete category with existing products",
            ErrorCode::CategorySlugExists => "Category slug already exists",
            ErrorCode::AttributeNotFound => "Product attribute not found",

            // Media
            ErrorCode::ImageNotFound => "Product image not found",
            ErrorCode::ImageUrlInvalid => "Image URL is invalid",
            ErrorCode::ImageUrlDuplicate => "Image URL is already in the gallery",
            ErrorCode::ImageIndexOutOfRange => "Image index is out of range",

            // Marketing
            ErrorCode::BannerNotFound => "Banner not found",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderStatusInvalid => "Invalid order status",
            ErrorCode::PaymentStatusInvalid => "Invalid payment status",

            // Delivery
            ErrorCode::DeliveryZoneNotFound => "Delivery zone not found",
            ErrorCode::DeliveryZoneNameExists => "Delivery zone already exists",
            ErrorCode::DeliveryZoneInactive => "Delivery zone is not active",

            // Inventory
            ErrorCode::InventoryItemNotFound => "Inventory item not found",
            ErrorCode::InventoryStockNegative => "Stock values must not be negative",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Catalog
            1001 => Ok(ErrorCode::ProductNotFound),
            1002 => Ok(ErrorCode::ProductInvalidPrice),
            1003 => Ok(ErrorCode::ProductUnavailable),
            1101 => Ok(ErrorCode::CategoryNotFound),
            1102 => Ok(ErrorCode::CategoryHasProducts),
            1103 => Ok(ErrorCode::CategorySlugExists),
            1201 => Ok(ErrorCode::AttributeNotFound),

            // Media
            2001 => Ok(ErrorCode::ImageNotFound),
            2002 => Ok(ErrorCode::ImageUrlInvalid),
            2003 => Ok(ErrorCode::ImageUrlDuplicate),
            2004 => Ok(ErrorCode::ImageIndexOutOfRange),

            // Marketing
            3001 => Ok(ErrorCode::BannerNotFound),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::OrderStatusInvalid),
            4004 => Ok(ErrorCode::PaymentStatusInvalid),

            // Delivery
            5001 => Ok(ErrorCode::DeliveryZoneNotFound),
            5002 => Ok(ErrorCode::DeliveryZoneNameExists),
            5003 => Ok(ErrorCode::DeliveryZoneInactive),

            // Inventory
            6001 => Ok(ErrorCode::InventoryItemNotFound),
            6002 => Ok(ErrorCode::InventoryStockNegative),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
