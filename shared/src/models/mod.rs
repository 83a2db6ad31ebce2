//! Data models
//!
//! Shared between storefront-server, storefront-admin and the web frontend
//! (via API). JSON uses camelCase field names. DB row types use
//! `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps Unix milliseconds.

pub mod banner;
pub mod category;
pub mod delivery_zone;
pub mod inventory;
pub mod order;
pub mod pricing;
pub mod product;
pub mod product_attribute;
pub mod product_image;
pub mod store_settings;

// Re-exports
pub use banner::*;
pub use category::*;
pub use delivery_zone::*;
pub use inventory::*;
pub use order::*;
pub use pricing::*;
pub use product::*;
pub use product_attribute::*;
pub use product_image::*;
pub use store_settings::*;
