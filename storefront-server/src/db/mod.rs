//! Database access layer
//!
//! Plain `sqlx` queries against PostgreSQL. Every function takes the pool (or
//! an open transaction) and returns `BoxError` on infrastructure failure;
//! "not found" is expressed as `Option`/`bool`, never as an error.

pub mod banners;
pub mod categories;
pub mod delivery_zones;
pub mod inventory;
pub mod orders;
pub mod product_attributes;
pub mod product_images;
pub mod products;
pub mod store_settings;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// PostgreSQL `unique_violation`, used to turn races on unique columns into
/// conflicts instead of internal errors
pub(crate) fn is_unique_violation(e: &BoxError) -> bool {
    matches!(
        e.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23505")
    )
}
