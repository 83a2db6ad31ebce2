//! Shared types for the storefront
//!
//! Models, the error system, the image gallery manager and pricing math used
//! by both the server and the admin client.

pub mod error;
pub mod gallery;
pub mod models;
pub mod pricing;
pub mod util;

// Re-exports
pub use error::{AppError, ErrorBody, ErrorCode};
pub use gallery::{GalleryError, GalleryImage, ImageGallery};
pub use pricing::CurrencyFormat;
pub use serde::{Deserialize, Serialize};
