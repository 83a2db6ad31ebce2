//! Storefront admin - back-office client for storefront-server
//!
//! - [`HttpClient`]: reqwest client speaking the server's JSON API
//! - [`CatalogApi`]: the calls the back office makes, implemented by
//!   `HttpClient` and by test doubles
//! - [`draft`]: immutable form drafts edited through reducers
//! - [`save`]: the multi-step product save and its [`SaveReport`]
//! - [`notify`]: user-facing notices for outcomes and errors

pub mod api;
pub mod config;
pub mod draft;
pub mod error;
pub mod http;
pub mod notify;
pub mod save;

pub use api::CatalogApi;
pub use config::AdminConfig;
pub use draft::{Draft, DraftError};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use notify::{Notice, NoticeLevel};
pub use save::{SaveReport, SaveStatus, SaveStep, StepOutcome};
