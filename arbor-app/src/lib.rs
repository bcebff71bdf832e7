//! Category browser application: catalog loading, the browser page, and the
//! terminal event loop.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod page;
pub mod paths;
pub mod store;

pub use catalog::{Catalog, CatalogError, Entry};
pub use config::{Config, ConfigError, ConfigSource};
pub use error::AppError;
pub use page::{MainView, Outcome};
pub use store::{CategoryRow, CategoryStore, StoreError};
