pub mod config;
pub mod domain;
pub mod errors;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::catalog::Catalog;
pub use domain::product::{Product, ProductId, ProductUpdate};
pub use errors::CatalogError;
