pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::{CatalogError, CatalogService, CreatedVendorSweet};
pub use domain::model::{NewVendorSweet, Sweet, ValidationError, Vendor, VendorSweet};
pub use infra::config::AppConfig;
