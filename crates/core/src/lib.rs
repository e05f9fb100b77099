#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod progress;
pub mod time;

pub use catalog::{CatalogError, ContentBundle, ContentCatalog};
pub use time::Clock;
