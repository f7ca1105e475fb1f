mod catalog;
mod error;
mod loader;
mod types;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use loader::CatalogLoader;
pub use types::CatalogEntry;
#[cfg(test)]
pub use types::GroupRecords;
