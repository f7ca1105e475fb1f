use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog id {0} not found")]
    NotFound(u32),
}
