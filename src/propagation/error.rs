use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelBuildError {
    #[error("propagator rejected elements: {0}")]
    Rejected(String),
}
