use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ElementError {
    #[error("missing field {0}")]
    MissingField(&'static str),
    #[error("field {field} is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },
    #[error("field {field} is not text: {value}")]
    NotText { field: &'static str, value: String },
    #[error("field {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("invalid epoch: {0}")]
    InvalidEpoch(String),
}
