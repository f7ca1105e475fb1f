pub mod catalog;
pub mod error;
pub mod groups;
pub mod satellites;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::time::{parse_time, resolve_or_now};
use error::ApiError;

/// `?at=` on query endpoints. Accepts the same expressions as the CLI.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AtQuery {
    /// `now`, RFC 3339, RFC 3339 with offset (`...Z + 10m`) or `T+30m`. Defaults to now.
    pub at: Option<String>,
}

impl AtQuery {
    pub fn instant(&self) -> Result<DateTime<Utc>, ApiError> {
        let expr = self
            .at
            .as_deref()
            .map(parse_time)
            .transpose()
            .map_err(ApiError::Validation)?;
        resolve_or_now(expr.as_ref()).map_err(ApiError::Validation)
    }
}
