mod epoch;
mod error;
mod normalize;
mod types;

#[cfg(test)]
pub mod fixtures;

pub use normalize::normalize_records;
#[cfg(test)]
pub use normalize::normalize;
pub use types::{ElementRecord, Metadata, OrbitalElementSet, RawRecord};
