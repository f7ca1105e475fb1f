mod evaluator;
mod types;

pub use evaluator::Evaluator;
pub use types::{FailureReason, Frame, PositionSample, SampleStatus};
#[cfg(test)]
pub use types::Geodetic;
