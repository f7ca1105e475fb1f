mod error;
mod sgp4_model;
mod types;

#[cfg(test)]
pub mod testing;

pub use sgp4_model::Sgp4Builder;
pub use types::{ModelBuilder, PropagationModel};
#[cfg(test)]
pub use types::StateVector;
