use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::elements::OrbitalElementSet;
use crate::propagation::error::ModelBuildError;
use crate::propagation::types::{ModelBuilder, PropagationModel, StateVector};

/// Always returns the same state, regardless of the instant.
pub struct FixedModel(pub StateVector);

impl PropagationModel for FixedModel {
    fn propagate(&self, _at: DateTime<Utc>) -> StateVector {
        self.0
    }
}

/// Builds a model sitting on the x axis at `400 km + catalog_id` altitude,
/// and refuses the ids listed in `reject`.
#[derive(Default)]
pub struct StubBuilder {
    pub reject: HashSet<u32>,
}

impl ModelBuilder for StubBuilder {
    fn build(
        &self,
        elements: &OrbitalElementSet,
    ) -> Result<Box<dyn PropagationModel>, ModelBuildError> {
        if self.reject.contains(&elements.catalog_id) {
            return Err(ModelBuildError::Rejected("stub rejection".into()));
        }
        let radius = 6378.137 + 400.0 + elements.catalog_id as f64;
        Ok(Box::new(FixedModel(StateVector::ok(
            [radius, 0.0, 0.0],
            [0.0, 7.6, 0.0],
        ))))
    }
}
