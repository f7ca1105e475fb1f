mod feature;
mod types;
mod writer;

pub use feature::{build_collection, build_collections};
pub use types::{Feature, FeatureCollection, Geometry, GroupCollection};
pub use writer::write_collections;
