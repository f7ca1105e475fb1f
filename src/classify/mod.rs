mod grouper;
mod orbit_class;

pub use grouper::GroupAssigner;
pub use orbit_class::classify;
