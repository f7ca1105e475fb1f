use std::fmt;

use crate::elements::{ElementRecord, Metadata};
use crate::propagation::PropagationModel;

/// One tracked object. Immutable once the catalog is built.
pub struct CatalogEntry {
    pub catalog_id: u32,
    pub display_name: String,
    /// Feed group the record was retrieved from.
    pub group_label: String,
    pub model: Box<dyn PropagationModel>,
    pub raw_metadata: Metadata,
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("catalog_id", &self.catalog_id)
            .field("display_name", &self.display_name)
            .field("group_label", &self.group_label)
            .finish_non_exhaustive()
    }
}

/// Normalized records retrieved for one feed group.
#[derive(Debug)]
pub struct GroupRecords {
    pub label: String,
    pub records: Vec<ElementRecord>,
}
