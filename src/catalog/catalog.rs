use std::collections::HashMap;

use crate::catalog::error::CatalogError;
use crate::catalog::types::{CatalogEntry, GroupRecords};
use crate::propagation::ModelBuilder;

/// Keyed registry of tracked objects, iterated in insertion order.
///
/// A catalog is built once from the feed and replaced wholesale on refresh;
/// entries are never patched in place.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<u32, usize>,
    groups: Vec<String>,
}

impl Catalog {
    /// Build models for every record. Objects the builder rejects are dropped.
    ///
    /// Every group label is kept, even when it contributed no objects. An id
    /// seen again in a later group replaces the earlier entry but keeps its
    /// position.
    pub fn build(groups: Vec<GroupRecords>, builder: &dyn ModelBuilder) -> Catalog {
        let mut catalog = Catalog::default();
        let mut dropped = 0;
        let mut replaced = 0;

        for group in groups {
            for record in group.records {
                let elements = record.elements;
                let model = match builder.build(&elements) {
                    Ok(model) => model,
                    Err(e) => {
                        log::warn!(
                            "{}: dropping {} ({}): {}",
                            group.label,
                            elements.catalog_id,
                            elements.object_name,
                            e
                        );
                        dropped += 1;
                        continue;
                    }
                };

                let entry = CatalogEntry {
                    catalog_id: elements.catalog_id,
                    display_name: elements.object_name,
                    group_label: group.label.clone(),
                    model,
                    raw_metadata: record.metadata,
                };
                if catalog.insert(entry) {
                    replaced += 1;
                }
            }
            catalog.groups.push(group.label);
        }

        log::info!(
            "Built catalog: {} objects across {} groups ({} dropped, {} duplicates replaced)",
            catalog.len(),
            catalog.groups.len(),
            dropped,
            replaced
        );
        catalog
    }

    /// Returns true when an existing entry was replaced.
    fn insert(&mut self, entry: CatalogEntry) -> bool {
        match self.index.get(&entry.catalog_id) {
            Some(&slot) => {
                log::debug!(
                    "{} re-listed in {} (was {})",
                    entry.catalog_id,
                    entry.group_label,
                    self.entries[slot].group_label
                );
                self.entries[slot] = entry;
                true
            }
            None => {
                self.index.insert(entry.catalog_id, self.entries.len());
                self.entries.push(entry);
                false
            }
        }
    }

    pub fn get(&self, catalog_id: u32) -> Result<&CatalogEntry, CatalogError> {
        self.index
            .get(&catalog_id)
            .map(|&slot| &self.entries[slot])
            .ok_or(CatalogError::NotFound(catalog_id))
    }

    pub fn all_entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Feed groups this catalog was built from, in build order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn group_size(&self, label: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.group_label == label)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::fixtures::leo_record;
    use crate::elements::normalize_records;
    use crate::propagation::testing::StubBuilder;

    fn group(label: &str, ids: &[u32]) -> GroupRecords {
        let raw = ids
            .iter()
            .map(|&id| leo_record(id, &format!("SAT {id}")))
            .collect();
        GroupRecords {
            label: label.to_string(),
            records: normalize_records(label, raw),
        }
    }

    fn ids(catalog: &Catalog) -> Vec<u32> {
        catalog.all_entries().iter().map(|e| e.catalog_id).collect()
    }

    #[test]
    fn keeps_insertion_order_and_lookup() {
        let catalog = Catalog::build(
            vec![group("stations", &[30, 10]), group("weather", &[20])],
            &StubBuilder::default(),
        );

        assert_eq!(ids(&catalog), vec![30, 10, 20]);
        assert_eq!(catalog.get(20).unwrap().group_label, "weather");
        assert_eq!(catalog.get(10).unwrap().display_name, "SAT 10");
        assert_eq!(catalog.get(99).unwrap_err(), CatalogError::NotFound(99));
    }

    #[test]
    fn drops_objects_the_builder_rejects() {
        let builder = StubBuilder {
            reject: [2].into_iter().collect(),
        };
        let catalog = Catalog::build(vec![group("active", &[1, 2, 3])], &builder);

        assert_eq!(ids(&catalog), vec![1, 3]);
        assert!(catalog.get(2).is_err());
    }

    #[test]
    fn later_group_replaces_duplicate_in_place() {
        let catalog = Catalog::build(
            vec![group("active", &[1, 2, 3]), group("starlink", &[2])],
            &StubBuilder::default(),
        );

        assert_eq!(ids(&catalog), vec![1, 2, 3]);
        assert_eq!(catalog.get(2).unwrap().group_label, "starlink");
        assert_eq!(catalog.group_size("active"), 2);
        assert_eq!(catalog.group_size("starlink"), 1);
    }

    #[test]
    fn keeps_empty_groups() {
        let catalog = Catalog::build(
            vec![group("stations", &[1]), group("musson", &[])],
            &StubBuilder::default(),
        );

        assert_eq!(catalog.groups(), ["stations", "musson"]);
        assert_eq!(catalog.group_size("musson"), 0);
        assert_eq!(catalog.len(), 1);
    }
}
