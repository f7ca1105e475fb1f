use crate::catalog::CatalogEntry;
use crate::config::{GroupingConfig, GroupingMode};

/// Decides which output groups an object belongs to.
#[derive(Debug, Clone)]
pub enum GroupAssigner {
    /// One output group per feed group; objects go where they were fetched from.
    Provenance { labels: Vec<String> },
    /// Output groups defined by name substrings; an object may land in several.
    Keywords { groups: Vec<(String, Vec<String>)> },
}

impl GroupAssigner {
    pub fn from_config(grouping: &GroupingConfig, feed_groups: &[String]) -> Self {
        match grouping.mode {
            GroupingMode::Provenance => GroupAssigner::Provenance {
                labels: feed_groups.to_vec(),
            },
            GroupingMode::Keywords => GroupAssigner::Keywords {
                groups: grouping
                    .keywords
                    .iter()
                    .map(|(label, words)| {
                        let words = words
                            .iter()
                            .map(|w| w.trim().to_lowercase())
                            .filter(|w| !w.is_empty())
                            .collect();
                        (label.clone(), words)
                    })
                    .collect(),
            },
        }
    }

    /// Every output label, including ones that end up empty.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            GroupAssigner::Provenance { labels } => labels.iter().map(String::as_str).collect(),
            GroupAssigner::Keywords { groups } => {
                groups.iter().map(|(label, _)| label.as_str()).collect()
            }
        }
    }

    /// Output labels for one entry, in label order, without duplicates.
    pub fn assign(&self, entry: &CatalogEntry) -> Vec<&str> {
        match self {
            GroupAssigner::Provenance { labels } => labels
                .iter()
                .filter(|l| **l == entry.group_label)
                .map(String::as_str)
                .take(1)
                .collect(),
            GroupAssigner::Keywords { groups } => {
                let name = entry.display_name.to_lowercase();
                groups
                    .iter()
                    .filter(|(_, words)| words.iter().any(|w| name.contains(w.as_str())))
                    .map(|(label, _)| label.as_str())
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::testing::FixedModel;
    use crate::propagation::StateVector;
    use std::collections::BTreeMap;

    fn entry(name: &str, group: &str) -> CatalogEntry {
        CatalogEntry {
            catalog_id: 1,
            display_name: name.into(),
            group_label: group.into(),
            model: Box::new(FixedModel(StateVector::failed(1))),
            raw_metadata: Default::default(),
        }
    }

    fn keywords(pairs: &[(&str, &[&str])]) -> GroupingConfig {
        GroupingConfig {
            mode: GroupingMode::Keywords,
            keywords: pairs
                .iter()
                .map(|(label, words)| {
                    (
                        label.to_string(),
                        words.iter().map(|w| w.to_string()).collect(),
                    )
                })
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn provenance_uses_feed_group() {
        let feed = vec!["stations".to_string(), "weather".to_string()];
        let assigner = GroupAssigner::from_config(&GroupingConfig::default(), &feed);

        assert_eq!(assigner.labels(), vec!["stations", "weather"]);
        assert_eq!(assigner.assign(&entry("NOAA 19", "weather")), vec!["weather"]);
        assert!(assigner.assign(&entry("X", "retired")).is_empty());
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let assigner = GroupAssigner::from_config(
            &keywords(&[("starlink", &["STARLINK"]), ("gps", &["navstar", "GPS "])]),
            &[],
        );

        assert_eq!(assigner.labels(), vec!["gps", "starlink"]);
        assert_eq!(
            assigner.assign(&entry("Starlink-1007", "active")),
            vec!["starlink"]
        );
        assert_eq!(assigner.assign(&entry("gps biir-2 (prn 13)", "gnss")), vec!["gps"]);
        assert!(assigner.assign(&entry("ISS (ZARYA)", "stations")).is_empty());
    }

    #[test]
    fn keywords_can_assign_several_groups() {
        let assigner = GroupAssigner::from_config(
            &keywords(&[("cosmos", &["COSMOS"]), ("debris", &["DEB"])]),
            &[],
        );
        assert_eq!(
            assigner.assign(&entry("COSMOS 2251 DEB", "cosmos-2251-debris")),
            vec!["cosmos", "debris"]
        );
    }
}
