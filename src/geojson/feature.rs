use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::catalog::{Catalog, CatalogEntry};
use crate::classify::{classify, GroupAssigner};
use crate::geojson::types::{Feature, FeatureCollection, Geometry, GroupCollection};
use crate::position::{Evaluator, PositionSample};

/// JSON number for finite values, explicit null otherwise.
pub fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn optional_number(value: Option<f64>) -> Value {
    value.map_or(Value::Null, number)
}

/// Shape one sample as a point feature. Samples without a complete,
/// finite coordinate pair produce no feature.
pub fn to_feature(
    entry: &CatalogEntry,
    sample: &PositionSample,
    group: &str,
    metadata_fields: Option<&[String]>,
) -> Option<Feature> {
    let (longitude_deg, latitude_deg) = sample.coordinates()?;

    let mut properties = Map::new();
    for (key, value) in &entry.raw_metadata {
        if metadata_fields.is_some_and(|fields| !fields.iter().any(|f| f == key)) {
            continue;
        }
        properties.insert(key.clone(), value.clone());
    }

    properties.insert("norad_id".into(), Value::from(entry.catalog_id));
    properties.insert("name".into(), Value::from(entry.display_name.as_str()));
    properties.insert("group".into(), Value::from(group));
    properties.insert("longitude_deg".into(), number(longitude_deg));
    properties.insert("latitude_deg".into(), number(latitude_deg));
    properties.insert("alt_km".into(), optional_number(sample.altitude_km));
    properties.insert(
        "orbit_class".into(),
        Value::from(classify(sample.altitude_km).to_string()),
    );
    properties.insert(
        "timestamp".into(),
        Value::from(sample.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    );
    properties.insert("speed_km_s".into(), optional_number(sample.speed_km_s));

    Some(Feature {
        kind: "Feature".to_string(),
        geometry: Geometry::point(longitude_deg, latitude_deg),
        properties,
    })
}

/// Evaluate the catalog at `at` and sort the features into output groups.
///
/// Every label the assigner knows gets a collection, even when empty.
/// Objects whose propagation failed are left out of all collections.
pub fn build_collections(
    catalog: &Catalog,
    evaluator: &Evaluator,
    assigner: &GroupAssigner,
    at: DateTime<Utc>,
    metadata_fields: Option<&[String]>,
) -> Vec<GroupCollection> {
    let labels = assigner.labels();
    let mut buckets: Vec<Vec<Feature>> = labels.iter().map(|_| Vec::new()).collect();
    let mut failed = 0;

    for (entry, sample) in evaluator.evaluate_all(catalog, at) {
        if !sample.is_ok() {
            log::debug!(
                "{} ({}): no position at {}: {:?}",
                entry.catalog_id,
                entry.display_name,
                at,
                sample.status
            );
            failed += 1;
            continue;
        }
        for group in assigner.assign(entry) {
            let Some(slot) = labels.iter().position(|l| *l == group) else {
                continue;
            };
            if let Some(feature) = to_feature(entry, &sample, group, metadata_fields) {
                buckets[slot].push(feature);
            }
        }
    }

    if failed > 0 {
        log::info!("{} objects failed to propagate at {}", failed, at);
    }

    labels
        .into_iter()
        .zip(buckets)
        .map(|(label, features)| GroupCollection {
            label: label.to_string(),
            collection: FeatureCollection::new(features),
        })
        .collect()
}

/// Evaluate only the members of one output group at `at`.
///
/// Produces the same collection as the matching entry of
/// [`build_collections`] without propagating objects outside the group.
pub fn build_collection(
    catalog: &Catalog,
    evaluator: &Evaluator,
    assigner: &GroupAssigner,
    label: &str,
    at: DateTime<Utc>,
    metadata_fields: Option<&[String]>,
) -> FeatureCollection {
    let members: Vec<&CatalogEntry> = catalog
        .all_entries()
        .iter()
        .filter(|e| assigner.assign(e).contains(&label))
        .collect();

    let features = evaluator
        .evaluate_selected(&members, at)
        .into_iter()
        .filter(|(_, sample)| sample.is_ok())
        .filter_map(|(entry, sample)| to_feature(entry, &sample, label, metadata_fields))
        .collect();
    FeatureCollection::new(features)
}
