use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Geometry,
    #[schema(value_type = Object)]
    pub properties: Map<String, Value>,
}

/// Point geometry, `[longitude, latitude]` in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(value_type = Vec<f64>)]
    pub coordinates: [f64; 2],
}

impl Geometry {
    pub fn point(longitude_deg: f64, latitude_deg: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [longitude_deg, latitude_deg],
        }
    }
}

/// One output unit: the collection for a single output group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCollection {
    pub label: String,
    pub collection: FeatureCollection,
}
