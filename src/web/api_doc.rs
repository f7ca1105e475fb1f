use utoipa::OpenApi;

use super::api::catalog::RefreshResponse;
use super::api::error::ErrorResponse;
use super::api::groups::GroupSummary;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::groups::list_groups,
        super::api::groups::get_group,
        super::api::satellites::get_satellite,
        super::api::catalog::refresh,
    ),
    components(
        schemas(
            GroupSummary,
            RefreshResponse,
            ErrorResponse,
            crate::geojson::FeatureCollection,
            crate::geojson::Feature,
            crate::geojson::Geometry,
            crate::position::PositionSample,
            crate::position::SampleStatus,
            crate::position::FailureReason,
        )
    ),
    info(
        title = "Sat-O-Map API",
        description = "Satellite positions as GeoJSON, grouped by feed or name keyword",
        version = "0.1.0"
    ),
    tags(
        (name = "groups", description = "Grouped feature collections"),
        (name = "satellites", description = "Single-object positions"),
        (name = "catalog", description = "Catalog maintenance")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/api/groups",
            "/api/groups/{group}",
            "/api/satellites/{id}",
            "/api/catalog/refresh",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
