use axum::{routing::get, routing::post, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::{Catalog, CatalogLoader};
use crate::classify::GroupAssigner;
use crate::config::Config;
use crate::geojson::{build_collection, build_collections, FeatureCollection, GroupCollection};
use crate::position::Evaluator;

use super::api::catalog as catalog_handlers;
use super::api::groups as group_handlers;
use super::api::satellites as satellite_handlers;
use super::api_doc::ApiDoc;

#[derive(Clone)]
pub struct AppState {
    /// Swapped wholesale on refresh; readers keep the snapshot they cloned.
    pub catalog: Arc<RwLock<Arc<Catalog>>>,
    pub loader: Arc<CatalogLoader>,
    pub evaluator: Evaluator,
    pub assigner: Arc<GroupAssigner>,
    pub metadata_fields: Option<Arc<[String]>>,
}

impl AppState {
    pub fn new(config: &Config, loader: Arc<CatalogLoader>, catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            loader,
            evaluator: Evaluator::new(config.evaluation.frame, config.evaluation.workers),
            assigner: Arc::new(GroupAssigner::from_config(
                &config.grouping,
                &config.feed.groups,
            )),
            metadata_fields: config.output.metadata_fields.as_deref().map(Arc::from),
        }
    }

    pub async fn catalog(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    pub fn collections(&self, catalog: &Catalog, at: DateTime<Utc>) -> Vec<GroupCollection> {
        build_collections(
            catalog,
            &self.evaluator,
            &self.assigner,
            at,
            self.metadata_fields.as_deref(),
        )
    }

    pub fn collection(
        &self,
        catalog: &Catalog,
        label: &str,
        at: DateTime<Utc>,
    ) -> FeatureCollection {
        build_collection(
            catalog,
            &self.evaluator,
            &self.assigner,
            label,
            at,
            self.metadata_fields.as_deref(),
        )
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Query endpoints
        .route("/api/groups", get(group_handlers::list_groups))
        .route("/api/groups/{group}", get(group_handlers::get_group))
        .route("/api/satellites/{id}", get(satellite_handlers::get_satellite))
        // Catalog maintenance
        .route("/api/catalog/refresh", post(catalog_handlers::refresh))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(
    config: &Config,
    loader: Arc<CatalogLoader>,
    catalog: Catalog,
) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let app = router(AppState::new(config, loader, catalog));

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
