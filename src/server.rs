//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::services::{Converter, ExportClient, InMemorySessionStore, RenderService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<InMemorySessionStore>,
    pub converter: Arc<Converter>,
    pub renderer: Arc<RenderService>,
    pub export_client: Arc<ExportClient>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<InMemorySessionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<Converter> {
    fn from_ref(state: &AppState) -> Self {
        state.converter.clone()
    }
}

impl FromRef<AppState> for Arc<RenderService> {
    fn from_ref(state: &AppState) -> Self {
        state.renderer.clone()
    }
}

impl FromRef<AppState> for Arc<ExportClient> {
    fn from_ref(state: &AppState) -> Self {
        state.export_client.clone()
    }
}

/// Create application state from an asset loader.
///
/// `BACKEND_URL` overrides the configured document backend.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader)
        .with_backend_url(std::env::var("BACKEND_URL").ok());
    create_app_state_with_config(config)
}

/// Create application state from an already loaded configuration.
pub fn create_app_state_with_config(config: AppConfig) -> anyhow::Result<AppState> {
    let palette = config
        .build_palette()
        .map_err(|e| anyhow::anyhow!("Invalid palette in configuration: {e}"))?;
    let limits = &config.limits;
    let converter = Arc::new(Converter::new(
        palette,
        limits.max_grid_width,
        limits.max_grid_cells,
    ));
    let renderer = Arc::new(RenderService::new(
        limits.max_cell_size,
        limits.max_preview_pixels,
        config.export.optimize_png,
    ));
    let sessions = Arc::new(InMemorySessionStore::with_limits(
        limits.max_sessions,
        Duration::from_secs(limits.session_idle_secs),
    ));
    let export_client = Arc::new(
        ExportClient::new(&config.export)
            .map_err(|e| anyhow::anyhow!("Failed to create export client: {e}"))?,
    );

    tracing::debug!(
        colors = converter.palette().len(),
        backend_url = %export_client.base_url(),
        "Application state created"
    );

    Ok(AppState {
        config: Arc::new(config),
        sessions,
        converter,
        renderer,
        export_client,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    type Store = InMemorySessionStore;

    let max_upload = state.config.limits.max_upload_bytes;

    Router::new()
        // Catalog
        .route("/api/palette", get(api::handle_palette))
        .route("/api/parts", get(api::handle_parts))
        // Sessions
        .route("/api/sessions", post(api::handle_create_session::<Store>))
        .route(
            "/api/sessions/:id",
            get(api::handle_get_session::<Store>).delete(api::handle_delete_session::<Store>),
        )
        .route(
            "/api/sessions/:id/settings",
            put(api::handle_update_settings::<Store>),
        )
        .route(
            "/api/sessions/:id/image",
            put(api::handle_upload_image::<Store>)
                .delete(api::handle_reset_image::<Store>)
                .layer(DefaultBodyLimit::max(max_upload)),
        )
        // Mosaic
        .route(
            "/api/sessions/:id/mosaic",
            post(api::handle_build_mosaic::<Store>).get(api::handle_get_mosaic::<Store>),
        )
        .route("/api/sessions/:id/preview.png", get(api::handle_preview::<Store>))
        .route("/api/sessions/:id/parts.csv", get(api::handle_parts_csv::<Store>))
        // Export
        .route(
            "/api/sessions/:id/instructions.pdf",
            post(api::handle_instructions_pdf::<Store>),
        )
        .route(
            "/api/sessions/:id/catalog.xml",
            post(api::handle_catalog_xml::<Store>),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Router plus the OpenAPI document and Swagger UI.
pub fn build_app(state: AppState) -> Router {
    build_router(state).merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::ApiDoc::openapi()),
    )
}
