use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, CatalogPart, Session, SessionId, SessionSettings};
use crate::services::{decode_image, Converter, RenderService, SessionStore};

/// Source image dimensions
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// Summary of the current mosaic
#[derive(Debug, Serialize, ToSchema)]
pub struct MosaicSummary {
    pub width: u32,
    pub height: u32,
    /// Total bricks needed
    pub total_bricks: usize,
    /// Number of distinct colors
    pub colors: usize,
}

/// Session state as returned by the session endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: String,
    pub settings: SessionSettings,
    /// Present once an image is uploaded
    pub image: Option<ImageInfo>,
    /// Present once a mosaic is generated
    pub mosaic: Option<MosaicSummary>,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.to_string(),
            settings: session.settings,
            image: session.source.as_ref().map(|s| ImageInfo {
                width: s.width,
                height: s.height,
            }),
            mosaic: session.conversion.as_ref().map(|c| MosaicSummary {
                width: c.mosaic().width(),
                height: c.mosaic().height(),
                total_bricks: c.total_bricks(),
                colors: c.parts().len(),
            }),
            created_at: session.created_at.to_rfc3339(),
            updated_at: session.updated_at.to_rfc3339(),
        }
    }
}

/// Response from session creation
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSessionResponse {
    /// Id to use in all further session requests
    pub id: String,
}

/// Partial settings update; omitted fields keep their value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SettingsUpdate {
    pub grid_width: Option<u32>,
    pub cell_size: Option<u32>,
    pub part: Option<CatalogPart>,
    pub step_height: Option<u32>,
}

/// Start a new conversion session
#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse),
    ),
    tag = "Sessions"
)]
pub async fn handle_create_session<S: SessionStore>(
    State(config): State<Arc<AppConfig>>,
    State(store): State<Arc<S>>,
) -> Result<impl IntoResponse, ApiError> {
    let session = store
        .create(SessionSettings::from(&config.defaults))
        .await?;

    tracing::info!(session_id = %session.id, "Session created");

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            id: session.id.to_string(),
        }),
    ))
}

/// Get session settings and what has been produced so far
#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    responses(
        (status = 200, description = "Session state", body = SessionResponse),
        (status = 404, description = "Session not found"),
    ),
    params(("id" = String, Path, description = "Session id")),
    tag = "Sessions"
)]
pub async fn handle_get_session<S: SessionStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = store.get(&SessionId::new(id)).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// Change session settings
///
/// Settings are used as defaults by later build, preview and export calls;
/// an existing mosaic is not rebuilt.
#[utoipa::path(
    put,
    path = "/api/sessions/{id}/settings",
    request_body = SettingsUpdate,
    responses(
        (status = 200, description = "Updated session", body = SessionResponse),
        (status = 400, description = "Value out of range"),
        (status = 404, description = "Session not found"),
    ),
    params(("id" = String, Path, description = "Session id")),
    tag = "Sessions"
)]
pub async fn handle_update_settings<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(converter): State<Arc<Converter>>,
    State(renderer): State<Arc<RenderService>>,
    Path(id): Path<String>,
    JsonExtractor(update): JsonExtractor<SettingsUpdate>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = SessionId::new(id);
    let mut settings = store.get(&id).await?.settings;

    if let Some(width) = update.grid_width {
        settings.grid_width = converter.validate_width(width as f64)?;
    }
    if let Some(cell_size) = update.cell_size {
        settings.cell_size = renderer.validate_cell_size(cell_size)?;
    }
    if let Some(part) = update.part {
        settings.part = part;
    }
    if let Some(step_height) = update.step_height {
        settings.step_height = validate_step_height(step_height)?;
    }

    let session = store.update_settings(&id, settings).await?;
    tracing::debug!(session_id = %id, settings = ?session.settings, "Settings updated");
    Ok(Json(SessionResponse::from(&session)))
}

/// Delete a session and everything it holds
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Session not found"),
    ),
    params(("id" = String, Path, description = "Session id")),
    tag = "Sessions"
)]
pub async fn handle_delete_session<S: SessionStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if store.remove(&SessionId::new(id.clone())).await? {
        tracing::info!(session_id = %id, "Session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

/// Upload the source photo
///
/// The body is the raw image file. Any previously generated mosaic is
/// discarded.
#[utoipa::path(
    put,
    path = "/api/sessions/{id}/image",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image stored", body = SessionResponse),
        (status = 404, description = "Session not found"),
        (status = 413, description = "Image too large"),
        (status = 422, description = "Image could not be decoded"),
    ),
    params(("id" = String, Path, description = "Session id")),
    tag = "Sessions"
)]
pub async fn handle_upload_image<S: SessionStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = SessionId::new(id);
    // Fail fast on unknown sessions before decoding
    store.get(&id).await?;

    let size = body.len();
    let source = tokio::task::spawn_blocking(move || decode_image(&body))
        .await
        .map_err(|e| ApiError::Internal(format!("Decode task failed: {e}")))??;

    tracing::info!(
        session_id = %id,
        bytes = size,
        width = source.width,
        height = source.height,
        "Image uploaded"
    );

    let session = store.set_source(&id, source).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// Reset: remove the image and mosaic, keep settings
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}/image",
    responses(
        (status = 200, description = "Session reset", body = SessionResponse),
        (status = 404, description = "Session not found"),
    ),
    params(("id" = String, Path, description = "Session id")),
    tag = "Sessions"
)]
pub async fn handle_reset_image<S: SessionStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = store.reset(&SessionId::new(id)).await?;
    tracing::info!(session_id = %session.id, "Session reset");
    Ok(Json(SessionResponse::from(&session)))
}

pub(crate) fn validate_step_height(step_height: u32) -> Result<u32, ApiError> {
    if step_height == 0 {
        return Err(ApiError::InvalidDimension(
            "step height must be at least 1".to_string(),
        ));
    }
    Ok(step_height)
}
