use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{CatalogPart, SessionId};
use crate::services::{exporter, Converter, MosaicDto, PartDto, RenderService, SessionStore};

/// Query parameters for mosaic generation
#[derive(Debug, Deserialize)]
pub struct BuildQuery {
    /// Bricks across; defaults to the session setting
    #[serde(default)]
    pub width: Option<String>,
}

/// Query parameters for the preview image
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub cell_size: Option<String>,
}

/// Query parameters for the parts CSV
#[derive(Debug, Deserialize)]
pub struct PartQuery {
    #[serde(default)]
    pub part: Option<String>,
}

/// Response from mosaic generation
#[derive(Debug, Serialize, ToSchema)]
pub struct BuildResponse {
    pub width: u32,
    pub height: u32,
    pub total_bricks: usize,
    /// Sorted by descending count
    pub parts: Vec<PartDto>,
}

/// Generate the mosaic from the uploaded image
///
/// On any failure the previous mosaic stays in place.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/mosaic",
    responses(
        (status = 200, description = "Mosaic generated", body = BuildResponse),
        (status = 400, description = "Invalid grid width"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No image uploaded, or image replaced during the build"),
    ),
    params(
        ("id" = String, Path, description = "Session id"),
        ("width" = Option<u32>, Query, description = "Bricks across (default: session setting)"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_build_mosaic<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(converter): State<Arc<Converter>>,
    Path(id): Path<String>,
    Query(query): Query<BuildQuery>,
) -> Result<Json<BuildResponse>, ApiError> {
    let id = SessionId::new(id);
    let session = store.get(&id).await?;

    let width = match query.width.as_deref() {
        Some(raw) => converter.parse_width(raw)?,
        None => converter.validate_width(session.settings.grid_width as f64)?,
    };
    let source = session.source.ok_or(ApiError::NoImage)?;

    tracing::info!(session_id = %id, width, "Mosaic build requested");

    let conversion = Arc::new(converter.convert_blocking(source.clone(), width).await?);

    store
        .commit_conversion(&id, &source, width, conversion.clone())
        .await?;

    Ok(Json(BuildResponse {
        width: conversion.mosaic().width(),
        height: conversion.mosaic().height(),
        total_bricks: conversion.total_bricks(),
        parts: exporter::parts_dto(conversion.parts()),
    }))
}

/// Get the full mosaic grid
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/mosaic",
    responses(
        (status = 200, description = "Mosaic grid, map[y][x]", body = MosaicDto),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No mosaic generated"),
    ),
    params(("id" = String, Path, description = "Session id")),
    tag = "Mosaic"
)]
pub async fn handle_get_mosaic<S: SessionStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<MosaicDto>, ApiError> {
    let session = store.get(&SessionId::new(id)).await?;
    let conversion = session.conversion.ok_or(ApiError::NoMosaic)?;
    Ok(Json(MosaicDto::from(conversion.mosaic())))
}

/// Get the rendered preview
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/preview.png",
    responses(
        (status = 200, description = "PNG image", content_type = "image/png"),
        (status = 400, description = "Invalid cell size"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No mosaic generated"),
    ),
    params(
        ("id" = String, Path, description = "Session id"),
        ("cell_size" = Option<u32>, Query, description = "Pixels per brick (default: session setting)"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_preview<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(renderer): State<Arc<RenderService>>,
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, ApiError> {
    let session = store.get(&SessionId::new(id)).await?;

    let cell_size = match query.cell_size.as_deref() {
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            ApiError::InvalidDimension(format!("cell size '{raw}' is not a whole number"))
        })?,
        None => session.settings.cell_size,
    };
    let conversion = session.conversion.ok_or(ApiError::NoMosaic)?;

    let png_bytes = renderer.render_png(conversion, cell_size).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, png_bytes.len().to_string()),
        ],
        png_bytes,
    )
        .into_response())
}

/// Download the parts list as CSV
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/parts.csv",
    responses(
        (status = 200, description = "Parts list", content_type = "text/csv"),
        (status = 400, description = "Unknown part"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No mosaic generated"),
    ),
    params(
        ("id" = String, Path, description = "Session id"),
        ("part" = Option<String>, Query, description = "Catalog part id (default: session setting)"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_parts_csv<S: SessionStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Query(query): Query<PartQuery>,
) -> Result<Response, ApiError> {
    let session = store.get(&SessionId::new(id)).await?;
    let part = resolve_part(query.part.as_deref(), session.settings.part)?;
    let conversion = session.conversion.ok_or(ApiError::NoMosaic)?;

    let csv = exporter::parts_csv(conversion.parts(), part);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"parts.csv\""),
        ],
        csv,
    )
        .into_response())
}

pub(crate) fn resolve_part(raw: Option<&str>, default: CatalogPart) -> Result<CatalogPart, ApiError> {
    match raw {
        Some(raw) => raw.parse().map_err(ApiError::BadRequest),
        None => Ok(default),
    }
}
