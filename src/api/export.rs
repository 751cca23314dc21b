use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::mosaic::resolve_part;
use super::sessions::validate_step_height;
use crate::error::ApiError;
use crate::models::{CatalogLayout, CatalogPart, SessionId};
use crate::services::{exporter, ExportClient, ExportedDocument, SessionStore};

/// Options for build instructions; omitted fields use the session settings
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct InstructionsRequest {
    pub part_id: Option<CatalogPart>,
    /// Rows per instruction step
    pub step_height: Option<u32>,
}

/// Query parameters for the catalog XML
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// `round` or `tile`; defaults to the layout of the part
    #[serde(rename = "type", default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub part: Option<String>,
}

/// Generate printable build instructions
///
/// Forwards the mosaic and parts list to the document backend and streams
/// back the PDF it produces.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/instructions.pdf",
    request_body(content = InstructionsRequest, content_type = "application/json", description = "Optional; omitted fields use the session settings"),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 400, description = "Malformed request body or step height"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No mosaic generated"),
        (status = 502, description = "Document backend failed"),
    ),
    params(("id" = String, Path, description = "Session id")),
    tag = "Export"
)]
pub async fn handle_instructions_pdf<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(client): State<Arc<ExportClient>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = SessionId::new(id);
    let session = store.get(&id).await?;
    let request = parse_instructions_request(&body)?;

    let part = request.part_id.unwrap_or(session.settings.part);
    let step_height =
        validate_step_height(request.step_height.unwrap_or(session.settings.step_height))?;
    let conversion = session.conversion.ok_or(ApiError::NoMosaic)?;

    tracing::info!(session_id = %id, part = %part, step_height, "Requesting build instructions");

    let payload = exporter::instructions_payload(&conversion, part, step_height);
    let document = client.instructions_pdf(&payload).await?;

    Ok(document_response(document, "application/pdf", "instructions.pdf"))
}

/// An empty body means all defaults; anything else must be a valid request.
fn parse_instructions_request(body: &[u8]) -> Result<InstructionsRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(InstructionsRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("invalid instructions request: {e}")))
}

/// Generate a catalog wanted-list
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/catalog.xml",
    responses(
        (status = 200, description = "XML document", content_type = "application/xml"),
        (status = 400, description = "Unknown layout or part"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "No mosaic generated"),
        (status = 502, description = "Document backend failed"),
    ),
    params(
        ("id" = String, Path, description = "Session id"),
        ("type" = Option<String>, Query, description = "'round' or 'tile' (default: from part)"),
        ("part" = Option<String>, Query, description = "Catalog part id (default: session setting)"),
    ),
    tag = "Export"
)]
pub async fn handle_catalog_xml<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(client): State<Arc<ExportClient>>,
    Path(id): Path<String>,
    Query(query): Query<CatalogQuery>,
) -> Result<Response, ApiError> {
    let id = SessionId::new(id);
    let session = store.get(&id).await?;

    let part = resolve_part(query.part.as_deref(), session.settings.part)?;
    let layout = match query.layout.as_deref().map(str::trim) {
        Some("round") => CatalogLayout::Round,
        Some("tile") => CatalogLayout::Tile,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "unknown layout '{other}' (expected round or tile)"
            )))
        }
        None => part.layout(),
    };
    let conversion = session.conversion.ok_or(ApiError::NoMosaic)?;

    tracing::info!(session_id = %id, part = %part, layout = %layout, "Requesting catalog XML");

    let payload = exporter::catalog_payload(&conversion, part);
    let document = client.catalog_xml(&payload, layout).await?;

    Ok(document_response(
        document,
        "application/xml",
        &format!("catalog_{layout}.xml"),
    ))
}

fn document_response(document: ExportedDocument, default_type: &str, filename: &str) -> Response {
    let content_type = document
        .content_type
        .unwrap_or_else(|| default_type.to_string());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        document.body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instructions_request() {
        let request = parse_instructions_request(b"").unwrap();
        assert!(request.part_id.is_none() && request.step_height.is_none());
        assert!(parse_instructions_request(b" \r\n").unwrap().part_id.is_none());

        let request = parse_instructions_request(br#"{"part_id": "35381"}"#).unwrap();
        assert_eq!(request.part_id, Some(CatalogPart::Plate));
        assert!(request.step_height.is_none());

        assert!(matches!(
            parse_instructions_request(b"{\"step_height\": "),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            parse_instructions_request(b"[]"),
            Err(ApiError::BadRequest(_))
        ));
    }
}
