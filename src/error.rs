use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use brick_mosaic::MosaicError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("No image uploaded")]
    NoImage,

    #[error("No mosaic generated")]
    NoMosaic,

    #[error("Image changed while the mosaic was being built")]
    Stale,

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConvertError> for ApiError {
    fn from(e: ConvertError) -> Self {
        match e {
            ConvertError::ImageLoad(msg) => ApiError::ImageLoad(msg),
            ConvertError::InvalidDimension(msg) => ApiError::InvalidDimension(msg),
        }
    }
}

/// Failures while turning image bytes into a mosaic.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
}

impl From<MosaicError> for ConvertError {
    fn from(e: MosaicError) -> Self {
        match e {
            MosaicError::InvalidDimension { .. } | MosaicError::EmptySource { .. } => {
                ConvertError::InvalidDimension(e.to_string())
            }
            // The decoder handed over a buffer that disagrees with its own size
            MosaicError::BufferMismatch { .. } => ConvertError::ImageLoad(e.to_string()),
        }
    }
}

impl From<image::ImageError> for ConvertError {
    fn from(e: image::ImageError) -> Self {
        ConvertError::ImageLoad(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

/// Failures talking to the document backend.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Document backend unreachable: {0}")]
    Transport(String),

    #[error("Document backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ExportError {
    fn from(e: reqwest::Error) -> Self {
        ExportError::Transport(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NoImage | ApiError::NoMosaic | ApiError::Stale => StatusCode::CONFLICT,
            ApiError::InvalidDimension(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ImageLoad(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Export(_) => StatusCode::BAD_GATEWAY,
            ApiError::Render(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
