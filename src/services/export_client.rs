use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;

use crate::error::ExportError;
use crate::models::{CatalogLayout, ExportConfig};
use crate::services::exporter::{CatalogPayload, InstructionsPayload};

/// Longest error body kept from a failing backend response
const MAX_ERROR_BODY: usize = 512;

/// Document returned by the backend
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// Content type reported by the backend, if any
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// HTTP client for the document backend that lays out PDF instructions and
/// catalog XML.
///
/// Calls never touch session state, so a failed export can simply be retried.
pub struct ExportClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExportClient {
    pub fn new(config: &ExportConfig) -> Result<Self, ExportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("brickify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request printable build instructions.
    pub async fn instructions_pdf(
        &self,
        payload: &InstructionsPayload,
    ) -> Result<ExportedDocument, ExportError> {
        self.post("/api/generate_pdf", &[], payload).await
    }

    /// Request a catalog wanted-list in the given layout.
    pub async fn catalog_xml(
        &self,
        payload: &CatalogPayload,
        layout: CatalogLayout,
    ) -> Result<ExportedDocument, ExportError> {
        self.post(
            "/api/generate_bricklink_xml",
            &[("type", layout.as_str())],
            payload,
        )
        .await
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        payload: &T,
    ) -> Result<ExportedDocument, ExportError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(url = %url, "Sending export request");

        let response = self
            .client
            .post(&url)
            .query(query)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Document backend request failed");
                ExportError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            tracing::warn!(url = %url, status = status.as_u16(), "Document backend returned an error");
            return Err(ExportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        tracing::info!(url = %url, bytes = body.len(), "Received exported document");

        Ok(ExportedDocument { content_type, body })
    }
}
