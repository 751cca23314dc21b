//! Mock document backend for the export endpoints.

use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const PDF_BYTES: &[u8] = b"%PDF-1.4 test instructions";
pub const XML_BODY: &str = "<INVENTORY><ITEM><ITEMID>4073</ITEMID></ITEM></INVENTORY>";

/// Wrapper around wiremock MockServer standing in for the document backend
pub struct MockBackend {
    pub server: MockServer,
}

impl MockBackend {
    /// Start a new mock backend
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to configure as `export.backend_url`
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Serve a PDF from `POST /api/generate_pdf`
    pub async fn mock_pdf(&self) {
        Mock::given(method("POST"))
            .and(path("/api/generate_pdf"))
            .and(header("content-type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(PDF_BYTES)
                    .insert_header("content-type", "application/pdf"),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve XML from `POST /api/generate_bricklink_xml?type=<layout>`
    pub async fn mock_xml(&self, layout: &str) {
        Mock::given(method("POST"))
            .and(path("/api/generate_bricklink_xml"))
            .and(query_param("type", layout))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(XML_BODY, "application/xml"),
            )
            .mount(&self.server)
            .await;
    }

    /// Fail the PDF endpoint once with `status`, then fall through to later mocks
    pub async fn mock_pdf_failure_once(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/generate_pdf"))
            .respond_with(ResponseTemplate::new(status).set_body_string("backend exploded"))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Requests the backend has received so far
    pub async fn received_json(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}
