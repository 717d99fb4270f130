use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::types::*;
use crate::config::ClientConfig;
use crate::engine::ports::{ExportService, GenerationService, StorageService};
use crate::engine::types::{GenerationRequest, UploadedDocument};
use crate::error::AppError;

// ============================================================================
// Helper
// ============================================================================

fn transport_err(e: impl std::fmt::Display) -> AppError {
    AppError::Transport(e.to_string())
}

// ============================================================================
// ApiClient
// ============================================================================

/// HTTP client wrapping every endpoint of the word-cloud backend.
/// One base URL serves generation, storage, and export.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new `ApiClient`. The underlying `reqwest::Client` carries the
    /// configured request timeout — the only bound on an in-flight generation.
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build reqwest client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    // --------------------------------------------------------------------
    // Private HTTP helpers
    // --------------------------------------------------------------------

    fn endpoint(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/api{}", self.base_url, path))
    }

    /// Send a request, check the status code, and deserialize the JSON response.
    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let resp = req.send().await.map_err(transport_err)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Transport(format!(
                "backend error ({}): {}",
                status, body
            )));
        }
        resp.json().await.map_err(transport_err)
    }

    /// Send a request whose answer is a `{ status, message? }` envelope.
    /// A reported `status` other than `success` becomes `reject(message)` —
    /// the service's verdict, propagated with its own message.
    async fn send_status(
        &self,
        req: reqwest::RequestBuilder,
        reject: fn(String) -> AppError,
    ) -> Result<(), AppError> {
        let resp = req.send().await.map_err(transport_err)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport_err)?;

        if let Ok(envelope) = serde_json::from_str::<StatusEnvelope>(&body) {
            if envelope.status == "success" {
                return Ok(());
            }
            return Err(reject(envelope.message.unwrap_or_else(|| {
                format!("service reported status '{}'", envelope.status)
            })));
        }

        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "backend error ({}): {}",
                status, body
            )));
        }
        Err(AppError::Decode(format!(
            "unexpected status envelope: {}",
            body
        )))
    }

    // --------------------------------------------------------------------
    // Health
    // --------------------------------------------------------------------

    /// `GET /api/health` — basic backend liveness check.
    pub async fn health(&self) -> Result<HealthResponse, AppError> {
        self.send_json(self.endpoint(reqwest::Method::GET, "/health"))
            .await
    }
}

// ============================================================================
// Service trait implementations
// ============================================================================

#[async_trait]
impl StorageService for ApiClient {
    /// `GET /api/uploaded-files`
    async fn list_files(&self) -> Result<Vec<UploadedDocument>, AppError> {
        let resp: FileListResponse = self
            .send_json(self.endpoint(reqwest::Method::GET, "/uploaded-files"))
            .await?;
        Ok(resp
            .data
            .into_iter()
            .map(|entry| UploadedDocument {
                id: entry.file_id,
                filename: entry.filename,
            })
            .collect())
    }

    /// `POST /api/upload-file` (multipart, field `file`)
    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<(), AppError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let req = self
            .endpoint(reqwest::Method::POST, "/upload-file")
            .multipart(form);
        self.send_status(req, AppError::UploadRejected).await
    }

    /// `DELETE /api/delete-file/{file_id}`
    async fn delete_file(&self, id: &str) -> Result<(), AppError> {
        let path = format!("/delete-file/{}", id);
        self.send_status(
            self.endpoint(reqwest::Method::DELETE, &path),
            AppError::DeleteRejected,
        )
        .await
    }

    /// `GET /api/all-files-content`
    async fn aggregate_content(&self) -> Result<String, AppError> {
        let resp: ContentResponse = self
            .send_json(self.endpoint(reqwest::Method::GET, "/all-files-content"))
            .await?;
        if resp.status != "success" {
            return Err(AppError::Transport(resp.message.unwrap_or_else(|| {
                format!("aggregate content reported status '{}'", resp.status)
            })));
        }
        Ok(resp.data.map(|d| d.content).unwrap_or_default())
    }
}

#[async_trait]
impl GenerationService for ApiClient {
    /// `POST /api/generate` — answers either raw image bytes or a JSON
    /// envelope; both are passed through undecoded for the orchestrator.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationPayload, AppError> {
        let req = self
            .endpoint(reqwest::Method::POST, "/generate")
            .json(request);
        let resp = req.send().await.map_err(transport_err)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            // FastAPI-style failures carry `detail`; keep the raw body otherwise.
            let diagnostic = serde_json::from_str::<GenerateEnvelope>(&body)
                .ok()
                .and_then(|e| e.detail.or(e.error))
                .unwrap_or(body);
            return Err(AppError::Transport(format!(
                "generation failed ({}): {}",
                status, diagnostic
            )));
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if content_type.contains("application/json") {
            let envelope = resp.json::<GenerateEnvelope>().await.map_err(transport_err)?;
            Ok(GenerationPayload::Envelope(envelope))
        } else {
            let bytes = resp.bytes().await.map_err(transport_err)?;
            Ok(GenerationPayload::Image(bytes.to_vec()))
        }
    }

    /// `GET /api/fonts`
    async fn list_fonts(&self) -> Result<Vec<FontInfo>, AppError> {
        let resp: FontsResponse = self
            .send_json(self.endpoint(reqwest::Method::GET, "/fonts"))
            .await?;
        Ok(resp.fonts)
    }
}

#[async_trait]
impl ExportService for ApiClient {
    /// `GET /api/download/{token}` — binary spreadsheet payload. The token is
    /// caller-generated; every failure on this path is `ExportUnavailable`.
    async fn fetch_export(&self, token: &str) -> Result<Vec<u8>, AppError> {
        let path = format!("/download/{}", token);
        let resp = self
            .endpoint(reqwest::Method::GET, &path)
            .send()
            .await
            .map_err(|e| AppError::ExportUnavailable(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::ExportUnavailable(format!(
                "export service answered {}: {}",
                status, body
            )));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AppError::ExportUnavailable(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
