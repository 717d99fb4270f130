//! Service boundaries of the pipeline.
//!
//! The remote generation, storage, and export services are collaborators,
//! specified only at these interfaces. `api::ApiClient` implements all three
//! over HTTP; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::api::types::{FontInfo, GenerationPayload};
use crate::engine::types::{GenerationRequest, UploadedDocument};
use crate::error::AppError;

/// Storage service: uploaded-document persistence and aggregation.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Current list of uploaded documents, service order.
    async fn list_files(&self) -> Result<Vec<UploadedDocument>, AppError>;

    /// Submit one document for upload.
    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<(), AppError>;

    /// Delete one document by id. "Not found" is the service's call, not
    /// idempotent success.
    async fn delete_file(&self, id: &str) -> Result<(), AppError>;

    /// Concatenation of all uploaded documents' content. Order and joiner are
    /// defined by the service.
    async fn aggregate_content(&self) -> Result<String, AppError>;
}

/// Generation service: word-cloud rendering and font analysis.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// One generation round-trip. Returns whichever transport encoding the
    /// service chose; decoding is the orchestrator's job.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationPayload, AppError>;

    /// Available fonts, including Korean-support analysis.
    async fn list_fonts(&self) -> Result<Vec<FontInfo>, AppError>;
}

/// Export service: analytical spreadsheet downloads keyed by an opaque,
/// caller-generated token.
#[async_trait]
pub trait ExportService: Send + Sync {
    async fn fetch_export(&self, token: &str) -> Result<Vec<u8>, AppError>;
}
