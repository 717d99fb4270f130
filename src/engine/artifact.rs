use std::sync::Arc;

use crate::engine::ports::ExportService;
use crate::engine::types::SharedResult;
use crate::error::AppError;

/// Exposes the in-memory image artifact for direct save and brokers the
/// separately-keyed fetch of the analytical export.
///
/// The export token is caller-generated (by convention a timestamp) and is
/// NOT bound to the currently displayed result — the export service decides
/// what the token resolves to.
pub struct ArtifactDownloadMediator {
    export: Arc<dyn ExportService>,
    result: SharedResult,
}

impl ArtifactDownloadMediator {
    pub fn new(export: Arc<dyn ExportService>, result: SharedResult) -> Self {
        Self { export, result }
    }

    /// Literal bytes of the most recent result's image. Same bytes on every
    /// call until superseded by the next successful generation.
    pub fn image_artifact(&self) -> Result<Vec<u8>, AppError> {
        self.result
            .read()
            .expect("result cell poisoned")
            .as_ref()
            .map(|r| r.image_bytes.clone())
            .ok_or(AppError::NoArtifactAvailable)
    }

    /// Fetch the analytical export for an opaque token. Not gated by
    /// generation state in any way.
    pub async fn export_artifact(&self, token: &str) -> Result<Vec<u8>, AppError> {
        tracing::debug!(token, "fetching analytical export");
        self.export.fetch_export(token).await
    }

    /// Timestamp token in the export endpoint's conventional shape.
    pub fn export_token_now() -> String {
        chrono::Local::now().format("%Y-%m-%dT%H-%M-%S").to_string()
    }
}
