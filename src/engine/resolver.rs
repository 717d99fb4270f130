use std::sync::Arc;

use crate::engine::ports::StorageService;
use crate::error::AppError;

/// Decides, per generation attempt, whether to use literal input text or the
/// storage service's aggregated document content.
pub struct SourceResolver {
    storage: Arc<dyn StorageService>,
}

impl SourceResolver {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }

    /// Manual text (non-empty after trimming) always wins, returned verbatim.
    /// Otherwise the storage aggregate is used as-is. An empty aggregate is
    /// `NoContentAvailable` — an empty-text request is never constructed.
    pub async fn resolve(&self, manual_text: &str) -> Result<String, AppError> {
        if !manual_text.trim().is_empty() {
            return Ok(manual_text.to_string());
        }

        let aggregate = self.storage.aggregate_content().await?;
        if aggregate.trim().is_empty() {
            tracing::debug!("no manual text and empty aggregate");
            return Err(AppError::NoContentAvailable);
        }
        Ok(aggregate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::UploadedDocument;
    use async_trait::async_trait;

    struct FakeStorage {
        aggregate: String,
    }

    #[async_trait]
    impl StorageService for FakeStorage {
        async fn list_files(&self) -> Result<Vec<UploadedDocument>, AppError> {
            Ok(Vec::new())
        }
        async fn upload_file(&self, _filename: &str, _bytes: Vec<u8>) -> Result<(), AppError> {
            Ok(())
        }
        async fn delete_file(&self, _id: &str) -> Result<(), AppError> {
            Ok(())
        }
        async fn aggregate_content(&self) -> Result<String, AppError> {
            Ok(self.aggregate.clone())
        }
    }

    fn resolver(aggregate: &str) -> SourceResolver {
        SourceResolver::new(Arc::new(FakeStorage {
            aggregate: aggregate.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_manual_text_wins_over_uploads() {
        let resolver = resolver("uploaded content");
        let resolved = resolver.resolve("typed by hand").await.unwrap();
        assert_eq!(resolved, "typed by hand");
    }

    #[tokio::test]
    async fn test_manual_text_returned_unchanged() {
        // Verbatim: surrounding whitespace is only used for the emptiness test.
        let resolver = resolver("");
        let resolved = resolver.resolve("  안녕하세요 세계  ").await.unwrap();
        assert_eq!(resolved, "  안녕하세요 세계  ");
    }

    #[tokio::test]
    async fn test_blank_manual_falls_back_to_aggregate() {
        let resolver = resolver("doc a\ndoc b");
        let resolved = resolver.resolve("   \n\t").await.unwrap();
        assert_eq!(resolved, "doc a\ndoc b");
    }

    #[tokio::test]
    async fn test_empty_everything_is_no_content() {
        let resolver = resolver("");
        let err = resolver.resolve("").await.unwrap_err();
        assert!(matches!(err, AppError::NoContentAvailable));
    }

    #[tokio::test]
    async fn test_whitespace_aggregate_is_no_content() {
        let resolver = resolver("  \n  ");
        let err = resolver.resolve("").await.unwrap_err();
        assert!(matches!(err, AppError::NoContentAvailable));
    }
}
