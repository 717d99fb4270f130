use std::sync::{Arc, RwLock};

use crate::engine::ports::StorageService;
use crate::engine::types::UploadedDocument;
use crate::error::AppError;

/// Authoritative client-side list of uploaded document handles.
///
/// Every successful add/remove refetches the full list instead of patching it
/// locally, so the registry's view is always the service's view —
/// concurrently deleted files disappear and concurrently uploaded files
/// appear together in one update.
pub struct FileRegistry {
    storage: Arc<dyn StorageService>,
    documents: RwLock<Vec<UploadedDocument>>,
}

impl FileRegistry {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self {
            storage,
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the current document list and replace the registry contents
    /// atomically. No partial merge.
    pub async fn refresh(&self) -> Result<Vec<UploadedDocument>, AppError> {
        let fresh = self.storage.list_files().await?;
        *self.documents.write().expect("registry lock poisoned") = fresh.clone();
        tracing::debug!(count = fresh.len(), "file registry refreshed");
        Ok(fresh)
    }

    /// Upload one document. The refresh is sequenced strictly after the
    /// upload acknowledgment.
    pub async fn add(&self, filename: &str, bytes: Vec<u8>) -> Result<(), AppError> {
        self.storage.upload_file(filename, bytes).await?;
        tracing::info!(filename, "document uploaded");
        self.refresh().await?;
        Ok(())
    }

    /// Delete one document by id, then refetch the list.
    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        self.storage.delete_file(id).await?;
        tracing::info!(id, "document deleted");
        self.refresh().await?;
        Ok(())
    }

    /// Snapshot of the current handles.
    pub fn documents(&self) -> Vec<UploadedDocument> {
        self.documents
            .read()
            .expect("registry lock poisoned")
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.documents
            .read()
            .expect("registry lock poisoned")
            .is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory storage fake. Upload/delete mutate the backing list so a
    /// follow-up `list_files` reflects the mutation, like the real service.
    struct FakeStorage {
        files: Mutex<Vec<UploadedDocument>>,
        reject_upload: Option<String>,
        reject_delete: Option<String>,
    }

    impl FakeStorage {
        fn with_files(files: Vec<UploadedDocument>) -> Self {
            Self {
                files: Mutex::new(files),
                reject_upload: None,
                reject_delete: None,
            }
        }
    }

    #[async_trait]
    impl StorageService for FakeStorage {
        async fn list_files(&self) -> Result<Vec<UploadedDocument>, AppError> {
            Ok(self.files.lock().unwrap().clone())
        }

        async fn upload_file(&self, filename: &str, _bytes: Vec<u8>) -> Result<(), AppError> {
            if let Some(msg) = &self.reject_upload {
                return Err(AppError::UploadRejected(msg.clone()));
            }
            let mut files = self.files.lock().unwrap();
            let id = format!("f-{}", files.len() + 1);
            files.push(UploadedDocument {
                id,
                filename: filename.to_string(),
            });
            Ok(())
        }

        async fn delete_file(&self, id: &str) -> Result<(), AppError> {
            if let Some(msg) = &self.reject_delete {
                return Err(AppError::DeleteRejected(msg.clone()));
            }
            self.files.lock().unwrap().retain(|d| d.id != id);
            Ok(())
        }

        async fn aggregate_content(&self) -> Result<String, AppError> {
            Ok(String::new())
        }
    }

    fn doc(id: &str, filename: &str) -> UploadedDocument {
        UploadedDocument {
            id: id.into(),
            filename: filename.into(),
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_contents_atomically() {
        let storage = Arc::new(FakeStorage::with_files(vec![doc("f-1", "a.txt")]));
        let registry = FileRegistry::new(storage.clone());
        registry.refresh().await.unwrap();
        assert_eq!(registry.documents().len(), 1);

        // Another client deleted f-1 and uploaded f-2: one refresh shows both changes.
        *storage.files.lock().unwrap() = vec![doc("f-2", "b.txt")];
        registry.refresh().await.unwrap();
        let docs = registry.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "f-2");
    }

    #[tokio::test]
    async fn test_add_triggers_refresh() {
        let registry = FileRegistry::new(Arc::new(FakeStorage::with_files(vec![])));
        assert!(registry.is_empty());
        registry.add("a.txt", b"alpha".to_vec()).await.unwrap();
        let docs = registry.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "a.txt");
    }

    #[tokio::test]
    async fn test_rejected_upload_leaves_registry_intact() {
        let mut storage = FakeStorage::with_files(vec![doc("f-1", "a.txt")]);
        storage.reject_upload = Some("unsupported file type".into());
        let registry = FileRegistry::new(Arc::new(storage));
        registry.refresh().await.unwrap();

        let err = registry.add("evil.exe", b"MZ".to_vec()).await.unwrap_err();
        assert!(matches!(err, AppError::UploadRejected(_)));
        assert_eq!(registry.documents().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_triggers_refresh() {
        let registry = FileRegistry::new(Arc::new(FakeStorage::with_files(vec![
            doc("f-1", "a.txt"),
            doc("f-2", "b.txt"),
        ])));
        registry.refresh().await.unwrap();
        registry.remove("f-1").await.unwrap();
        let docs = registry.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "f-2");
    }

    #[tokio::test]
    async fn test_rejected_delete_propagates_service_message() {
        let mut storage = FakeStorage::with_files(vec![doc("f-1", "a.txt")]);
        storage.reject_delete = Some("file not found".into());
        let registry = FileRegistry::new(Arc::new(storage));
        registry.refresh().await.unwrap();

        let err = registry.remove("f-9").await.unwrap_err();
        match err {
            AppError::DeleteRejected(msg) => assert_eq!(msg, "file not found"),
            other => panic!("expected DeleteRejected, got {other:?}"),
        }
        assert_eq!(registry.documents().len(), 1);
    }
}
