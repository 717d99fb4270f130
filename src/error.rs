use serde::Serialize;

/// App-wide error type. Every fallible operation returns `Result<T, AppError>`.
/// Serializes as `{ error, kind }` so the presentation layer gets structured
/// error messages. All variants are recoverable at the UI boundary: a failure
/// never invalidates the file registry or the last successful result.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("Delete rejected: {0}")]
    DeleteRejected(String),

    #[error("No content available: input text is empty and no uploaded document has content")]
    NoContentAvailable,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Generation rejected: {0}")]
    GenerationRejected(String),

    #[error("A generation request is already in flight")]
    AlreadyInProgress,

    #[error("No artifact available: no generation has succeeded yet")]
    NoArtifactAvailable,

    #[error("Export unavailable: {0}")]
    ExportUnavailable(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// We serialize as `{ error: "...", kind: "..." }` for frontend consumption.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("AppError", 2)?;
        s.serialize_field("error", &self.to_string())?;
        s.serialize_field(
            "kind",
            match self {
                AppError::UploadRejected(_) => "upload_rejected",
                AppError::DeleteRejected(_) => "delete_rejected",
                AppError::NoContentAvailable => "no_content_available",
                AppError::Transport(_) => "transport",
                AppError::GenerationRejected(_) => "generation_rejected",
                AppError::AlreadyInProgress => "already_in_progress",
                AppError::NoArtifactAvailable => "no_artifact_available",
                AppError::ExportUnavailable(_) => "export_unavailable",
                AppError::Decode(_) => "decode",
                AppError::Serde(_) => "serde",
            },
        )?;
        s.end()
    }
}
