use serde::{Deserialize, Serialize};

use crate::engine::types::WordStat;

// ============================================================================
// Generation
// ============================================================================

/// JSON envelope variant of the generate response. The collaborator's
/// contract has varied between deployments: some return raw image bytes
/// (content-type `image/*`), others this envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateEnvelope {
    #[serde(default)]
    pub success: bool,
    pub data: Option<GenerateData>,
    pub error: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateData {
    /// Base64-encoded PNG.
    pub image: String,
    #[serde(default)]
    pub words: Vec<WordStat>,
}

/// A successful `POST /api/generate` response in either transport encoding.
#[derive(Debug, Clone)]
pub enum GenerationPayload {
    /// Raw image bytes, no word statistics.
    Image(Vec<u8>),
    /// JSON envelope carrying a base64 image plus word statistics.
    Envelope(GenerateEnvelope),
}

// ============================================================================
// Fonts
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontInfo {
    pub name: String,
    pub file_name: String,
    pub supports_korean: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontsResponse {
    pub fonts: Vec<FontInfo>,
}

// ============================================================================
// Storage / export
// ============================================================================

/// `{ status: 'success'|'error', message? }` — upload and delete both answer
/// with this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusEnvelope {
    pub status: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub file_id: String,
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub data: Vec<FileEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentResponse {
    pub status: String,
    pub data: Option<ContentData>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentData {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
