use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

// ============================================================================
// Documents
// ============================================================================

/// Handle to one uploaded source document. The storage service assigns the
/// id; content is never cached client-side. `FileRegistry` is the single
/// owner of the live set of handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: String,
    pub filename: String,
}

// ============================================================================
// Generation request / result
// ============================================================================

/// Immutable parameters for one generation attempt. `text` is the resolved,
/// final input — see `SourceResolver`. Field names match the generation
/// service's JSON body, so the struct serializes directly.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub text: String,
    pub font: String,
    pub background_color: String,
    pub color_func: String,
    pub mask_type: String,
    pub width: u32,
    pub height: u32,
    pub max_words: u32,
}

/// Everything of a `GenerationRequest` except the resolved text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub font: String,
    pub background_color: String,
    pub color_func: String,
    pub mask_type: String,
    pub width: u32,
    pub height: u32,
    pub max_words: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            font: String::new(),
            background_color: "white".to_string(),
            color_func: "single_color".to_string(),
            mask_type: "rectangle".to_string(),
            width: 800,
            height: 400,
            max_words: 200,
        }
    }
}

impl GenerationOptions {
    pub fn into_request(self, text: String) -> GenerationRequest {
        GenerationRequest {
            text,
            font: self.font,
            background_color: self.background_color,
            color_func: self.color_func,
            mask_type: self.mask_type,
            width: self.width,
            height: self.height,
            max_words: self.max_words,
        }
    }
}

/// One word's statistics as computed by the generation service.
///
/// Percentages are service-computed and sum to ≈100 across the full returned
/// set. The service may pre-sort by frequency, but no order is assumed here —
/// the projector re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStat {
    pub word: String,
    pub frequency: u64,
    pub percentage: f64,
}

/// The rendered image plus the word list for one successful attempt.
/// Superseded in full by the next successful attempt; never merged.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub image_bytes: Vec<u8>,
    pub words: Vec<WordStat>,
}

// ============================================================================
// Shared result cell
// ============================================================================

/// Single mutable cell holding the latest successful result. The orchestrator
/// writes it; the projector and the download mediator hold read-only clones,
/// so the image download and the word table always derive from the same
/// immutable value.
pub type SharedResult = Arc<RwLock<Option<Arc<GenerationResult>>>>;

pub fn new_result_cell() -> SharedResult {
    Arc::new(RwLock::new(None))
}
