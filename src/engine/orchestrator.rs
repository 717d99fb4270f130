use std::sync::{Arc, Mutex};

use base64::Engine as _;

use crate::api::types::GenerationPayload;
use crate::engine::ports::GenerationService;
use crate::engine::types::{
    new_result_cell, GenerationRequest, GenerationResult, SharedResult,
};
use crate::error::AppError;

// ============================================================================
// Phase state machine
// ============================================================================

/// Generation life-cycle phase.
///
/// ```text
/// Idle ──► Submitting ──► Succeeded
///              │
///              └────────► Failed
/// ```
/// A new attempt is accepted from any phase except `Submitting`; at most one
/// submission is in flight at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl GenerationPhase {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn can_submit(self) -> bool {
        !self.is_in_flight()
    }
}

// ============================================================================
// GenerationOrchestrator
// ============================================================================

/// Owns the request/response life-cycle against the generation service and
/// the single mutable "current result" cell. A failed attempt never touches
/// the previous result.
pub struct GenerationOrchestrator {
    service: Arc<dyn GenerationService>,
    phase: Mutex<GenerationPhase>,
    result: SharedResult,
}

impl GenerationOrchestrator {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self {
            service,
            phase: Mutex::new(GenerationPhase::Idle),
            result: new_result_cell(),
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        *self.phase.lock().expect("phase lock poisoned")
    }

    /// Read-only handle to the latest-result cell for downstream readers
    /// (projector, download mediator). Only the orchestrator writes it.
    pub fn result_cell(&self) -> SharedResult {
        Arc::clone(&self.result)
    }

    pub fn last_result(&self) -> Option<Arc<GenerationResult>> {
        self.result.read().expect("result cell poisoned").clone()
    }

    /// Run one generation attempt. Rejects with `AlreadyInProgress` while a
    /// prior attempt is submitting, without touching that attempt's outcome.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<Arc<GenerationResult>, AppError> {
        {
            let mut phase = self.phase.lock().expect("phase lock poisoned");
            if phase.is_in_flight() {
                tracing::warn!("generate() called while a submission is in flight");
                return Err(AppError::AlreadyInProgress);
            }
            *phase = GenerationPhase::Submitting;
        }

        tracing::info!(
            text_chars = request.text.chars().count(),
            mask = %request.mask_type,
            font = %request.font,
            "submitting generation request"
        );

        match self.attempt(&request).await {
            Ok(result) => {
                let result = Arc::new(result);
                *self.result.write().expect("result cell poisoned") = Some(Arc::clone(&result));
                *self.phase.lock().expect("phase lock poisoned") = GenerationPhase::Succeeded;
                tracing::info!(
                    image_bytes = result.image_bytes.len(),
                    words = result.words.len(),
                    "generation succeeded"
                );
                Ok(result)
            }
            Err(e) => {
                *self.phase.lock().expect("phase lock poisoned") = GenerationPhase::Failed;
                tracing::warn!(error = %e, "generation failed, previous result kept");
                Err(e)
            }
        }
    }

    /// One round-trip plus full decoding. The result is constructed only
    /// after both image and words decoded — no partial application.
    async fn attempt(&self, request: &GenerationRequest) -> Result<GenerationResult, AppError> {
        let payload = self.service.generate(request).await?;
        decode_payload(payload)
    }
}

/// Decode either transport encoding of a successful generate response into a
/// complete `GenerationResult`.
pub(crate) fn decode_payload(payload: GenerationPayload) -> Result<GenerationResult, AppError> {
    match payload {
        GenerationPayload::Image(bytes) => {
            if bytes.is_empty() {
                return Err(AppError::Decode("empty image payload".into()));
            }
            // The binary encoding carries no word statistics.
            Ok(GenerationResult {
                image_bytes: bytes,
                words: Vec::new(),
            })
        }
        GenerationPayload::Envelope(envelope) => {
            if !envelope.success {
                let message = envelope
                    .error
                    .or(envelope.detail)
                    .unwrap_or_else(|| "generation service reported failure".to_string());
                return Err(AppError::GenerationRejected(message));
            }
            let data = envelope
                .data
                .ok_or_else(|| AppError::Decode("success envelope without data".into()))?;
            let image_bytes = base64::engine::general_purpose::STANDARD
                .decode(data.image.as_bytes())
                .map_err(|e| AppError::Decode(format!("image payload is not valid base64: {e}")))?;
            Ok(GenerationResult {
                image_bytes,
                words: data.words,
            })
        }
    }
}
