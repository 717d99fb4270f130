//! Content aggregation & generation-orchestration pipeline.
//!
//! Leaf-first: `FileRegistry` owns the uploaded-document handles,
//! `SourceResolver` picks the text for an attempt, `GenerationOrchestrator`
//! drives the request/response life-cycle and owns the current-result cell,
//! `FrequencyViewProjector` and `ArtifactDownloadMediator` read that cell.

pub mod artifact;
pub mod orchestrator;
pub mod ports;
pub mod projector;
pub mod registry;
pub mod resolver;
pub mod types;

pub use artifact::ArtifactDownloadMediator;
pub use orchestrator::{GenerationOrchestrator, GenerationPhase};
pub use projector::{FrequencyViewProjector, SortKey, ViewFilter};
pub use registry::FileRegistry;
pub use resolver::SourceResolver;
pub use types::{
    GenerationOptions, GenerationRequest, GenerationResult, UploadedDocument, WordStat,
};
