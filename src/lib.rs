pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

use std::sync::Arc;

use api::types::FontInfo;
use api::ApiClient;
use config::ClientConfig;
use engine::ports::GenerationService;
use engine::{
    ArtifactDownloadMediator, FileRegistry, FrequencyViewProjector, GenerationOptions,
    GenerationOrchestrator, GenerationResult, SourceResolver,
};
use error::AppError;

/// Shared application state a presentation layer drives. All components are
/// wired over one `ApiClient`; the projector and the download mediator read
/// the orchestrator's result cell.
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub registry: FileRegistry,
    pub resolver: SourceResolver,
    pub orchestrator: GenerationOrchestrator,
    pub projector: FrequencyViewProjector,
    pub artifacts: ArtifactDownloadMediator,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        tracing::info!(base_url = %config.base_url, "wiring word-cloud client");
        let api = Arc::new(ApiClient::new(&config));
        let orchestrator = GenerationOrchestrator::new(api.clone());
        let result_cell = orchestrator.result_cell();

        Self {
            registry: FileRegistry::new(api.clone()),
            resolver: SourceResolver::new(api.clone()),
            projector: FrequencyViewProjector::new(Arc::clone(&result_cell)),
            artifacts: ArtifactDownloadMediator::new(api.clone(), result_cell),
            orchestrator,
            api,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Resolve the input text (manual text wins over uploaded content), build
    /// the request, and run one generation attempt.
    pub async fn generate_from_input(
        &self,
        manual_text: &str,
        options: GenerationOptions,
    ) -> Result<Arc<GenerationResult>, AppError> {
        let text = self.resolver.resolve(manual_text).await?;
        self.orchestrator.generate(options.into_request(text)).await
    }

    /// Font catalog for the request's `font` field.
    pub async fn list_fonts(&self) -> Result<Vec<FontInfo>, AppError> {
        self.api.list_fonts().await
    }
}
