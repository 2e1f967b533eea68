use crate::error::Result;
use crate::llm::models::AnalysisRequest;
use async_trait::async_trait;

/// Generation knobs forwarded to the remote service.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

/// Abstract interface to the remote multimodal-analysis service.
///
/// The contract is deliberately narrow: one request carrying a free-text
/// prompt and an optional encoded image, one generated text back. Wire
/// format and auth belong to the implementation.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest, config: &AnalysisConfig) -> Result<String>;
}
