pub mod error;
pub mod ingest;
pub mod llm;

pub use error::{Result, VisionLabError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Result, VisionLabError};
    pub use crate::ingest::{ingest, EncodedImage, ImagePicker, PreviewHandle};
    pub use crate::llm::gateways::GeminiGateway;
    pub use crate::llm::{
        AnalysisConfig, AnalysisGateway, AnalysisRequest, AnalysisResult, AnalysisSession,
        RequestState,
    };
}
