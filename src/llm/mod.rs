pub mod gateway;
pub mod gateways;
pub mod models;
pub mod session;

pub use gateway::{AnalysisConfig, AnalysisGateway};
pub use models::{AnalysisRequest, AnalysisResult, ImagePayload, RequestState};
pub use session::{AnalysisSession, FALLBACK_ERROR_MESSAGE};
