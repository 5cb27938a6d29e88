pub mod gemini;

pub use gemini::GeminiGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// The single injected capability of a chapter job: turn a prompt into
/// generated text.
///
/// Implementations may stream partial chunks internally, but must concatenate
/// them in arrival order and return one trimmed string. Errors cover missing
/// credentials, transport failures, and provider-side errors; the pipeline
/// recovers from all of them with the fixed fallback chapter text.
#[async_trait]
pub trait ChapterGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}
