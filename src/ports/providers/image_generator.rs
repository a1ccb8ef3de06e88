use crate::domain::{errors::GenerationResult, models::GeneratedImage, value_objects::Prompt};
use async_trait::async_trait;

/// Port for the text-to-image generation provider.
///
/// Implementations perform a single provider call per request; retry policy
/// is the caller's concern (and the product's answer is "try a different
/// prompt").
#[async_trait]
pub trait ImageGenerator: Send + Sync + 'static {
    /// Generate one square image for the prompt, returned as base64
    async fn generate(&self, prompt: &Prompt) -> GenerationResult<GeneratedImage>;
}
