use crate::domain::{errors::GenerationResult, models::GeneratedImage};
use async_trait::async_trait;

/// Port for the image generation service
#[async_trait]
pub trait GenerationService: Send + Sync + 'static {
    /// Validate the prompt and generate one image for it.
    ///
    /// Empty or whitespace-only prompts are rejected without any provider
    /// call.
    async fn generate_image(&self, prompt: &str) -> GenerationResult<GeneratedImage>;
}
