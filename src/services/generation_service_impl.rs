use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::{
    domain::{errors::GenerationResult, models::GeneratedImage, value_objects::Prompt},
    ports::{providers::ImageGenerator, services::GenerationService},
};

/// Implementation of GenerationService proxying the generation provider
#[derive(Clone)]
pub struct GenerationServiceImpl {
    generator: Arc<dyn ImageGenerator>,
}

impl GenerationServiceImpl {
    /// Create a new GenerationServiceImpl instance
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl GenerationService for GenerationServiceImpl {
    async fn generate_image(&self, prompt: &str) -> GenerationResult<GeneratedImage> {
        // Validation happens before the provider is ever contacted
        let prompt = Prompt::new(prompt)?;

        info!(prompt_len = prompt.as_str().len(), "generating image");
        let image = self.generator.generate(&prompt).await?;
        info!(payload_len = image.base64.len(), "image generated");

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ErrorCode, GenerationError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageGenerator for CountingGenerator {
        async fn generate(&self, _prompt: &Prompt) -> GenerationResult<GeneratedImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GeneratedImage {
                base64: "AQID".to_string(),
                model: None,
            })
        }
    }

    #[tokio::test]
    async fn test_empty_prompt_never_reaches_the_provider() {
        let generator = Arc::new(CountingGenerator {
            calls: AtomicUsize::new(0),
        });
        let service = GenerationServiceImpl::new(generator.clone());

        for prompt in ["", "   ", "\t\n"] {
            let err = service.generate_image(prompt).await.unwrap_err();
            assert!(matches!(err, GenerationError::InvalidPrompt(_)));
            assert_eq!(err.code(), ErrorCode::InvalidPrompt);
        }

        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_prompt_returns_provider_payload() {
        let generator = Arc::new(CountingGenerator {
            calls: AtomicUsize::new(0),
        });
        let service = GenerationServiceImpl::new(generator.clone());

        let image = service.generate_image("a red balloon").await.unwrap();
        assert_eq!(image.base64, "AQID");
        assert_eq!(image.data_url(), "data:image/jpeg;base64,AQID");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
