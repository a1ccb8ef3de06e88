use std::sync::Arc;

use crate::{
    adapters::{
        inbound::http::{middleware::RateLimitConfig, router::AppState},
        outbound::{
            persistence::{InMemoryPostRepository, SqlPostRepository},
            providers::{CloudinaryConfig, CloudinaryMediaStore, OpenAiImageGenerator},
        },
    },
    domain::models::MediaFallback,
    ports::repositories::PostRepository,
    services::{GenerationServiceImpl, PostServiceImpl},
};

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub repository_backend: RepositoryBackend,
    /// Generation provider credentials; requests fail with a configuration
    /// error when unset
    pub openai_api_key: Option<String>,
    /// Generation model override; the provider default applies when unset
    pub openai_model: Option<String>,
    /// Media storage credentials; uploads fail (and fall back per
    /// `media_fallback`) when unset
    pub cloudinary: Option<CloudinaryConfig>,
    pub media_fallback: MediaFallback,
    pub rate_limit: RateLimitConfig,
}

/// Repository backend configuration
#[derive(Debug, Clone, Default)]
pub enum RepositoryBackend {
    #[default]
    InMemory,
    Database {
        connection_string: String,
    },
}

/// Application services container
pub struct AppServices {
    pub generation_service: GenerationServiceImpl,
    pub post_service: PostServiceImpl,
}

impl AppServices {
    /// Package the services as router state
    pub fn into_state(self) -> AppState {
        AppState {
            generation_service: Arc::new(self.generation_service),
            post_service: Arc::new(self.post_service),
        }
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure the repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Configure the media failure policy
    pub fn with_media_fallback(mut self, fallback: MediaFallback) -> Self {
        self.config.media_fallback = fallback;
        self
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let repository = self.create_repository().await?;

        let generator = Arc::new(OpenAiImageGenerator::new(
            self.config.openai_api_key.clone(),
            self.config.openai_model.clone(),
        ));
        let media = Arc::new(CloudinaryMediaStore::new(self.config.cloudinary.clone()));

        Ok(AppServices {
            generation_service: GenerationServiceImpl::new(generator),
            post_service: PostServiceImpl::new(repository, media, self.config.media_fallback),
        })
    }

    /// Create the repository based on configuration
    async fn create_repository(&self) -> Result<Arc<dyn PostRepository>, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryPostRepository::new())),
            RepositoryBackend::Database { connection_string } => {
                let repository = SqlPostRepository::connect(connection_string)
                    .await
                    .map_err(|e| {
                        // log only a redacted prefix, the string carries credentials
                        let redacted: String = connection_string.chars().take(8).collect();
                        tracing::error!(
                            "failed to connect to the record store ({}...): {}",
                            redacted,
                            e
                        );
                        AppError::RepositoryInit {
                            message: e.to_string(),
                        }
                    })?;

                repository
                    .migrate()
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: e.to_string(),
                    })?;

                Ok(Arc::new(repository))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}
