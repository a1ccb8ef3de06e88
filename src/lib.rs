pub mod adapters;
pub mod app;
pub mod client;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    // Models
    CreatePostRequest,
    // Value objects
    DisplayName,
    // Errors
    ErrorCode,
    GeneratedImage,
    GenerationError,
    MediaError,
    MediaFallback,
    NewPost,
    Post,
    PostError,
    Prompt,
    PublishReceipt,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{
    GenerationService,
    ImageGenerator,
    MediaStore,
    // Repository ports
    PostRepository,
    // Service ports
    PostService,
    UploadedMedia,
};

// Service implementations - business logic
pub use services::{GenerationServiceImpl, PostServiceImpl};

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppError, AppServices, RepositoryBackend, create_in_memory_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    persistence::{InMemoryPostRepository, SqlPostRepository},
    providers::{CloudinaryConfig, CloudinaryMediaStore, OpenAiImageGenerator},
};
