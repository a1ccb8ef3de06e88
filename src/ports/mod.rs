pub mod providers;
pub mod repositories;
pub mod services;

// Re-export all port traits for convenience
pub use providers::{ImageGenerator, MediaStore, UploadedMedia};
pub use repositories::PostRepository;
pub use services::{GenerationService, PostService};
