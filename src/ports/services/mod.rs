mod generation_service;
mod post_service;

pub use generation_service::GenerationService;
pub use post_service::PostService;
