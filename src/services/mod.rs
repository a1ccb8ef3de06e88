mod generation_service_impl;
mod post_service_impl;

pub use generation_service_impl::GenerationServiceImpl;
pub use post_service_impl::PostServiceImpl;
