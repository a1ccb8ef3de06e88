pub mod generation_handlers;
pub mod post_handlers;

pub use generation_handlers::*;
pub use post_handlers::*;
