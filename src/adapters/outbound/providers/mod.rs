mod cloudinary;
mod openai;

pub use cloudinary::{CloudinaryConfig, CloudinaryMediaStore};
pub use openai::OpenAiImageGenerator;
