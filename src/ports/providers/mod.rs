mod image_generator;
mod media_store;

pub use image_generator::ImageGenerator;
pub use media_store::{MediaStore, UploadedMedia};
