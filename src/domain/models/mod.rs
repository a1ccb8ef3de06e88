mod post;

pub use post::{
    CreatePostRequest, GeneratedImage, MediaFallback, NewPost, Post, PublishReceipt,
};
