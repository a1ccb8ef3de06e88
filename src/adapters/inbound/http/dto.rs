use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    errors::{ErrorCode, GenerationError, PostError},
    models::{Post, PublishReceipt},
};

/// DTO for plain informational responses
#[derive(Debug, Clone, Serialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// DTO for image generation requests
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageDto {
    #[serde(default)]
    pub prompt: String,
}

/// DTO for a successful generation: the base64 payload, no envelope
#[derive(Debug, Clone, Serialize)]
pub struct PhotoResponseDto {
    pub photo: String,
}

/// DTO for post creation requests.
///
/// Missing fields deserialize to empty strings and are rejected by domain
/// validation, so the envelope (not a serde error) reports what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub photo: String,
}

/// DTO for a stored post
#[derive(Debug, Clone, Serialize)]
pub struct PostDto {
    pub id: Uuid,
    pub name: String,
    pub prompt: String,
    pub photo: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        PostDto {
            id: post.id,
            name: post.name,
            prompt: post.prompt,
            photo: post.photo,
            created_at: post.created_at,
        }
    }
}

/// DTO for gallery listings
#[derive(Debug, Clone, Serialize)]
pub struct PostListResponseDto {
    pub success: bool,
    pub data: Vec<PostDto>,
}

impl PostListResponseDto {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            success: true,
            data: posts.into_iter().map(PostDto::from).collect(),
        }
    }
}

/// DTO for a publish response, with the non-fatal warning when the media
/// upload degraded to inline storage
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostResponseDto {
    pub success: bool,
    pub data: PostDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<PublishReceipt> for CreatePostResponseDto {
    fn from(receipt: PublishReceipt) -> Self {
        CreatePostResponseDto {
            success: true,
            data: receipt.post.into(),
            warning: receipt.warning,
        }
    }
}

/// DTO for error responses: every failure path returns this envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDto {
    pub success: bool,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiErrorDto {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
        }
    }

    pub fn from_generation_error(error: &GenerationError) -> Self {
        Self::new(error.code(), error.to_string())
    }

    pub fn from_post_error(error: &PostError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

impl From<&GenerationError> for StatusCode {
    fn from(error: &GenerationError) -> Self {
        match error {
            GenerationError::InvalidPrompt(_) | GenerationError::ContentPolicy(_) => {
                StatusCode::BAD_REQUEST
            }
            GenerationError::BillingLimit(_) => StatusCode::PAYMENT_REQUIRED,
            GenerationError::MissingConfiguration(_)
            | GenerationError::UnexpectedResponse(_)
            | GenerationError::Network(_)
            | GenerationError::Provider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&PostError> for StatusCode {
    fn from(error: &PostError) -> Self {
        match error {
            PostError::Validation(_) => StatusCode::BAD_REQUEST,
            PostError::StoreUnavailable { .. } | PostError::MediaUnavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PostError::FetchFailed { .. } | PostError::PersistFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationError;

    #[test]
    fn test_billing_limit_maps_to_402_never_500() {
        let err = GenerationError::BillingLimit("hard limit".into());
        assert_eq!(StatusCode::from(&err), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = GenerationError::InvalidPrompt(ValidationError::EmptyPrompt);
        assert_eq!(StatusCode::from(&err), StatusCode::BAD_REQUEST);

        let err = PostError::Validation(ValidationError::MissingField { field: "photo" });
        assert_eq!(StatusCode::from(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_unavailable_maps_to_503() {
        let err = PostError::StoreUnavailable {
            message: "pool timed out".into(),
        };
        assert_eq!(StatusCode::from(&err), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_error_envelope_shape() {
        let err = GenerationError::ContentPolicy("rejected".into());
        let dto = ApiErrorDto::from_generation_error(&err);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "content_policy");
        assert!(json["message"].as_str().unwrap().contains("rejected"));
    }

    #[test]
    fn test_warning_is_omitted_when_absent() {
        let receipt = PublishReceipt::ok(Post {
            id: Uuid::new_v4(),
            name: "Al".into(),
            prompt: "a red balloon".into(),
            photo: "https://cdn.example.com/x.jpg".into(),
            created_at: Utc::now(),
        });
        let json = serde_json::to_value(CreatePostResponseDto::from(receipt)).unwrap();
        assert!(json.get("warning").is_none());
    }

    #[test]
    fn test_missing_request_fields_default_to_empty() {
        let dto: CreatePostDto = serde_json::from_str(r#"{"name":"Al"}"#).unwrap();
        assert_eq!(dto.name, "Al");
        assert!(dto.prompt.is_empty());
        assert!(dto.photo.is_empty());
    }
}
