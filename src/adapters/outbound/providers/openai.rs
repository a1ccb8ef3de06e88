//! OpenAI image generation adapter.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        errors::{GenerationError, GenerationResult},
        models::GeneratedImage,
        value_objects::Prompt,
    },
    ports::providers::ImageGenerator,
};

const GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";
/// One square image per request
const IMAGE_SIZE: &str = "1024x1024";

/// Adapter wrapping the OpenAI image generations endpoint.
///
/// The API key is optional so the server can start without provider
/// credentials; generation requests then fail with a configuration error
/// instead of the process refusing to boot.
pub struct OpenAiImageGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    model: Option<String>,
}

impl OpenAiImageGenerator {
    pub fn new(api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    fn parse_error(&self, status: u16, body: &str) -> GenerationError {
        let message = extract_provider_message(body);

        if status == 402 {
            return GenerationError::BillingLimit(message);
        }
        if status == 429 {
            // insufficient_quota is a billing problem, not a transient limit
            if body.contains("insufficient_quota") || body.contains("exceeded your current quota")
            {
                return GenerationError::BillingLimit(message);
            }
        }
        if status == 401 || status == 403 {
            return GenerationError::MissingConfiguration(message);
        }

        let lower = body.to_lowercase();
        if lower.contains("content_policy") || lower.contains("content policy") || lower.contains("safety")
        {
            return GenerationError::ContentPolicy(message);
        }

        GenerationError::Provider {
            status: Some(status),
            message,
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, prompt: &Prompt) -> GenerationResult<GeneratedImage> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationError::MissingConfiguration("OPENAI_API_KEY is not set".to_string())
        })?;

        let body = ImageRequest {
            model: self.model.clone(),
            prompt: prompt.as_str().to_string(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
            response_format: "b64_json".to_string(),
        };

        let response = self
            .client
            .post(GENERATIONS_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &text));
        }

        let payload: ImageResponse = response.json().await?;
        let image = payload.data.into_iter().next().ok_or_else(|| {
            GenerationError::UnexpectedResponse("no images in provider response".to_string())
        })?;

        // Prefer b64_json; fall back to downloading a URL-form result
        let base64 = if let Some(b64) = image.b64_json {
            b64
        } else if let Some(url) = image.url {
            let bytes = self.client.get(&url).send().await?.bytes().await?;
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        } else {
            return Err(GenerationError::UnexpectedResponse(
                "provider response contained no image data".to_string(),
            ));
        };

        Ok(GeneratedImage {
            base64,
            model: self.model.clone(),
        })
    }
}

/// Pulls the human-readable message out of an OpenAI error body, falling
/// back to the raw text for non-JSON responses
fn extract_provider_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.is_empty() => "Something went wrong".to_string(),
        Err(_) => body.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    prompt: String,
    n: u32,
    size: String,
    response_format: String,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ErrorCode;

    fn generator() -> OpenAiImageGenerator {
        OpenAiImageGenerator::new(Some("sk-test".to_string()), None)
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_network_call() {
        let generator = OpenAiImageGenerator::new(None, None);
        let prompt = Prompt::new("a red balloon").unwrap();
        let err = generator.generate(&prompt).await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingConfiguration(_)));
    }

    #[test]
    fn test_billing_status_maps_to_billing_limit() {
        let err = generator().parse_error(402, r#"{"error":{"message":"Billing hard limit"}}"#);
        assert_eq!(err.code(), ErrorCode::BillingLimit);
    }

    #[test]
    fn test_quota_exhaustion_on_429_maps_to_billing_limit() {
        let err = generator().parse_error(
            429,
            r#"{"error":{"message":"You exceeded your current quota","code":"insufficient_quota"}}"#,
        );
        assert_eq!(err.code(), ErrorCode::BillingLimit);
    }

    #[test]
    fn test_content_policy_maps_to_content_policy() {
        let err = generator().parse_error(
            400,
            r#"{"error":{"message":"Your request was rejected","code":"content_policy_violation"}}"#,
        );
        assert_eq!(err.code(), ErrorCode::ContentPolicy);
    }

    #[test]
    fn test_bad_credentials_map_to_missing_configuration() {
        let err = generator().parse_error(401, r#"{"error":{"message":"Incorrect API key"}}"#);
        assert!(matches!(err, GenerationError::MissingConfiguration(_)));
    }

    #[test]
    fn test_unclassified_errors_stay_generic() {
        let err = generator().parse_error(500, "upstream exploded");
        match err {
            GenerationError::Provider { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_request_serialization() {
        let request = ImageRequest {
            model: None,
            prompt: "a red balloon".to_string(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
            response_format: "b64_json".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("model").is_none());
        assert_eq!(json["n"], 1);
        assert_eq!(json["size"], "1024x1024");
        assert_eq!(json["response_format"], "b64_json");
    }

    #[test]
    fn test_response_deserialization_b64() {
        let json = r#"{"data": [{"b64_json": "AQID"}]}"#;
        let parsed: ImageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data[0].b64_json.as_deref(), Some("AQID"));
        assert!(parsed.data[0].url.is_none());
    }

    #[test]
    fn test_provider_message_extraction_falls_back_to_raw_text() {
        assert_eq!(
            extract_provider_message(r#"{"error":{"message":"nope"}}"#),
            "nope"
        );
        assert_eq!(extract_provider_message("plain text"), "plain text");
        assert_eq!(extract_provider_message(""), "Something went wrong");
    }
}
