use serde::Deserialize;
use std::time::Duration;

use crate::domain::errors::ErrorCode;

/// Publish requests abort client-side after this long; the server still
/// finishes the request on its own
pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side classification of a failed API call.
///
/// Built from the server's stable `code` field; message substrings are only
/// consulted for legacy envelopes that carry no code.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The prompt was rejected on content grounds
    ContentPolicy,
    /// The provider account is out of quota or budget
    BillingLimit,
    /// A required field was missing or invalid
    Validation(String),
    /// Anything else: network failures, server errors, unparseable bodies
    Other(String),
}

impl ClientError {
    /// The message shown to the user for this class of failure
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::ContentPolicy => {
                "Your prompt may violate content policy. Please try a different prompt with different subject matter."
            }
            ClientError::BillingLimit => {
                "The image provider has reached its billing limit. Please contact the administrator."
            }
            ClientError::Validation(_) => {
                "Please provide all required details before continuing."
            }
            ClientError::Other(_) => "Something went wrong. Please try again.",
        }
    }

    fn classify(code: Option<ErrorCode>, message: &str) -> Self {
        match code {
            Some(ErrorCode::ContentPolicy) => ClientError::ContentPolicy,
            Some(ErrorCode::BillingLimit) => ClientError::BillingLimit,
            Some(ErrorCode::InvalidPrompt) | Some(ErrorCode::MissingField) => {
                ClientError::Validation(message.to_string())
            }
            Some(_) => ClientError::Other(message.to_string()),
            // Legacy envelopes without a code: fall back to substrings
            None => {
                let lower = message.to_lowercase();
                if lower.contains("content policy") {
                    ClientError::ContentPolicy
                } else if lower.contains("billing") {
                    ClientError::BillingLimit
                } else {
                    ClientError::Other(message.to_string())
                }
            }
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::ContentPolicy => write!(f, "prompt rejected by content policy"),
            ClientError::BillingLimit => write!(f, "provider billing limit reached"),
            ClientError::Validation(message) => write!(f, "validation failed: {}", message),
            ClientError::Other(message) => write!(f, "request failed: {}", message),
        }
    }
}

impl std::error::Error for ClientError {}

/// Outcome of a publish call
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    /// The photo reference the server stored
    pub photo: String,
    /// Present when the upload degraded to inline storage
    pub warning: Option<String>,
}

impl PublishOutcome {
    /// Whether the server kept the inline data instead of a durable URL
    pub fn stored_inline(&self) -> bool {
        self.photo.starts_with("data:")
    }
}

/// A post as rendered in the gallery listing
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryPost {
    pub name: String,
    pub prompt: String,
    pub photo: String,
}

/// HTTP client for the gallery server API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe the server, returning its greeting
    pub async fn ping(&self) -> Result<String, ClientError> {
        let response = self
            .http
            .get(self.url("/api/v1/dalle"))
            .send()
            .await
            .map_err(network_error)?;

        let body: MessageBody = response.json().await.map_err(invalid_response)?;
        Ok(body.message)
    }

    /// Request one generated image, returned as an inline data URL
    pub async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/api/v1/dalle"))
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: PhotoBody = response.json().await.map_err(invalid_response)?;
        if body.photo.is_empty() {
            return Err(ClientError::Other(
                "No image data received from server".to_string(),
            ));
        }

        Ok(format!("data:image/jpeg;base64,{}", body.photo))
    }

    /// Publish a post to the community gallery
    pub async fn publish(
        &self,
        name: &str,
        prompt: &str,
        photo: &str,
    ) -> Result<PublishOutcome, ClientError> {
        let response = self
            .http
            .post(self.url("/api/v1/post"))
            .timeout(PUBLISH_TIMEOUT)
            .json(&serde_json::json!({
                "name": name,
                "prompt": prompt,
                "photo": photo,
            }))
            .send()
            .await
            .map_err(network_error)?;

        let body: PublishBody = response.json().await.map_err(invalid_response)?;

        if body.success {
            let stored_photo = body.data.map(|d| d.photo).unwrap_or_else(|| photo.to_string());
            return Ok(PublishOutcome {
                photo: stored_photo,
                warning: body.warning,
            });
        }

        let message = body.message.unwrap_or_default();

        // Legacy servers report missing storage credentials as a hard error;
        // treat it as the soft local-storage publish it actually was
        if body.code.is_none() && message.to_lowercase().contains("credentials") {
            return Ok(PublishOutcome {
                photo: photo.to_string(),
                warning: Some(
                    "Your image was shared locally only (cloud storage unavailable).".to_string(),
                ),
            });
        }

        Err(ClientError::classify(body.code, &message))
    }

    /// Fetch all published posts
    pub async fn gallery(&self) -> Result<Vec<GalleryPost>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/v1/post"))
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: GalleryBody = response.json().await.map_err(invalid_response)?;
        Ok(body.data)
    }
}

fn network_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Other("Network error: the request timed out".to_string())
    } else {
        ClientError::Other(format!("Network error: {}", e))
    }
}

fn invalid_response(_: reqwest::Error) -> ClientError {
    ClientError::Other("Invalid response from server".to_string())
}

async fn error_from_response(response: reqwest::Response) -> ClientError {
    let envelope = response.json::<ErrorBody>().await.unwrap_or_default();
    ClientError::classify(
        envelope.code,
        envelope.message.as_deref().unwrap_or("Server error"),
    )
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PhotoBody {
    #[serde(default)]
    photo: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<ErrorCode>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublishBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<PublishedData>,
    #[serde(default)]
    warning: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<ErrorCode>,
}

#[derive(Debug, Deserialize)]
struct PublishedData {
    photo: String,
}

#[derive(Debug, Deserialize)]
struct GalleryBody {
    #[serde(default)]
    data: Vec<GalleryPost>,
}
