//! Cloudinary media storage adapter.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::{
    domain::errors::{MediaError, MediaResult},
    ports::providers::{MediaStore, UploadedMedia},
};

/// Transform applied to every upload: bound the width and let the provider
/// pick format and quality
const UPLOAD_TRANSFORMATION: &str = "c_limit,w_1024/f_auto,q_auto";

/// Credentials for the Cloudinary upload API
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Adapter wrapping the Cloudinary signed upload endpoint.
///
/// Credentials are optional so an unconfigured deployment degrades to the
/// post service's inline-storage fallback instead of refusing to start.
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    config: Option<CloudinaryConfig>,
}

impl CloudinaryMediaStore {
    pub fn new(config: Option<CloudinaryConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(cloud_name: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            cloud_name
        )
    }
}

/// Sign the request parameters the way the upload API expects: the
/// alphabetically ordered parameter string with the secret appended, hashed
/// with SHA-1
fn sign_request(params: &str, api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(params.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, photo: &str) -> MediaResult<UploadedMedia> {
        let config = self.config.as_ref().ok_or_else(|| {
            MediaError::MissingConfiguration("Cloudinary credentials are not set".to_string())
        })?;

        let timestamp = Utc::now().timestamp().to_string();
        let params = format!(
            "timestamp={}&transformation={}",
            timestamp, UPLOAD_TRANSFORMATION
        );
        let signature = sign_request(&params, &config.api_secret);

        let form = [
            ("file", photo),
            ("api_key", config.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("transformation", UPLOAD_TRANSFORMATION),
            ("signature", signature.as_str()),
        ];

        let response = self
            .client
            .post(Self::upload_url(&config.cloud_name))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::UploadRejected {
                status: status.as_u16(),
                message,
            });
        }

        let payload: UploadResponse = response.json().await?;
        match payload.secure_url {
            Some(url) => Ok(UploadedMedia { url }),
            None => Err(MediaError::UnexpectedResponse(
                "upload response carried no secure_url".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
}
