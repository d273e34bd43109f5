//! External Image CDN Adapter
//!
//! Implements the `ObjectStore` collaborator port against an unsigned-upload
//! image CDN endpoint (Cloudinary-style). The adapter posts a multipart form
//! with the file and an upload preset, and reads the public URL out of the
//! JSON response.
//!
//! # Error Handling
//!
//! - Timeouts and transport failures -> `PortError::Connection`
//! - Non-success status codes -> `PortError::Internal`
//! - Malformed responses -> `PortError::Internal`

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use core_kernel::{ObjectStore, PhotoUpload, PortError, StoredObject};

/// Configuration for the image CDN adapter
#[derive(Debug, Clone)]
pub struct ImageCdnConfig {
    /// Full upload endpoint URL (e.g. "https://api.cdn.example/v1/demo/image/upload")
    pub upload_url: String,
    /// Unsigned upload preset name
    pub upload_preset: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ImageCdnConfig {
    fn default() -> Self {
        Self {
            upload_url: String::new(),
            upload_preset: String::new(),
            timeout_secs: 30,
        }
    }
}

/// HTTP adapter for the object-storage collaborator
#[derive(Debug, Clone)]
pub struct ImageCdnStore {
    client: reqwest::Client,
    config: ImageCdnConfig,
}

/// The subset of the CDN upload response the system consumes
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl ImageCdnStore {
    /// Creates a new adapter with a pooled HTTP client
    pub fn new(config: ImageCdnConfig) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ObjectStore for ImageCdnStore {
    async fn upload(&self, photo: PhotoUpload) -> Result<StoredObject, PortError> {
        let filename = photo.filename.clone();
        let part = reqwest::multipart::Part::bytes(photo.bytes)
            .file_name(filename.clone())
            .mime_str(&photo.content_type)
            .map_err(|e| PortError::validation(format!("invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        debug!(%filename, "uploading image to CDN");

        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(%filename, error = %e, "image upload transport failure");
                PortError::Connection {
                    message: "image upload request failed".to_string(),
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%filename, status = %status, "image upload rejected");
            return Err(PortError::internal(format!(
                "image upload failed with status {status}"
            )));
        }

        let body: UploadResponse = response.json().await.map_err(|e| PortError::Internal {
            message: "malformed upload response".to_string(),
            source: Some(Box::new(e)),
        })?;

        Ok(StoredObject {
            url: body.secure_url,
        })
    }
}
