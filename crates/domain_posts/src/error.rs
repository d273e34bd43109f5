//! Posts domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the posts domain
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("You can only modify your own posts")]
    NotOwner,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No valid update fields provided")]
    NoUpdateFields,

    #[error("Photo upload failed: {0}")]
    UploadFailed(String),

    #[error(transparent)]
    Store(#[from] PortError),
}

impl PostError {
    pub fn validation(message: impl Into<String>) -> Self {
        PostError::Validation(message.into())
    }
}
