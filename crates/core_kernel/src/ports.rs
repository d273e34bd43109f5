//! Ports and Adapters Infrastructure
//!
//! This module provides the foundational types for implementing the hexagonal
//! architecture (ports and adapters) pattern across the domain modules.
//!
//! Each domain defines its own port trait (`PostStore`, `ClaimStore`) that
//! extends the marker trait here. Adapters implement those traits to provide
//! either internal (database) or mock implementations. The `ObjectStore`
//! collaborator port lives here because both the posts and claims domains
//! delegate photo uploads to it.

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// ensuring consistent error handling across adapters. Storage adapters are
/// required to translate engine-specific failures (for example a unique-index
/// violation) into the typed variants here, so domain code never inspects
/// storage-engine error shapes.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data (duplicate key, stale state)
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if this error indicates a conflict with existing data
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// A binary blob submitted for upload, together with its metadata.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl PhotoUpload {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    /// Size of the blob in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// The public handle returned by the object-storage collaborator.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub url: String,
}

/// Object-storage collaborator port
///
/// Accepts a binary blob plus filename and mime type and returns a public
/// URL. Upload failures propagate as `PortError::Internal`; the collaborator
/// is not modeled further than this.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, photo: PhotoUpload) -> Result<StoredObject, PortError>;
}

/// In-memory mock of the object-storage collaborator for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Records every upload and hands back a deterministic URL.
    #[derive(Debug, Default)]
    pub struct MockObjectStore {
        uploads: Arc<RwLock<Vec<PhotoUpload>>>,
    }

    impl MockObjectStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of uploads accepted so far
        pub async fn upload_count(&self) -> usize {
            self.uploads.read().await.len()
        }
    }

    #[async_trait::async_trait]
    impl ObjectStore for MockObjectStore {
        async fn upload(&self, photo: PhotoUpload) -> Result<StoredObject, PortError> {
            let url = format!("https://cdn.example.test/{}", photo.filename);
            self.uploads.write().await.push(photo);
            Ok(StoredObject { url })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Post", "123");
        assert!(error.is_not_found());
        assert!(!error.is_conflict());
        assert!(error.to_string().contains("Post"));
        assert!(error.to_string().contains("123"));
    }

    #[test]
    fn test_port_error_conflict() {
        let error = PortError::conflict("duplicate claim");
        assert!(error.is_conflict());
        assert!(!error.is_transient());
    }

    #[test]
    fn test_photo_upload_size() {
        let photo = PhotoUpload::new(vec![0u8; 16], "proof.jpg", "image/jpeg");
        assert_eq!(photo.size(), 16);
    }

    #[tokio::test]
    async fn test_mock_object_store() {
        let store = mock::MockObjectStore::new();
        let photo = PhotoUpload::new(vec![1, 2, 3], "item.png", "image/png");

        let stored = store.upload(photo).await.unwrap();

        assert!(stored.url.ends_with("item.png"));
        assert_eq!(store.upload_count().await, 1);
    }
}
