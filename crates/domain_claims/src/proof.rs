//! Photo-proof validation
//!
//! Claims may carry an image as proof of ownership or possession. The blob
//! is validated here before any upload is attempted; the upload itself is
//! delegated to the object-storage collaborator.

use core_kernel::PhotoUpload;

use crate::error::ClaimError;

/// Maximum accepted photo-proof size: 5 MiB
pub const MAX_PHOTO_PROOF_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image mime types
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Validates mime type and size of a photo-proof blob.
///
/// Runs before the upload so a rejected blob never reaches object storage.
pub fn validate_photo_proof(photo: &PhotoUpload) -> Result<(), ClaimError> {
    if !ALLOWED_IMAGE_TYPES.contains(&photo.content_type.as_str()) {
        return Err(ClaimError::UnsupportedImageType(photo.content_type.clone()));
    }
    if photo.size() > MAX_PHOTO_PROOF_BYTES {
        return Err(ClaimError::PhotoTooLarge {
            size: photo.size(),
            max: MAX_PHOTO_PROOF_BYTES,
        });
    }
    Ok(())
}
