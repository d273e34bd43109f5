//! Media attached to posts
//!
//! A media row records the public URL handed back by the object-storage
//! collaborator. Media is owned by its post and is cascade-deleted with it;
//! claims are not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{MediaId, PostId};

/// An uploaded image attached to a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub post_id: PostId,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Data for attaching media to a post
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub post_id: PostId,
    pub image_url: String,
}

impl Media {
    pub fn new(data: NewMedia) -> Self {
        Self {
            id: MediaId::new_v7(),
            post_id: data.post_id,
            image_url: data.image_url,
            created_at: Utc::now(),
        }
    }
}
