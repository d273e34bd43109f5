//! External adapters for the posts domain

pub mod image_cdn;

pub use image_cdn::{ImageCdnConfig, ImageCdnStore};
