//! Asset loading
//!
//! The renderer loads one kind of asset itself: the sky texture.

pub mod image_loader;

pub use image_loader::{load_texture, ImageData};

/// Asset loading errors
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
