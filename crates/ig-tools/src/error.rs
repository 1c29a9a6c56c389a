//! Error types for ig-tools

use thiserror::Error;

/// ig-tools error type
///
/// Every operation propagates these to the caller unmodified, with one
/// exception: account-level insights converts transport failures into a
/// structured `{"status": "error"}` payload instead.
#[derive(Error, Debug)]
pub enum InstagramError {
    #[error("Media container creation failed: {0}")]
    ContainerCreation(String),

    #[error("Carousel requires at least 2 valid items, only {collected} container(s) were created")]
    InsufficientCarouselItems { collected: usize },

    #[error("Media processing failed: {0}")]
    MediaProcessing(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0}")]
    Core(#[from] ig_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, InstagramError>;
