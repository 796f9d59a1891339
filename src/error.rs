//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Carries the two analysis failures (`InvalidDimensions`, `NoCandidates`),
//! settings validation, and the I/O, decoding and resampling errors of the
//! surrounding collaborators.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid dimensions: expected a non-zero target width or height")]
    InvalidDimensions,

    #[error("No crop candidates for a {target_width}x{target_height} target on a {image_width}x{image_height} image")]
    NoCandidates {
        image_width: u32,
        image_height: u32,
        target_width: u32,
        target_height: u32,
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Debug sink error: {0}")]
    DebugSink(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }

    pub fn debug_sink<E: std::fmt::Display>(e: E) -> Self {
        Error::DebugSink(e.to_string())
    }
}
