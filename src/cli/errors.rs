use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Target size must have a non-zero width or height, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crop error: {0}")]
    Crop(#[from] smartcrop::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}
