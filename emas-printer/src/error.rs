//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Printer profile yields a non-positive label size
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// QR encoder rejected the payload
    #[error("QR encode failed: {0}")]
    QrEncode(String),

    /// Raster could not be encoded as an image file
    #[error("Image encode failed: {0}")]
    ImageEncode(String),

    /// Print surface (frame / popup window) failed
    #[error("Print surface error: {0}")]
    Surface(String),

    /// IO error while spooling or saving previews
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
