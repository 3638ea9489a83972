//! Error types for the PDF generation library.
//!
//! This module defines all error types that can occur while building and
//! serializing a document.

use std::path::PathBuf;

/// Result type alias for PDF generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document assembly and serialization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed color specification: bad hex length, unknown color name.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Image placement scale factor was zero or negative.
    #[error("Invalid image scale: {0} (must be positive)")]
    InvalidScale(f32),

    /// A page used an image name that was never registered via embedding.
    #[error("Unresolved resource: image '{0}' was never embedded")]
    UnresolvedResource(String),

    /// An internal forward reference was never rewritten to a concrete
    /// object identity before serialization. Indicates an engine bug.
    #[error("Dangling reference: placeholder '{0}' was never resolved")]
    DanglingReference(&'static str),

    /// Image file path did not resolve.
    #[error("Image file not found: {0}")]
    ImageNotFound(PathBuf),

    /// Image decode or encode failure from the raster codec.
    #[error("Image error: {0}")]
    Image(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
