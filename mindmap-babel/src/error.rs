//! Error types for format operations

use std::fmt;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested direction
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors raised while resolving a node image.
///
/// These never escape the image pass: a failed resolution keeps the
/// placeholder values and is only logged.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// The source could not be fetched or read
    Fetch(String),
    /// The bytes are not an image we can measure
    Decode(String),
    /// The URL kind is not handled by this resolver
    Unsupported(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Fetch(msg) => write!(f, "Image fetch failed: {msg}"),
            ImageError::Decode(msg) => write!(f, "Image decode failed: {msg}"),
            ImageError::Unsupported(url) => write!(f, "Unsupported image source: {url}"),
        }
    }
}

impl std::error::Error for ImageError {}

/// Error returned by a [`MathRenderer`](crate::common::math::MathRenderer).
#[derive(Debug, Clone, PartialEq)]
pub struct MathError(pub String);

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Math rendering failed: {}", self.0)
    }
}

impl std::error::Error for MathError {}
