//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations.
///
/// Scanning and rendering never fail; only format lookup and the final
/// packaging step produce errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    #[error("I/O error while packaging: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Zip container error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
