//! Error types for the pdfnav library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfnav operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while injecting navigation links.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be rewritten.
    #[error("Document is encrypted")]
    Encrypted,

    /// The source document has no pages.
    ///
    /// Only surfaced when [`NavOptions::require_links`] is set; otherwise
    /// a zero-page source produces a zero-page output.
    ///
    /// [`NavOptions::require_links`]: crate::NavOptions::require_links
    #[error("Source document has no pages")]
    EmptyDocument,

    /// Every requested navigation target was dropped.
    ///
    /// Only surfaced when [`NavOptions::require_links`] is set; otherwise
    /// an output with zero links is still a valid output.
    ///
    /// [`NavOptions::require_links`]: crate::NavOptions::require_links
    #[error("No valid navigation targets remained after resolution")]
    NoValidTargets,

    /// The output graph could not be written back to bytes.
    ///
    /// Indicates an internal inconsistency, not bad input.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format: not a valid PDF");

        let err = Error::NoValidTargets;
        assert_eq!(
            err.to_string(),
            "No valid navigation targets remained after resolution"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
