//! PDF header detection.
//!
//! The loader rejects non-PDF bytes here before handing them to lopdf,
//! so callers get a clean [`Error::UnknownFormat`] instead of a parser
//! error deep inside the object graph.

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Verify that `data` starts with a PDF header and return the version
/// string (e.g., "1.7").
pub fn ensure_pdf_bytes(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }

    if !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnknownFormat);
    }

    Ok(version)
}

/// Check if bytes carry a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    ensure_pdf_bytes(data).is_ok()
}

/// Version strings look like "1.0" through "2.0".
fn is_valid_version(version: &str) -> bool {
    let mut chars = version.chars();
    matches!(
        (chars.next(), chars.next(), chars.next(), chars.next()),
        (Some(major), Some('.'), Some(minor), None)
            if major.is_ascii_digit() && minor.is_ascii_digit()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        assert_eq!(ensure_pdf_bytes(data).unwrap(), "1.7");
    }

    #[test]
    fn test_detect_pdf_2_0() {
        let data = b"%PDF-2.0\n%\xe2\xe3\xcf\xd3";
        assert_eq!(ensure_pdf_bytes(data).unwrap(), "2.0");
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = ensure_pdf_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        let result = ensure_pdf_bytes(b"%PDF");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }
}
