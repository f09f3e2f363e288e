//! Layout-analysis ("grounding") input types.
//!
//! A grounding payload is produced by an external layout-analysis step
//! and describes text fragments found on the pages of a document. The
//! resolver consumes it to locate table-of-contents rows; nothing here
//! is persisted past resolution.

use serde::{Deserialize, Serialize};

/// Normalized vertical bounding box of a text fragment.
///
/// `top` and `bottom` are fractions in `[0, 1]` of the page height,
/// measured from the top of the page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GroundingBox {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
}

impl GroundingBox {
    /// Vertical center as a fraction of page height from the page top.
    pub fn center_fraction(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// One text fragment from the layout-analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingChunk {
    /// Zero-based index of the page the fragment appears on.
    #[serde(default)]
    pub page: i64,
    /// Extracted text of the fragment.
    #[serde(default)]
    pub markdown: String,
    /// Vertical bounding box of the fragment.
    #[serde(rename = "box", default)]
    pub bounding_box: GroundingBox,
}

/// A grounding payload, accepted in either of the two wire shapes the
/// upstream layout service emits: a bare list of chunks, or an object
/// wrapping the list in a `chunks` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroundingPayload {
    Chunks(Vec<GroundingChunk>),
    Wrapped { chunks: Vec<GroundingChunk> },
}

impl GroundingPayload {
    /// The chunk list, regardless of wire shape.
    pub fn chunks(&self) -> &[GroundingChunk] {
        match self {
            GroundingPayload::Chunks(chunks) => chunks,
            GroundingPayload::Wrapped { chunks } => chunks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_fraction() {
        let bb = GroundingBox {
            top: 0.1,
            bottom: 0.14,
        };
        assert!((bb.center_fraction() - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_payload_bare_list() {
        let json = r#"[{"page": 0, "markdown": "Intro Page 2", "box": {"top": 0.1, "bottom": 0.2}}]"#;
        let payload: GroundingPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.chunks().len(), 1);
        assert_eq!(payload.chunks()[0].markdown, "Intro Page 2");
    }

    #[test]
    fn test_payload_wrapped_object() {
        let json = r#"{"chunks": [{"page": 0, "markdown": "Intro Page 2"}]}"#;
        let payload: GroundingPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.chunks().len(), 1);
        assert_eq!(payload.chunks()[0].page, 0);
    }

    #[test]
    fn test_chunk_missing_box_defaults() {
        let chunk: GroundingChunk = serde_json::from_str(r#"{"markdown": "Page 3"}"#).unwrap();
        assert_eq!(chunk.page, 0);
        assert_eq!(chunk.bounding_box.top, 0.0);
    }
}
