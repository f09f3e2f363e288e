//! Target specifications and normalized navigation targets.

use serde::{Deserialize, Serialize};

use super::GroundingPayload;

/// Default x coordinate for explicit items that omit one.
pub const DEFAULT_X: f64 = 50.0;
/// Default clickable width for explicit items.
pub const DEFAULT_WIDTH: f64 = 520.0;
/// Default clickable height for explicit items.
pub const DEFAULT_HEIGHT: f64 = 35.0;

/// One explicit table-of-contents entry, as supplied by the caller.
///
/// `y` and `page` are required for the item to produce a link; items
/// missing either are skipped during resolution, never a fatal error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocItem {
    /// Display name, used only for logging.
    pub name: Option<String>,
    /// Left edge of the clickable region (default 50).
    pub x: Option<f64>,
    /// Bottom edge of the clickable region.
    pub y: Option<f64>,
    /// Zero-based destination page index.
    pub page: Option<i64>,
    /// Width of the clickable region (default 520).
    pub width: Option<f64>,
    /// Height of the clickable region (default 35).
    pub height: Option<f64>,
}

impl TocItem {
    /// Create an item with the required fields set and defaults elsewhere.
    pub fn new(name: impl Into<String>, y: f64, page: i64) -> Self {
        Self {
            name: Some(name.into()),
            x: None,
            y: Some(y),
            page: Some(page),
            width: None,
            height: None,
        }
    }

    /// Name for log messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }
}

/// Parameters for the synthesized (auto-generated grid) variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SynthesisParams {
    /// Vertical position of the first generated row.
    pub start_y: f64,
    /// Vertical distance between consecutive rows.
    pub spacing: f64,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            start_y: 650.0,
            spacing: 60.0,
        }
    }
}

/// The caller-supplied description of which pages to link to and where.
///
/// Three strategies produce the same normalized [`NavigationTarget`]
/// shape, so the annotation builder is agnostic to which one supplied
/// its input.
#[derive(Debug, Clone)]
pub enum TargetSpec {
    /// An ordered list of explicit entries.
    Explicit(Vec<TocItem>),
    /// A layout-analysis payload to extract entries from.
    Grounding(GroundingPayload),
    /// One generated row per page after the first.
    Synthesized(SynthesisParams),
}

impl Default for TargetSpec {
    fn default() -> Self {
        TargetSpec::Synthesized(SynthesisParams::default())
    }
}

/// Clickable rectangle in page coordinate space (origin bottom-left,
/// unit = 1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Corners as the PDF `/Rect` convention: (x1, y1, x2, y2).
    pub fn corners(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A normalized navigation target, ready for annotation construction.
///
/// `destination_page` is a zero-based index into the *output* document's
/// page arena; the annotation builder drops targets whose index is out
/// of range.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationTarget {
    /// Label used only for logging.
    pub label: String,
    /// Clickable region on the table-of-contents page.
    pub rect: Rect,
    /// Zero-based index of the page the link navigates to.
    pub destination_page: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toc_item_display_name() {
        let item = TocItem::new("Overview", 650.0, 2);
        assert_eq!(item.display_name(), "Overview");

        let anonymous = TocItem {
            name: None,
            x: None,
            y: Some(650.0),
            page: Some(2),
            width: None,
            height: None,
        };
        assert_eq!(anonymous.display_name(), "Unnamed");
    }

    #[test]
    fn test_rect_corners() {
        let rect = Rect::new(50.0, 650.0, 520.0, 35.0);
        assert_eq!(rect.corners(), (50.0, 650.0, 570.0, 685.0));
    }

    #[test]
    fn test_synthesis_defaults() {
        let params = SynthesisParams::default();
        assert_eq!(params.start_y, 650.0);
        assert_eq!(params.spacing, 60.0);
    }

    #[test]
    fn test_toc_item_deserializes_sparse_json() {
        let item: TocItem = serde_json::from_str(r#"{"name": "X", "page": 2}"#).unwrap();
        assert_eq!(item.name.as_deref(), Some("X"));
        assert_eq!(item.page, Some(2));
        assert!(item.y.is_none());
    }
}
