//! Target resolution.
//!
//! Turns a [`TargetSpec`] into a normalized, ordered sequence of
//! [`NavigationTarget`] values. Resolution is total: malformed entries
//! are dropped with a warning and processing continues, so a list with
//! one bad row still yields links for all the good ones.

mod grounding;

use log::warn;

use crate::model::{
    NavigationTarget, Rect, TargetSpec, TocItem, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_X,
};

/// How page numbers parsed out of grounding text map to destination
/// page indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageNumbering {
    /// Use the number exactly as written in the text as a zero-based
    /// index. This is the historical behavior.
    #[default]
    AsWritten,
    /// Treat the written number as one-based and decrement it.
    OneBased,
}

/// Reference page height used to place grounding-derived targets.
///
/// The grounding box is normalized to page height, but the resolver does
/// not consult the actual source page; it assumes a US Letter page
/// (792 pt tall). Override via [`ResolveOptions::with_page_height`] when
/// the table-of-contents page has a different size.
pub const REFERENCE_PAGE_HEIGHT: f64 = 792.0;

/// Options controlling target resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Page height used to denormalize grounding boxes.
    pub page_height: f64,
    /// Destination index convention for grounding-derived targets.
    pub numbering: PageNumbering,
}

impl ResolveOptions {
    /// Create resolve options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference page height.
    pub fn with_page_height(mut self, height: f64) -> Self {
        self.page_height = height;
        self
    }

    /// Set the page numbering convention.
    pub fn with_numbering(mut self, numbering: PageNumbering) -> Self {
        self.numbering = numbering;
        self
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            page_height: REFERENCE_PAGE_HEIGHT,
            numbering: PageNumbering::default(),
        }
    }
}

/// Resolve a target specification into normalized navigation targets.
///
/// `page_count` is only consulted by the synthesized variant; bounds
/// checking against the output document happens later, in the
/// annotation builder.
pub fn resolve(spec: &TargetSpec, page_count: usize, options: &ResolveOptions) -> Vec<NavigationTarget> {
    match spec {
        TargetSpec::Explicit(items) => resolve_explicit(items),
        TargetSpec::Grounding(payload) => grounding::extract(payload, options),
        TargetSpec::Synthesized(params) => {
            let mut targets = Vec::new();
            if page_count > 1 {
                for i in 1..page_count {
                    let y = params.start_y - (i as f64 - 1.0) * params.spacing;
                    targets.push(NavigationTarget {
                        label: format!("Page {}", i),
                        rect: Rect::new(DEFAULT_X, y, DEFAULT_WIDTH, DEFAULT_HEIGHT),
                        destination_page: i,
                    });
                }
            }
            targets
        }
    }
}

fn resolve_explicit(items: &[TocItem]) -> Vec<NavigationTarget> {
    let mut targets = Vec::new();
    for item in items {
        let (y, page) = match (item.y, item.page) {
            (Some(y), Some(page)) => (y, page),
            _ => {
                warn!(
                    "Skipping item '{}': missing y or page",
                    item.display_name()
                );
                continue;
            }
        };
        let Ok(page) = usize::try_from(page) else {
            warn!(
                "Skipping item '{}': negative page index {}",
                item.display_name(),
                page
            );
            continue;
        };

        targets.push(NavigationTarget {
            label: item.display_name().to_string(),
            rect: Rect::new(
                item.x.unwrap_or(DEFAULT_X),
                y,
                item.width.unwrap_or(DEFAULT_WIDTH),
                item.height.unwrap_or(DEFAULT_HEIGHT),
            ),
            destination_page: page,
        });
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SynthesisParams;

    #[test]
    fn test_explicit_applies_defaults() {
        let items = vec![TocItem::new("Overview", 650.0, 2)];
        let targets = resolve_explicit(&items);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].rect, Rect::new(50.0, 650.0, 520.0, 35.0));
        assert_eq!(targets[0].destination_page, 2);
    }

    #[test]
    fn test_explicit_skips_missing_required_fields() {
        let items = vec![
            TocItem {
                name: Some("X".into()),
                x: None,
                y: None,
                page: Some(2),
                width: None,
                height: None,
            },
            TocItem::new("Y", 600.0, 3),
        ];
        let targets = resolve_explicit(&items);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "Y");
    }

    #[test]
    fn test_explicit_skips_negative_page() {
        let items = vec![TocItem::new("Back", 650.0, -1)];
        assert!(resolve_explicit(&items).is_empty());
    }

    #[test]
    fn test_synthesized_grid() {
        let spec = TargetSpec::Synthesized(SynthesisParams::default());
        let targets = resolve(&spec, 8, &ResolveOptions::default());

        assert_eq!(targets.len(), 7);
        let ys: Vec<f64> = targets.iter().map(|t| t.rect.y).collect();
        assert_eq!(ys, vec![650.0, 590.0, 530.0, 470.0, 410.0, 350.0, 290.0]);
        let pages: Vec<usize> = targets.iter().map(|t| t.destination_page).collect();
        assert_eq!(pages, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_synthesized_single_page_yields_nothing() {
        let spec = TargetSpec::Synthesized(SynthesisParams::default());
        assert!(resolve(&spec, 1, &ResolveOptions::default()).is_empty());
        assert!(resolve(&spec, 0, &ResolveOptions::default()).is_empty());
    }

    #[test]
    fn test_resolve_options_builder() {
        let options = ResolveOptions::new()
            .with_page_height(842.0)
            .with_numbering(PageNumbering::OneBased);
        assert_eq!(options.page_height, 842.0);
        assert_eq!(options.numbering, PageNumbering::OneBased);
    }
}
