//! # pdfnav
//!
//! Inject clickable table-of-contents navigation links into an existing
//! PDF document.
//!
//! Given a source document and a target specification — explicit
//! coordinates, a layout-analysis ("grounding") payload, or synthesis
//! parameters for an auto-generated grid — pdfnav produces a new
//! document whose first page carries clickable regions, each navigating
//! the viewer to a later page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfnav::{add_navigation, NavOptions, TargetSpec, TocItem};
//!
//! fn main() -> pdfnav::Result<()> {
//!     let bytes = std::fs::read("report.pdf")?;
//!     let spec = TargetSpec::Explicit(vec![
//!         TocItem::new("Executive Summary", 650.0, 1),
//!         TocItem::new("Findings", 590.0, 3),
//!     ]);
//!
//!     let result = add_navigation(&bytes, &spec, &NavOptions::default())?;
//!     std::fs::write("report_with_navigation.pdf", result.bytes)?;
//!     println!("added {} links", result.links_added);
//!     Ok(())
//! }
//! ```
//!
//! ## Design notes
//!
//! - The output is always a fresh object graph: every source page is
//!   imported under a new identity before any link is built, so a
//!   destination can never dangle into the discarded source graph.
//! - Per-item failures (missing coordinates, out-of-range pages,
//!   unparsable labels) drop the single item and continue; a document
//!   with eight rows where one is malformed still gets seven working
//!   links.

pub mod annot;
pub mod detect;
pub mod error;
pub mod graph;
pub mod model;
pub mod resolve;

pub use error::{Error, Result};
pub use graph::OutputGraph;
pub use model::{
    GroundingBox, GroundingChunk, GroundingPayload, NavigationTarget, Rect, SynthesisParams,
    TargetSpec, TocItem,
};
pub use resolve::{PageNumbering, ResolveOptions, REFERENCE_PAGE_HEIGHT};

use log::info;
use lopdf::Document;
use std::path::Path;

/// Options for a navigation-injection run.
#[derive(Debug, Clone, Default)]
pub struct NavOptions {
    /// Draw a thin visible border around each link region.
    pub show_borders: bool,

    /// Treat an empty outcome as an error: a zero-page source becomes
    /// [`Error::EmptyDocument`] and zero surviving targets becomes
    /// [`Error::NoValidTargets`]. Off by default; an output with zero
    /// links is a valid, if unhelpful, output.
    pub require_links: bool,

    /// Resolver tuning (reference page height, numbering convention).
    pub resolve: ResolveOptions,
}

impl NavOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show visible link borders.
    pub fn with_borders(mut self, show: bool) -> Self {
        self.show_borders = show;
        self
    }

    /// Fail instead of producing an output with zero links.
    pub fn require_links(mut self) -> Self {
        self.require_links = true;
        self
    }

    /// Set resolver options.
    pub fn with_resolve(mut self, resolve: ResolveOptions) -> Self {
        self.resolve = resolve;
        self
    }
}

/// Outcome of a navigation-injection run.
#[derive(Debug, Clone)]
pub struct NavigationResult {
    /// The serialized output document.
    pub bytes: Vec<u8>,
    /// Page count of the output (always equals the source's).
    pub page_count: usize,
    /// Targets produced by the resolver before bounds checking.
    pub targets_requested: usize,
    /// Annotations actually attached.
    pub links_added: usize,
}

/// Inject navigation links into `bytes` according to `spec`.
///
/// Runs the full pipeline: detect, load, import into a fresh output
/// graph, resolve targets, attach annotations, serialize.
pub fn add_navigation(
    bytes: &[u8],
    spec: &TargetSpec,
    options: &NavOptions,
) -> Result<NavigationResult> {
    let source = load_document(bytes)?;

    let mut output = OutputGraph::import(&source);
    drop(source);

    let page_count = output.page_count();
    info!("document has {} pages", page_count);
    if page_count == 0 && options.require_links {
        return Err(Error::EmptyDocument);
    }

    let targets = resolve::resolve(spec, page_count, &options.resolve);
    let links_added = annot::attach_links(&mut output, &targets, options.show_borders);

    if links_added == 0 && options.require_links {
        return Err(Error::NoValidTargets);
    }

    let bytes = output.save_to_bytes()?;
    info!(
        "added {} of {} navigation links",
        links_added,
        targets.len()
    );

    Ok(NavigationResult {
        bytes,
        page_count,
        targets_requested: targets.len(),
        links_added,
    })
}

/// Inject navigation links into a file on disk.
pub fn add_navigation_file<P: AsRef<Path>>(
    path: P,
    spec: &TargetSpec,
    options: &NavOptions,
) -> Result<NavigationResult> {
    let bytes = std::fs::read(path)?;
    add_navigation(&bytes, spec, options)
}

/// Parse source bytes into a page graph.
fn load_document(bytes: &[u8]) -> Result<Document> {
    detect::ensure_pdf_bytes(bytes)?;
    let doc = Document::load_mem(bytes).map_err(|e| match e {
        lopdf::Error::Decryption(_) => Error::Encrypted,
        _ => Error::from(e),
    })?;
    if doc.is_encrypted() {
        return Err(Error::Encrypted);
    }
    Ok(doc)
}

/// Builder for navigation-injection runs.
///
/// # Example
///
/// ```no_run
/// use pdfnav::{Navigator, SynthesisParams, TargetSpec};
///
/// let bytes = std::fs::read("report.pdf")?;
/// let result = Navigator::new()
///     .show_borders(true)
///     .apply(&bytes, &TargetSpec::Synthesized(SynthesisParams::default()))?;
/// # Ok::<(), pdfnav::Error>(())
/// ```
pub struct Navigator {
    options: NavOptions,
}

impl Navigator {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: NavOptions::default(),
        }
    }

    /// Draw visible borders around link regions.
    pub fn show_borders(mut self, show: bool) -> Self {
        self.options.show_borders = show;
        self
    }

    /// Fail instead of producing an output with zero links.
    pub fn require_links(mut self) -> Self {
        self.options.require_links = true;
        self
    }

    /// Set the reference page height for grounding-derived targets.
    pub fn page_height(mut self, height: f64) -> Self {
        self.options.resolve.page_height = height;
        self
    }

    /// Set the page numbering convention for grounding-derived targets.
    pub fn numbering(mut self, numbering: PageNumbering) -> Self {
        self.options.resolve.numbering = numbering;
        self
    }

    /// Run the pipeline on in-memory bytes.
    pub fn apply(&self, bytes: &[u8], spec: &TargetSpec) -> Result<NavigationResult> {
        add_navigation(bytes, spec, &self.options)
    }

    /// Run the pipeline on a file.
    pub fn apply_file<P: AsRef<Path>>(&self, path: P, spec: &TargetSpec) -> Result<NavigationResult> {
        add_navigation_file(path, spec, &self.options)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigator_builder() {
        let navigator = Navigator::new()
            .show_borders(true)
            .require_links()
            .page_height(842.0)
            .numbering(PageNumbering::OneBased);

        assert!(navigator.options.show_borders);
        assert!(navigator.options.require_links);
        assert_eq!(navigator.options.resolve.page_height, 842.0);
        assert_eq!(navigator.options.resolve.numbering, PageNumbering::OneBased);
    }

    #[test]
    fn test_nav_options_defaults() {
        let options = NavOptions::default();
        assert!(!options.show_borders);
        assert!(!options.require_links);
        assert_eq!(options.resolve.page_height, REFERENCE_PAGE_HEIGHT);
    }

    #[test]
    fn test_add_navigation_rejects_empty_data() {
        let result = add_navigation(&[], &TargetSpec::default(), &NavOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_add_navigation_rejects_non_pdf() {
        let result = add_navigation(
            b"<!DOCTYPE html><html></html>",
            &TargetSpec::default(),
            &NavOptions::default(),
        );
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_add_navigation_rejects_truncated_pdf() {
        // Valid header, garbage body.
        let result = add_navigation(
            b"%PDF-1.7\nnot actually a document",
            &TargetSpec::default(),
            &NavOptions::default(),
        );
        assert!(result.is_err());
    }
}
