//! Grounding-derived target extraction.
//!
//! Table-of-contents rows are recognized in layout-analysis output by a
//! text heuristic: a chunk on the first page whose text contains the
//! literal token "Page", followed by the destination page number. The
//! heuristic is fragile by nature, so every failure is a per-chunk skip,
//! never a fatal error.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;

use crate::model::{
    GroundingPayload, NavigationTarget, Rect, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_X,
};

use super::{PageNumbering, ResolveOptions};

/// Matches "Page" followed by the next whitespace-delimited token.
fn page_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Page\s+(\S+)").unwrap())
}

/// Extract navigation targets from a grounding payload.
///
/// Chunks survive when they sit on page 0 (the table-of-contents page)
/// and their text contains "Page". The destination index is parsed from
/// the token after the last "Page" occurrence; the vertical position is
/// the chunk's box center, denormalized against the reference page
/// height and flipped to the bottom-left origin.
pub fn extract(payload: &GroundingPayload, options: &ResolveOptions) -> Vec<NavigationTarget> {
    let mut targets = Vec::new();

    for chunk in payload.chunks() {
        if chunk.page != 0 || !chunk.markdown.contains("Page") {
            continue;
        }

        let Some(token) = last_page_token(&chunk.markdown) else {
            warn!(
                "Skipping grounding chunk: no page token after \"Page\" in {:?}",
                chunk.markdown
            );
            continue;
        };

        let Ok(written) = token.parse::<i64>() else {
            warn!(
                "Skipping grounding chunk: page token {:?} is not an integer",
                token
            );
            continue;
        };

        let destination_page = match apply_numbering(written, options.numbering) {
            Some(index) => index,
            None => {
                warn!(
                    "Skipping grounding chunk: page number {} is out of range for {:?} numbering",
                    written, options.numbering
                );
                continue;
            }
        };

        let y = options.page_height * (1.0 - chunk.bounding_box.center_fraction());

        targets.push(NavigationTarget {
            label: chunk.markdown.clone(),
            rect: Rect::new(DEFAULT_X, y, DEFAULT_WIDTH, DEFAULT_HEIGHT),
            destination_page,
        });
    }

    targets
}

/// The token following the last occurrence of "Page" in `text`.
fn last_page_token(text: &str) -> Option<&str> {
    page_token_re()
        .captures_iter(text)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn apply_numbering(written: i64, numbering: PageNumbering) -> Option<usize> {
    match numbering {
        PageNumbering::AsWritten => usize::try_from(written).ok(),
        PageNumbering::OneBased => usize::try_from(written.checked_sub(1)?).ok(),
    }
}
