//! Link annotation construction.
//!
//! Each resolved target becomes one `/Link` annotation on the first page
//! of the output graph, pointing at an output-local page identity via a
//! `GoTo` action with `Fit` view. Targets whose destination index falls
//! outside the output arena are dropped, never fatal.

use log::{info, warn};
use lopdf::{Dictionary, Object, ObjectId};

use crate::graph::OutputGraph;
use crate::model::NavigationTarget;

/// Accent color (RGB) for visible link borders.
const BORDER_COLOR: [f64; 3] = [0.0, 0.0, 1.0];

/// Attach one link annotation per in-range target to the first page.
///
/// Returns the number of annotations actually attached, which may be
/// less than `targets.len()` when destinations are out of range.
pub fn attach_links(
    graph: &mut OutputGraph,
    targets: &[NavigationTarget],
    show_borders: bool,
) -> usize {
    let Some(toc_page_id) = graph.first_page_id() else {
        if !targets.is_empty() {
            warn!("Output document has no pages; dropping {} targets", targets.len());
        }
        return 0;
    };

    let page_count = graph.page_count();
    let mut attached = 0;

    for target in targets {
        // Bounds check against the output arena, which is authoritative.
        let Some(dest_page_id) = graph.page_id(target.destination_page) else {
            warn!(
                "Skipping link '{}': page {} doesn't exist (document has {} pages)",
                target.label, target.destination_page, page_count
            );
            continue;
        };

        let annotation = build_link_dict(target, dest_page_id, show_borders);
        let annotation_id = graph.doc_mut().add_object(annotation);
        append_annotation(graph, toc_page_id, annotation_id);
        attached += 1;

        info!(
            "Added link '{}' at ({}, {}) -> page {}",
            target.label, target.rect.x, target.rect.y, target.destination_page
        );
    }

    attached
}

/// Build the annotation dictionary for one target.
fn build_link_dict(
    target: &NavigationTarget,
    dest_page_id: ObjectId,
    show_borders: bool,
) -> Dictionary {
    let (x1, y1, x2, y2) = target.rect.corners();

    let mut link = Dictionary::new();
    link.set("Type", Object::Name(b"Annot".to_vec()));
    link.set("Subtype", Object::Name(b"Link".to_vec()));
    link.set(
        "Rect",
        Object::Array(vec![
            Object::Real(x1 as f32),
            Object::Real(y1 as f32),
            Object::Real(x2 as f32),
            Object::Real(y2 as f32),
        ]),
    );

    if show_borders {
        link.set(
            "Border",
            Object::Array(vec![
                Object::Integer(1),
                Object::Integer(1),
                Object::Integer(0),
            ]),
        );
        link.set(
            "C",
            Object::Array(BORDER_COLOR.iter().map(|&c| Object::Real(c as f32)).collect()),
        );
    } else {
        link.set(
            "Border",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(0),
            ]),
        );
    }

    // Invert on click: visible feedback even with an invisible border.
    link.set("H", Object::Name(b"I".to_vec()));

    let mut action = Dictionary::new();
    action.set("S", Object::Name(b"GoTo".to_vec()));
    action.set(
        "D",
        Object::Array(vec![
            Object::Reference(dest_page_id),
            Object::Name(b"Fit".to_vec()),
        ]),
    );
    link.set("A", Object::Dictionary(action));

    link
}

/// Append `annotation_id` to the page's `/Annots`, creating the array if
/// absent and tolerating an existing array held behind a reference.
fn append_annotation(graph: &mut OutputGraph, page_id: ObjectId, annotation_id: ObjectId) {
    let doc = graph.doc_mut();

    let annots_target = match doc.objects.get(&page_id) {
        Some(Object::Dictionary(dict)) => match dict.get(b"Annots") {
            Ok(Object::Reference(array_id)) => Some(*array_id),
            _ => None,
        },
        _ => None,
    };

    if let Some(array_id) = annots_target {
        if let Some(Object::Array(items)) = doc.objects.get_mut(&array_id) {
            items.push(Object::Reference(annotation_id));
            return;
        }
    }

    if let Some(Object::Dictionary(page_dict)) = doc.objects.get_mut(&page_id) {
        match page_dict.get_mut(b"Annots") {
            Ok(Object::Array(items)) => {
                items.push(Object::Reference(annotation_id));
            }
            _ => {
                page_dict.set(
                    "Annots",
                    Object::Array(vec![Object::Reference(annotation_id)]),
                );
            }
        }
    }
}
