//! Output document graph construction.
//!
//! Every navigation request builds a fresh output document by importing
//! the source document's pages, in order, under new object identities.
//! Downstream code (the annotation builder) resolves destination pages
//! exclusively through [`OutputGraph::page_id`], so a link can never be
//! built against the discarded source graph.

use std::collections::{HashMap, HashSet};

use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Page attributes that may be inherited from ancestor nodes in the
/// source page tree. They are materialized onto each imported page,
/// because the import flattens the tree to a single parent node.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// A freshly built output document with a stable, ordered page arena.
///
/// `pages[i]` is the import of the source's i-th page; its identity is
/// assigned exactly once, at import time, and is the only identity a
/// destination may reference.
pub struct OutputGraph {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl OutputGraph {
    /// Import every page of `source`, in source order, into a new
    /// output graph.
    ///
    /// This never fails for a structurally valid source: a zero-page
    /// source yields a zero-page output.
    pub fn import(source: &Document) -> OutputGraph {
        let mut doc = Document::with_version(source.version.clone());

        // Assign fresh ids for every source object up front, then clone
        // each object with its references rewritten into the new space.
        let mut id_map: HashMap<ObjectId, ObjectId> = HashMap::new();
        let mut next_id: u32 = 1;
        for &old_id in source.objects.keys() {
            id_map.insert(old_id, (next_id, 0));
            next_id += 1;
        }

        for (&old_id, object) in source.objects.iter() {
            let mut cloned = object.clone();
            rewrite_references(&mut cloned, &id_map);
            doc.objects.insert(id_map[&old_id], cloned);
        }
        doc.max_id = next_id.saturating_sub(1);

        let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
        let page_ids: Vec<ObjectId> = source_pages
            .iter()
            .filter_map(|old_id| id_map.get(old_id).copied())
            .collect();

        // Flattening the page tree drops ancestor nodes, so inherited
        // attributes must land on the pages themselves first.
        for (&old_page_id, &new_page_id) in source_pages.iter().zip(page_ids.iter()) {
            materialize_inherited(source, old_page_id, &mut doc, new_page_id, &id_map);
        }

        let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(page_ids.len() as i64));
        let pages_id = doc.add_object(pages_dict);

        for &page_id in &page_ids {
            if let Some(Object::Dictionary(page_dict)) = doc.objects.get_mut(&page_id) {
                page_dict.set("Parent", Object::Reference(pages_id));
            }
        }

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);

        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer
            .set("Size", Object::Integer(doc.max_id as i64 + 1));
        if let Ok(Object::Reference(info_id)) = source.trailer.get(b"Info") {
            if let Some(&new_info) = id_map.get(info_id) {
                doc.trailer.set("Info", Object::Reference(new_info));
            }
        }

        // The source's own catalog and page-tree nodes were imported
        // with everything else; they are superseded now and would only
        // bloat the output.
        for old_node in source_tree_nodes(source) {
            if let Some(new_node) = id_map.get(&old_node) {
                doc.objects.remove(new_node);
            }
        }

        debug!("imported {} pages into output graph", page_ids.len());
        OutputGraph { doc, page_ids }
    }

    /// Number of pages in the output graph.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Output-local identity of the page at `index`.
    ///
    /// This is the sole accessor through which destinations may be
    /// resolved.
    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.page_ids.get(index).copied()
    }

    /// Identity of the first page (the table-of-contents page).
    pub fn first_page_id(&self) -> Option<ObjectId> {
        self.page_ids.first().copied()
    }

    /// Serialize the graph to bytes. Failure here indicates an internal
    /// inconsistency, not bad input.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| Error::Serialize(e.to_string()))?;
        Ok(buffer)
    }

    pub(crate) fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    #[cfg(test)]
    pub(crate) fn doc(&self) -> &Document {
        &self.doc
    }
}

/// Rewrite every object reference in `object` through `id_map`.
fn rewrite_references(object: &mut Object, id_map: &HashMap<ObjectId, ObjectId>) {
    match object {
        Object::Reference(id) => {
            if let Some(&new_id) = id_map.get(id) {
                *object = Object::Reference(new_id);
            }
        }
        Object::Array(items) => {
            for item in items {
                rewrite_references(item, id_map);
            }
        }
        Object::Dictionary(dict) => {
            let keys: Vec<_> = dict.iter().map(|(k, _)| k.clone()).collect();
            for key in keys {
                if let Ok(value) = dict.get_mut(&key) {
                    rewrite_references(value, id_map);
                }
            }
        }
        Object::Stream(stream) => {
            let keys: Vec<_> = stream.dict.iter().map(|(k, _)| k.clone()).collect();
            for key in keys {
                if let Ok(value) = stream.dict.get_mut(&key) {
                    rewrite_references(value, id_map);
                }
            }
        }
        _ => {}
    }
}

/// Copy inheritable attributes the source page lacks onto its imported
/// counterpart, resolving them up the source Parent chain.
fn materialize_inherited(
    source: &Document,
    old_page_id: ObjectId,
    doc: &mut Document,
    new_page_id: ObjectId,
    id_map: &HashMap<ObjectId, ObjectId>,
) {
    for key in INHERITABLE_KEYS {
        let already_present = source
            .get_dictionary(old_page_id)
            .map(|dict| dict.has(key))
            .unwrap_or(false);
        if already_present {
            continue;
        }

        if let Some(value) = lookup_inherited(source, old_page_id, key) {
            let mut cloned = value.clone();
            rewrite_references(&mut cloned, id_map);
            if let Some(Object::Dictionary(page_dict)) = doc.objects.get_mut(&new_page_id) {
                page_dict.set(key, cloned);
            }
        }
    }
}

/// Walk the Parent chain looking for an inheritable attribute.
fn lookup_inherited<'a>(source: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = page_id;
    let mut visited = HashSet::new();
    while visited.insert(current) {
        let dict = source.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => return None,
        }
    }
    None
}

/// Ids of the source catalog and every intermediate Pages node.
fn source_tree_nodes(source: &Document) -> Vec<ObjectId> {
    let mut nodes = Vec::new();
    let Ok(Object::Reference(root_id)) = source.trailer.get(b"Root") else {
        return nodes;
    };
    nodes.push(*root_id);

    if let Ok(catalog) = source.get_dictionary(*root_id) {
        if let Ok(Object::Reference(pages_id)) = catalog.get(b"Pages") {
            let mut visited = HashSet::new();
            collect_pages_nodes(source, *pages_id, &mut nodes, &mut visited);
        }
    }
    nodes
}

fn collect_pages_nodes(
    source: &Document,
    node_id: ObjectId,
    nodes: &mut Vec<ObjectId>,
    visited: &mut HashSet<ObjectId>,
) {
    if !visited.insert(node_id) {
        return;
    }
    let Ok(dict) = source.get_dictionary(node_id) else {
        return;
    };
    let is_pages_node = dict
        .get(b"Type")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(|name| name == b"Pages")
        .unwrap_or(false);
    if !is_pages_node {
        return;
    }

    nodes.push(node_id);
    if let Ok(Object::Array(kids)) = dict.get(b"Kids") {
        for kid in kids {
            if let Object::Reference(kid_id) = kid {
                collect_pages_nodes(source, *kid_id, nodes, visited);
            }
        }
    }
}
