//! Document-order sorting of the target sequence.
//!
//! Ancestors must be resized before descendants: a descendant's available
//! height depends on its ancestor's already settled height. Pre-order
//! document position approximates containment order, and it is recomputed on
//! every registry mutation because intervening DOM changes may have
//! reordered containment.

use plenum_dom::{Document, NodeId};

use crate::registry::{Registry, TargetId};

/// Collect registered targets in pre-order document position. Targets whose
/// element is currently detached keep their previous relative order at the
/// tail, so the sequence and the element-id index never disagree; the
/// missing-element guard in the stretch pass keeps them inert.
pub(crate) fn document_order(registry: &Registry, doc: &Document) -> Vec<TargetId> {
    let mut sorted = Vec::with_capacity(registry.len());
    visit(doc, doc.root(), registry, &mut sorted);
    for &id in registry.ordered() {
        if !sorted.contains(&id) {
            sorted.push(id);
        }
    }
    sorted
}

fn visit(doc: &Document, node: NodeId, registry: &Registry, sorted: &mut Vec<TargetId>) {
    if let Some(element) = doc.element(node) {
        if let Some(id) = element.id() {
            if let Some(target) = registry.find_by_id(id) {
                sorted.push(target);
            }
        }
    }
    for &child in doc.children(node) {
        if doc.is_element(child) {
            visit(doc, child, registry, sorted);
        }
    }
}
