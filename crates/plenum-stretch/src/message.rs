//! Directive processing: declarative init/dispose descriptors.
//!
//! The server side describes which elements stretch through message parts:
//! `<init>` children carry per-element items with an `eid` attribute, a
//! `heightStretched` flag and optional `minimumStretchedHeight` /
//! `maximumStretchedHeight` bounds; `<dispose>` children name elements to
//! deregister. The message payload is itself a document, separate from the
//! UI document the targets act on.

use plenum_dom::{Document, NodeId};

use crate::coordinator::{Platform, StretchLayout};

const ATTR_ELEMENT_ID: &str = "eid";
const ATTR_STRETCHED: &str = "heightStretched";
const ATTR_MIN: &str = "minimumStretchedHeight";
const ATTR_MAX: &str = "maximumStretchedHeight";

/// Apply the directives under a message part to the layout registry.
/// Unknown directive tags and items without an element id are skipped.
pub fn process_message<P: Platform>(
    layout: &mut StretchLayout<P>,
    ui: &Document,
    message: &Document,
    part: NodeId,
) {
    for &directive in message.children(part) {
        let Some(element) = message.element(directive) else {
            continue;
        };
        match element.tag() {
            "init" => process_init(layout, ui, message, directive),
            "dispose" => process_dispose(layout, ui, message, directive),
            _ => {}
        }
    }
}

fn process_init<P: Platform>(
    layout: &mut StretchLayout<P>,
    ui: &Document,
    message: &Document,
    directive: NodeId,
) {
    for &item in message.children(directive) {
        let Some(element) = message.element(item) else {
            continue;
        };
        let Some(element_id) = element.attr(ATTR_ELEMENT_ID) else {
            continue;
        };
        if !element.bool_attr(ATTR_STRETCHED, false) {
            continue;
        }
        let min = element.int_attr(ATTR_MIN);
        let max = element.int_attr(ATTR_MAX);
        layout.get_or_create(ui, element_id, min, max);
    }
}

fn process_dispose<P: Platform>(
    layout: &mut StretchLayout<P>,
    ui: &Document,
    message: &Document,
    directive: NodeId,
) {
    for &item in message.children(directive) {
        if let Some(element_id) = message.element(item).and_then(|e| e.attr(ATTR_ELEMENT_ID)) {
            layout.destroy_by_element(ui, element_id);
        }
    }
}
