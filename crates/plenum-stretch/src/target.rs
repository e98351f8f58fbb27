//! Stretch targets and the height-fitting algorithm.

use std::fmt;

use plenum_dom::{Document, Length, NodeId, Overflow, Position};

/// Decision returned by a before-stretch callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeforeAction {
    /// Apply this height instead of the computed one.
    Resize(i32),
    /// Apply nothing; the callback vetoed the resize or performed it under
    /// its own rules. Overflow is still restored and the after callback
    /// still fires.
    Handled,
}

/// Callback invoked with the computed height before it is applied. Receives
/// the height and the element id; context lives in the closure's captures.
pub type BeforeStretch = Box<dyn FnMut(i32, &str) -> BeforeAction>;

/// Callback invoked with the final height after a pass for the element
/// completes.
pub type AfterStretch = Box<dyn FnMut(i32, &str)>;

/// One stretched element: bounds, hooks, and the fitting algorithm.
///
/// The target holds the element id, never a node handle; the element is
/// looked up on every pass, so destruction of the backing element degrades
/// to a no-op rather than a dangling reference.
pub struct StretchTarget {
    element_id: String,
    min_height: Option<i32>,
    max_height: Option<i32>,
    before: Option<BeforeStretch>,
    after: Option<AfterStretch>,
}

impl fmt::Debug for StretchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StretchTarget")
            .field("element_id", &self.element_id)
            .field("min_height", &self.min_height)
            .field("max_height", &self.max_height)
            .field("has_before", &self.before.is_some())
            .field("has_after", &self.after.is_some())
            .finish()
    }
}

impl StretchTarget {
    /// Create a target for `element_id`, normalizing the bounds: negative
    /// values read as absent and an inverted pair is swapped so that
    /// `min_height <= max_height` always holds.
    #[must_use]
    pub fn new(element_id: &str, min_height: Option<i32>, max_height: Option<i32>) -> Self {
        let min = min_height.filter(|&h| h >= 0);
        let max = max_height.filter(|&h| h >= 0);
        let (min, max) = match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
            bounds => bounds,
        };
        Self {
            element_id: element_id.to_string(),
            min_height: min,
            max_height: max,
            before: None,
            after: None,
        }
    }

    /// Id of the element this target stretches.
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Lower clamp bound, if any.
    #[must_use]
    pub fn min_height(&self) -> Option<i32> {
        self.min_height
    }

    /// Upper clamp bound, if any.
    #[must_use]
    pub fn max_height(&self) -> Option<i32> {
        self.max_height
    }

    /// Register a callback that can tweak or veto the computed height.
    pub fn add_before_stretch_callback(
        &mut self,
        callback: impl FnMut(i32, &str) -> BeforeAction + 'static,
    ) {
        self.before = Some(Box::new(callback));
    }

    /// Register a callback observing the final height of each pass.
    pub fn add_after_stretch_callback(&mut self, callback: impl FnMut(i32, &str) + 'static) {
        self.after = Some(Box::new(callback));
    }

    /// Fit the element to the remaining height of its positioned ancestor.
    ///
    /// A missing element or an element without a positioned ancestor is
    /// skipped silently; the next triggering event retries naturally.
    pub fn stretch(&mut self, doc: &mut Document) {
        let Some(element) = doc.element_by_id(&self.element_id) else {
            return;
        };
        let Some(ancestor) = positioned_ancestor(doc, element) else {
            return;
        };

        // Suppress transient scrollbars while measuring; restored on every
        // exit path below.
        let saved_overflow = doc.style(element).map_or(Overflow::Visible, |s| s.overflow);
        let saved_ancestor_overflow = doc.style(ancestor).map_or(Overflow::Visible, |s| s.overflow);
        doc.set_overflow(element, Overflow::Hidden);
        doc.set_overflow(ancestor, Overflow::Hidden);

        // Work in absolute pixels, seeding from the rendered height when the
        // current height style is absent or relative.
        let current = match doc.style(element).and_then(|s| s.height).and_then(Length::as_px) {
            Some(px) => px,
            None => {
                let px = doc.client_height(element);
                doc.set_style_height(element, Length::Px(px));
                px
            }
        };

        // Grow or shrink by the surplus between the ancestor's available
        // height and the height its in-flow children already consume.
        let available = doc.client_height(ancestor);
        let content = content_height(doc, ancestor);
        let mut new_height = (current + available - content).max(0);

        let mut clamped = false;
        if let Some(min) = self.min_height {
            if new_height < min {
                new_height = min;
                clamped = true;
            }
        }
        if let Some(max) = self.max_height {
            if new_height > max {
                new_height = max;
                clamped = true;
            }
        }

        let mut apply = true;
        if let Some(mut callback) = self.before.take() {
            match callback(new_height, &self.element_id) {
                BeforeAction::Resize(height) => new_height = height,
                BeforeAction::Handled => apply = false,
            }
            self.before = Some(callback);
        }

        if apply && new_height > 0 {
            doc.set_style_height(element, Length::Px(new_height));
            if !clamped {
                // Margins may be missing from reported offset heights, so
                // the change can overflow the ancestor; pull the height back
                // by the overflow it introduced.
                let overflow = doc.offset_height(ancestor) - doc.scroll_height(ancestor);
                doc.set_style_height(element, Length::Px((new_height + overflow).max(0)));
            }
        }

        doc.set_overflow(element, saved_overflow);
        doc.set_overflow(ancestor, saved_ancestor_overflow);

        if let Some(mut callback) = self.after.take() {
            let applied = doc
                .style(element)
                .and_then(|s| s.height)
                .and_then(Length::as_px)
                .unwrap_or(current);
            callback(applied, &self.element_id);
            self.after = Some(callback);
        }
    }
}

/// Walk up the parent chain to the nearest element with an explicit height
/// or absolute/fixed positioning. That element is the fill boundary.
fn positioned_ancestor(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut current = doc.parent(node);
    while let Some(candidate) = current {
        if let Some(style) = doc.style(candidate) {
            if style.height.is_some()
                || matches!(style.position, Position::Absolute | Position::Fixed)
            {
                return Some(candidate);
            }
        }
        current = doc.parent(candidate);
    }
    None
}

/// Sum of the heights of the ancestor's direct in-flow element children.
/// Floated and absolutely or fixed positioned children consume no in-flow
/// vertical space, so they are excluded; so are text and comment nodes.
fn content_height(doc: &Document, ancestor: NodeId) -> i32 {
    doc.children(ancestor)
        .iter()
        .filter_map(|&child| {
            doc.element(child)
                .filter(|element| element.style().in_flow())
                .map(|element| element.metrics().offset_height)
        })
        .sum()
}
