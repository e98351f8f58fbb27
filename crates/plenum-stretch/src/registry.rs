//! Registry of stretch targets: ordered sequence plus element-id index.

use std::collections::HashMap;

use plenum_dom::Document;

use crate::sort;
use crate::target::StretchTarget;

/// Handle to a registered stretch target. Handles stay valid across resorts
/// and become inert once the target is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub(crate) usize);

/// Ordered collection of stretch targets.
///
/// The sequence is kept in document order so ancestors settle before their
/// descendants; the element-id index gives O(1) at-most-one-per-element
/// checks. Sequence and index agree at every point a caller can observe,
/// the resort rebuild itself excepted.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Option<StretchTarget>>,
    order: Vec<TargetId>,
    by_element: HashMap<String, TargetId>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_element.len()
    }

    /// Whether no targets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }

    /// Target registered for an element id, if any.
    #[must_use]
    pub fn find_by_id(&self, element_id: &str) -> Option<TargetId> {
        self.by_element.get(element_id).copied()
    }

    /// Shared access to a target; `None` once it was removed.
    #[must_use]
    pub fn get(&self, id: TargetId) -> Option<&StretchTarget> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access to a target; `None` once it was removed.
    #[must_use]
    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut StretchTarget> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Current sequence, document order.
    #[must_use]
    pub fn ordered(&self) -> &[TargetId] {
        &self.order
    }

    /// Insert a target and resort. Document structure may have changed since
    /// the previous registration, so order is never assumed stable.
    ///
    /// Callers enforce at-most-one target per element id; see
    /// [`crate::StretchLayout::get_or_create`].
    pub fn insert(&mut self, target: StretchTarget, doc: &Document) -> TargetId {
        let id = TargetId(self.slots.len());
        self.by_element.insert(target.element_id().to_string(), id);
        self.slots.push(Some(target));
        self.order.push(id);
        self.resort(doc);
        id
    }

    /// Remove a target and resort. Returns `false` when it was already gone.
    pub fn remove(&mut self, id: TargetId, doc: &Document) -> bool {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return false;
        };
        let Some(target) = slot.take() else {
            return false;
        };
        self.by_element.remove(target.element_id());
        self.order.retain(|&entry| entry != id);
        self.resort(doc);
        true
    }

    pub(crate) fn resort(&mut self, doc: &Document) {
        self.order = sort::document_order(self, doc);
    }
}
