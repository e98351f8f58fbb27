//! Layout coordination: registry ownership, platform hooks, trigger points.

use log::debug;

use plenum_dom::Document;

use crate::registry::{Registry, TargetId};
use crate::target::{BeforeAction, StretchTarget};

/// Host platform seam for the coordinator.
///
/// Everything here is a capability or side effect the host owns: whether its
/// own redraw pass already drives layout, whether resize handling must wait
/// a tick, and the actual viewport listener plumbing.
pub trait Platform {
    /// Whether the host framework's own redraw pass re-runs layout on this
    /// platform. When it does, the coordinator needs no resize listener of
    /// its own.
    fn redraw_hook_active(&self) -> bool;

    /// Whether this platform's layout engine may not have settled ancestor
    /// heights synchronously after a resize, so the pass must run on the
    /// next tick instead.
    fn needs_deferred_resize(&self) -> bool;

    /// Install the viewport resize listener. Called exactly once on the
    /// empty-to-non-empty registry transition.
    fn attach_resize_listener(&mut self);

    /// Remove the viewport resize listener. Called exactly once on the
    /// non-empty-to-empty registry transition.
    fn detach_resize_listener(&mut self);

    /// Schedule a call to [`StretchLayout::on_tick`] on the next scheduling
    /// tick. Fire and forget: there is no cancellation.
    fn schedule_tick(&mut self);
}

/// Coordinates stretch passes over an explicitly owned registry.
///
/// One instance per host layout manager; registration, traversal and
/// triggering all go through it, so there is no ambient global state.
#[derive(Debug)]
pub struct StretchLayout<P: Platform> {
    registry: Registry,
    platform: P,
    listener_attached: bool,
}

impl<P: Platform> StretchLayout<P> {
    /// Create a coordinator wired to the given platform.
    #[must_use]
    pub fn new(platform: P) -> Self {
        Self {
            registry: Registry::new(),
            platform,
            listener_attached: false,
        }
    }

    /// The registered targets, in document order.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The host platform hooks.
    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Idempotent registration: a second request for an already registered
    /// element id returns the existing target untouched.
    pub fn get_or_create(
        &mut self,
        doc: &Document,
        element_id: &str,
        min_height: Option<i32>,
        max_height: Option<i32>,
    ) -> TargetId {
        if let Some(existing) = self.registry.find_by_id(element_id) {
            return existing;
        }
        let id = self
            .registry
            .insert(StretchTarget::new(element_id, min_height, max_height), doc);
        debug!("registered stretch target for #{element_id}");
        if self.registry.len() == 1 && !self.platform.redraw_hook_active() && !self.listener_attached
        {
            self.platform.attach_resize_listener();
            self.listener_attached = true;
            debug!("attached viewport resize listener");
        }
        id
    }

    /// Deregister a target. Safe to call repeatedly; once removed, the
    /// handle is inert and later calls are no-ops.
    pub fn destroy(&mut self, doc: &Document, target: TargetId) {
        if !self.registry.remove(target, doc) {
            return;
        }
        debug!("destroyed stretch target");
        if self.registry.is_empty() && self.listener_attached {
            self.platform.detach_resize_listener();
            self.listener_attached = false;
            debug!("detached viewport resize listener");
        }
    }

    /// Deregister whatever target is registered for an element id.
    pub fn destroy_by_element(&mut self, doc: &Document, element_id: &str) {
        if let Some(target) = self.registry.find_by_id(element_id) {
            self.destroy(doc, target);
        }
    }

    /// Run the fitting algorithm on every registered target, ancestors
    /// first. Targets fail independently: one missing element skips only
    /// itself.
    pub fn stretch_all(&mut self, doc: &mut Document) {
        let order: Vec<TargetId> = self.registry.ordered().to_vec();
        debug!("stretch pass over {} target(s)", order.len());
        for id in order {
            if let Some(target) = self.registry.get_mut(id) {
                target.stretch(doc);
            }
        }
    }

    /// Extension point the host calls after its own layout pass for a
    /// subtree has run.
    pub fn after_redraw(&mut self, doc: &mut Document) {
        self.trigger(doc);
    }

    /// Entry point for the platform's viewport resize listener.
    pub fn on_resize(&mut self, doc: &mut Document) {
        self.trigger(doc);
    }

    /// Deferred pass scheduled via [`Platform::schedule_tick`]. Runs
    /// unconditionally; a registry emptied since scheduling makes this a
    /// natural no-op.
    pub fn on_tick(&mut self, doc: &mut Document) {
        self.stretch_all(doc);
    }

    fn trigger(&mut self, doc: &mut Document) {
        if self.platform.needs_deferred_resize() {
            self.platform.schedule_tick();
        } else {
            self.stretch_all(doc);
        }
    }

    /// Register a height-tweaking callback on an existing target.
    pub fn add_before_stretch_callback(
        &mut self,
        target: TargetId,
        callback: impl FnMut(i32, &str) -> BeforeAction + 'static,
    ) {
        if let Some(target) = self.registry.get_mut(target) {
            target.add_before_stretch_callback(callback);
        }
    }

    /// Register a final-height observer on an existing target.
    pub fn add_after_stretch_callback(
        &mut self,
        target: TargetId,
        callback: impl FnMut(i32, &str) + 'static,
    ) {
        if let Some(target) = self.registry.get_mut(target) {
            target.add_after_stretch_callback(callback);
        }
    }
}
