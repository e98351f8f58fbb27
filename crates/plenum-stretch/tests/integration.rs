//! Integration tests for plenum-stretch.
//!
//! These tests exercise the coordinator against a live document: the fill
//! arithmetic, clamping, callback hooks, listener lifecycle and directive
//! processing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use plenum_dom::{Document, Element, Length, NodeId};
use plenum_stretch::{BeforeAction, Platform, StretchLayout};
use proptest::prelude::*;

// =============================================================================
// Test Platform
// =============================================================================

/// Counting platform: records listener attach/detach and scheduled ticks.
#[derive(Clone, Default)]
struct TestPlatform {
    redraw_hook_active: bool,
    needs_deferred_resize: bool,
    attached: Rc<Cell<u32>>,
    detached: Rc<Cell<u32>>,
    ticks: Rc<Cell<u32>>,
}

impl Platform for TestPlatform {
    fn redraw_hook_active(&self) -> bool {
        self.redraw_hook_active
    }

    fn needs_deferred_resize(&self) -> bool {
        self.needs_deferred_resize
    }

    fn attach_resize_listener(&mut self) {
        self.attached.set(self.attached.get() + 1);
    }

    fn detach_resize_listener(&mut self) {
        self.detached.set(self.detached.get() + 1);
    }

    fn schedule_tick(&mut self) {
        self.ticks.set(self.ticks.get() + 1);
    }
}

/// Container with explicit height, one plain sibling and one target child.
///
/// Returns the document plus the container, sibling and target nodes.
fn fixture(
    container_height: i32,
    sibling_height: i32,
    target_height: i32,
) -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();
    let container = doc
        .append_element(
            doc.root(),
            Element::new("div")
                .with_id("container")
                .with_height(Length::Px(container_height)),
        )
        .expect("append container");
    let sibling = doc
        .append_element(
            container,
            Element::new("div")
                .with_id("sibling")
                .with_intrinsic_height(sibling_height),
        )
        .expect("append sibling");
    let target = doc
        .append_element(
            container,
            Element::new("div")
                .with_id("target")
                .with_height(Length::Px(target_height)),
        )
        .expect("append target");
    (doc, container, sibling, target)
}

fn px_height(doc: &Document, node: NodeId) -> Option<i32> {
    doc.style(node).and_then(|s| s.height).and_then(Length::as_px)
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_registration_is_idempotent() {
    let (doc, _, _, _) = fixture(400, 150, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());

    let first = layout.get_or_create(&doc, "target", Some(50), None);
    let second = layout.get_or_create(&doc, "target", Some(999), Some(1000));

    assert_eq!(first, second);
    assert_eq!(layout.registry().len(), 1);
    // The original bounds win; the second request returned the existing
    // target untouched.
    let target = layout.registry().get(first).expect("live target");
    assert_eq!(target.min_height(), Some(50));
    assert_eq!(target.max_height(), None);
}

#[test]
fn test_destroy_twice_is_noop() {
    let (doc, _, _, _) = fixture(400, 150, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());

    let id = layout.get_or_create(&doc, "target", None, None);
    layout.destroy(&doc, id);
    layout.destroy(&doc, id);

    assert!(layout.registry().is_empty());
}

#[test]
fn test_destroy_by_element_for_unknown_id_is_noop() {
    let (doc, _, _, _) = fixture(400, 150, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());
    layout.get_or_create(&doc, "target", None, None);

    layout.destroy_by_element(&doc, "nobody");

    assert_eq!(layout.registry().len(), 1);
}

// =============================================================================
// Fill arithmetic
// =============================================================================

#[test]
fn test_fill_scenario() {
    // Container client height 400, in-flow sibling 150, target currently
    // 100px. The content sum includes the target's own prior height (250
    // total), so the target grows by the 150px surplus to 250 and the
    // container is exactly filled.
    let (mut doc, container, _, target) = fixture(400, 150, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());
    layout.get_or_create(&doc, "target", None, None);

    layout.stretch_all(&mut doc);

    assert_eq!(px_height(&doc, target), Some(250));
    assert_eq!(doc.scroll_height(container), 400);
}

#[test]
fn test_repeated_passes_are_stable() {
    let (mut doc, _, _, target) = fixture(400, 150, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());
    layout.get_or_create(&doc, "target", None, None);

    layout.stretch_all(&mut doc);
    layout.stretch_all(&mut doc);
    layout.stretch_all(&mut doc);

    // The fill height is a fixed point of the algorithm.
    assert_eq!(px_height(&doc, target), Some(250));
}

#[test]
fn test_margin_overflow_is_pulled_back() {
    // The sibling's 20px margin occupies flow but is invisible to the
    // content sum, so the first application overflows the container and the
    // re-measure shrinks the target by the overflow.
    let mut doc = Document::new();
    let container = doc
        .append_element(
            doc.root(),
            Element::new("div")
                .with_id("container")
                .with_height(Length::Px(400)),
        )
        .expect("append container");
    doc.append_element(
        container,
        Element::new("div")
            .with_intrinsic_height(150)
            .with_vertical_margin(20),
    )
    .expect("append sibling");
    let target = doc
        .append_element(
            container,
            Element::new("div").with_id("target").with_height(Length::Px(100)),
        )
        .expect("append target");

    let mut layout = StretchLayout::new(TestPlatform::default());
    layout.get_or_create(&doc, "target", None, None);
    layout.stretch_all(&mut doc);

    assert_eq!(px_height(&doc, target), Some(230));
    assert_eq!(doc.scroll_height(container), 400);
}

#[test]
fn test_nested_targets_settle_outside_in() {
    // The outer target must settle before the inner one: the inner
    // container's height is the outer target's height.
    let mut doc = Document::new();
    let outer_container = doc
        .append_element(
            doc.root(),
            Element::new("div").with_height(Length::Px(600)),
        )
        .expect("append outer container");
    let outer = doc
        .append_element(
            outer_container,
            Element::new("div").with_id("outer").with_height(Length::Px(100)),
        )
        .expect("append outer target");
    let inner = doc
        .append_element(
            outer,
            Element::new("div").with_id("inner").with_height(Length::Px(50)),
        )
        .expect("append inner target");

    let mut layout = StretchLayout::new(TestPlatform::default());
    // Inner registered first; document order still runs outer first.
    layout.get_or_create(&doc, "inner", None, None);
    layout.get_or_create(&doc, "outer", None, None);
    layout.stretch_all(&mut doc);

    assert_eq!(px_height(&doc, outer), Some(600));
    assert_eq!(px_height(&doc, inner), Some(600));
}

// =============================================================================
// Clamping
// =============================================================================

#[test]
fn test_clamp_to_min_height() {
    // Content vastly exceeds the container, so the raw result would be 0.
    let (mut doc, _, _, target) = fixture(100, 900, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());
    layout.get_or_create(&doc, "target", Some(30), None);

    layout.stretch_all(&mut doc);

    assert_eq!(px_height(&doc, target), Some(30));
}

#[test]
fn test_clamp_to_max_height() {
    let (mut doc, _, _, target) = fixture(800, 100, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());
    layout.get_or_create(&doc, "target", None, Some(100));

    layout.stretch_all(&mut doc);

    assert_eq!(px_height(&doc, target), Some(100));
}

// =============================================================================
// Callbacks
// =============================================================================

#[test]
fn test_before_callback_tweaks_height() {
    let (mut doc, _, _, target) = fixture(400, 150, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());
    let id = layout.get_or_create(&doc, "target", None, None);

    layout.add_before_stretch_callback(id, |height, _| BeforeAction::Resize(height - 10));
    layout.stretch_all(&mut doc);

    assert_eq!(px_height(&doc, target), Some(240));
}

#[test]
fn test_before_callback_handled_skips_apply_but_after_still_fires() {
    let (mut doc, _, _, target) = fixture(400, 150, 100);
    let mut layout = StretchLayout::new(TestPlatform::default());
    let id = layout.get_or_create(&doc, "target", None, None);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_by_after = Rc::clone(&seen);
    layout.add_before_stretch_callback(id, |_, _| BeforeAction::Handled);
    layout.add_after_stretch_callback(id, move |height, element_id| {
        seen_by_after.borrow_mut().push((height, element_id.to_string()));
    });

    layout.stretch_all(&mut doc);

    // No height was applied, and the after callback observed the height that
    // remained.
    assert_eq!(px_height(&doc, target), Some(100));
    assert_eq!(seen.borrow().as_slice(), &[(100, "target".to_string())]);
}

// =============================================================================
// No-op safety
// =============================================================================

#[test]
fn test_missing_element_skips_only_itself() {
    let (mut doc, container, _, _) = fixture(400, 150, 100);
    let second = doc
        .append_element(
            container,
            Element::new("div").with_id("second").with_height(Length::Px(50)),
        )
        .expect("append second target");

    let mut layout = StretchLayout::new(TestPlatform::default());
    layout.get_or_create(&doc, "target", None, None);
    layout.get_or_create(&doc, "second", None, None);

    let first_node = doc.element_by_id("target").expect("attached");
    doc.detach(first_node);
    layout.stretch_all(&mut doc);

    // The detached target no-ops; the surviving one still stretched.
    // Content: sibling 150 + second 50 = 200, so second grows by 200.
    assert_eq!(px_height(&doc, second), Some(250));
    assert_eq!(layout.registry().len(), 2);
}

#[test]
fn test_no_positioned_ancestor_is_noop() {
    let mut doc = Document::new();
    let wrapper = doc
        .append_element(doc.root(), Element::new("div"))
        .expect("append wrapper");
    let target = doc
        .append_element(
            wrapper,
            Element::new("div").with_id("target").with_height(Length::Px(100)),
        )
        .expect("append target");

    let mut layout = StretchLayout::new(TestPlatform::default());
    layout.get_or_create(&doc, "target", None, None);
    layout.stretch_all(&mut doc);

    assert_eq!(px_height(&doc, target), Some(100));
}

// =============================================================================
// Listener lifecycle
// =============================================================================

#[test]
fn test_listener_attached_on_first_and_detached_on_last() {
    let (doc, _, _, _) = fixture(400, 150, 100);
    let platform = TestPlatform::default();
    let attached = Rc::clone(&platform.attached);
    let detached = Rc::clone(&platform.detached);
    let mut layout = StretchLayout::new(platform);

    let first = layout.get_or_create(&doc, "target", None, None);
    let second = layout.get_or_create(&doc, "sibling", None, None);
    assert_eq!(attached.get(), 1);

    // Intermediate churn with one target still present: no listener churn.
    layout.destroy(&doc, first);
    let third = layout.get_or_create(&doc, "container", None, None);
    assert_eq!(attached.get(), 1);
    assert_eq!(detached.get(), 0);

    layout.destroy(&doc, second);
    layout.destroy(&doc, third);
    assert_eq!(detached.get(), 1);

    // A fresh first registration attaches again, exactly once.
    layout.get_or_create(&doc, "target", None, None);
    assert_eq!(attached.get(), 2);
}

#[test]
fn test_no_listener_when_redraw_hook_is_active() {
    let (doc, _, _, _) = fixture(400, 150, 100);
    let platform = TestPlatform {
        redraw_hook_active: true,
        ..TestPlatform::default()
    };
    let attached = Rc::clone(&platform.attached);
    let mut layout = StretchLayout::new(platform);

    layout.get_or_create(&doc, "target", None, None);
    assert_eq!(attached.get(), 0);
}

// =============================================================================
// Deferral
// =============================================================================

#[test]
fn test_legacy_platform_defers_to_tick() {
    let (mut doc, _, _, target) = fixture(400, 150, 100);
    let platform = TestPlatform {
        needs_deferred_resize: true,
        ..TestPlatform::default()
    };
    let ticks = Rc::clone(&platform.ticks);
    let mut layout = StretchLayout::new(platform);
    layout.get_or_create(&doc, "target", None, None);

    layout.on_resize(&mut doc);
    layout.after_redraw(&mut doc);

    // Nothing ran synchronously; two ticks are pending.
    assert_eq!(px_height(&doc, target), Some(100));
    assert_eq!(ticks.get(), 2);

    layout.on_tick(&mut doc);
    assert_eq!(px_height(&doc, target), Some(250));
}

#[test]
fn test_tick_after_registry_emptied_is_safe() {
    let (mut doc, _, _, _) = fixture(400, 150, 100);
    let platform = TestPlatform {
        needs_deferred_resize: true,
        ..TestPlatform::default()
    };
    let mut layout = StretchLayout::new(platform);
    let id = layout.get_or_create(&doc, "target", None, None);

    layout.on_resize(&mut doc);
    layout.destroy(&doc, id);

    // The scheduled pass still fires; with nothing registered it no-ops.
    layout.on_tick(&mut doc);
}

#[test]
fn test_synchronous_platform_stretches_on_resize() {
    let (mut doc, _, _, target) = fixture(400, 150, 100);
    let platform = TestPlatform::default();
    let ticks = Rc::clone(&platform.ticks);
    let mut layout = StretchLayout::new(platform);
    layout.get_or_create(&doc, "target", None, None);

    layout.on_resize(&mut doc);

    assert_eq!(px_height(&doc, target), Some(250));
    assert_eq!(ticks.get(), 0);
}

// =============================================================================
// Document order (property)
// =============================================================================

proptest! {
    /// For any tree shape and registration order, the sorted sequence puts
    /// every ancestor before each of its registered descendants.
    #[test]
    fn prop_ancestors_precede_descendants(
        shape in (2usize..24).prop_flat_map(|n| {
            (
                proptest::collection::vec(any::<prop::sample::Index>(), n - 1),
                proptest::collection::vec(any::<bool>(), n),
                Just(n),
            )
        })
    ) {
        let (parent_picks, registered, n) = shape;

        // Node 0 is the root's first child; node i hangs under one of the
        // previously created nodes.
        let mut doc = Document::new();
        let mut nodes = Vec::with_capacity(n);
        let mut parents: Vec<Option<usize>> = Vec::with_capacity(n);
        let first = doc
            .append_element(doc.root(), Element::new("div").with_id("n0"))
            .expect("append first");
        nodes.push(first);
        parents.push(None);
        for (i, pick) in parent_picks.iter().enumerate() {
            let parent_index = pick.index(i + 1);
            let id = format!("n{}", i + 1);
            let node = doc
                .append_element(nodes[parent_index], Element::new("div").with_id(&id))
                .expect("append node");
            nodes.push(node);
            parents.push(Some(parent_index));
        }

        let mut layout = StretchLayout::new(TestPlatform::default());
        for (i, &register) in registered.iter().enumerate() {
            if register {
                layout.get_or_create(&doc, &format!("n{i}"), None, None);
            }
        }

        // Position of each registered node in the sorted sequence.
        let position = |i: usize| -> Option<usize> {
            let id = layout.registry().find_by_id(&format!("n{i}"))?;
            layout.registry().ordered().iter().position(|&t| t == id)
        };
        let is_ancestor = |a: usize, b: usize| -> bool {
            let mut current = parents[b];
            while let Some(p) = current {
                if p == a {
                    return true;
                }
                current = parents[p];
            }
            false
        };

        for a in 0..n {
            for b in 0..n {
                if registered[a] && registered[b] && is_ancestor(a, b) {
                    let pa = position(a).expect("registered targets are ordered");
                    let pb = position(b).expect("registered targets are ordered");
                    prop_assert!(pa < pb, "ancestor n{a} must precede n{b}");
                }
            }
        }
    }
}
