//! Vertical stretch layout for the Plenum UI framework.
//!
//! Resizes registered elements so each fills the remaining vertical space
//! inside its nearest positioned ancestor. The engine keeps a registry of
//! stretch targets ordered by document position (ancestors settle before
//! descendants) and re-runs the fitting pass whenever the host redraws or
//! the viewport resizes.
//!
//! Hosts own a [`StretchLayout`], wired to their platform through the
//! [`Platform`] trait, and call [`StretchLayout::after_redraw`] at the end of
//! their own layout pass. Individual elements are registered with
//! [`StretchLayout::get_or_create`], directly or via the declarative
//! directive surface in [`process_message`].
//!
//! Every failure mode here is a recoverable DOM state: a missing element or
//! an element without a positioned ancestor simply skips this pass and is
//! retried on the next triggering event. Nothing in this crate panics over
//! transient document structure.

mod coordinator;
mod message;
mod registry;
mod sort;
mod target;

pub use coordinator::{Platform, StretchLayout};
pub use message::process_message;
pub use registry::{Registry, TargetId};
pub use target::{AfterStretch, BeforeAction, BeforeStretch, StretchTarget};
