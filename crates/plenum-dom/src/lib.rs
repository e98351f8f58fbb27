//! Retained document model for the Plenum UI framework.
//!
//! A minimal element tree with the surface layout utilities need: unique
//! element ids, the style properties that govern vertical flow, and measured
//! pixel metrics (`client_height`, `offset_height`, `scroll_height`) kept
//! current by a bookkeeping [`Document::reflow`] pass. This is deliberately
//! not a CSS engine: rendered auto heights are seeded by the host as
//! intrinsic heights, and `reflow` only propagates them.

mod document;
mod node;
mod style;

pub use document::{Document, DomError};
pub use node::{Element, Metrics, NodeId, NodeKind};
pub use style::{Float, Length, Overflow, Position, Style};
