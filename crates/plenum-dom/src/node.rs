//! Document nodes: elements, text runs and comments.

use std::collections::HashMap;

use crate::style::{Float, Length, Overflow, Position, Style};

/// Index of a node within its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Measured layout metrics of an element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    /// Content-box height, excluding borders and scrollbars.
    pub client_height: i32,
    /// Border-box height as reported to scripts; margins are not included.
    pub offset_height: i32,
    /// Height of laid-out content, including any overflow.
    pub scroll_height: i32,
}

/// Kinds of document nodes.
#[derive(Debug)]
pub enum NodeKind {
    /// An element with tag, attributes, style and metrics.
    Element(Element),
    /// A text run. Text contributes no metrics of its own.
    Text(String),
    /// A comment.
    Comment(String),
}

/// An element node.
///
/// `intrinsic_height` stands in for the rendered auto height the host
/// measured; `vertical_margin` is margin-box space that `offset_height`
/// does not report but that still occupies flow in the container.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    id: Option<String>,
    attrs: HashMap<String, String>,
    style: Style,
    intrinsic_height: i32,
    vertical_margin: i32,
    pub(crate) metrics: Metrics,
}

impl Element {
    /// Create an element with default style and no measurements.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            attrs: HashMap::new(),
            style: Style::new(),
            intrinsic_height: 0,
            vertical_margin: 0,
            metrics: Metrics::default(),
        }
    }

    /// Set the element id. Ids are unique per document, enforced on insert.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Set a string attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Set an explicit height.
    #[must_use]
    pub fn with_height(mut self, height: Length) -> Self {
        self.style.height = Some(height);
        self
    }

    /// Set the positioning scheme.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.style.position = position;
        self
    }

    /// Set the float status.
    #[must_use]
    pub fn with_float(mut self, float: Float) -> Self {
        self.style.float = float;
        self
    }

    /// Set the overflow behavior.
    #[must_use]
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.style.overflow = overflow;
        self
    }

    /// Seed the rendered auto height used when no explicit height applies.
    #[must_use]
    pub fn with_intrinsic_height(mut self, height: i32) -> Self {
        self.intrinsic_height = height;
        self
    }

    /// Seed the total vertical margin of the element.
    #[must_use]
    pub fn with_vertical_margin(mut self, margin: i32) -> Self {
        self.vertical_margin = margin;
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Element id, if one was assigned.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Raw string attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Boolean attribute accessor: `"true"`/`"1"` and `"false"`/`"0"` are
    /// recognized; anything else (including absence) yields `default`.
    #[must_use]
    pub fn bool_attr(&self, name: &str, default: bool) -> bool {
        match self.attr(name) {
            Some("true" | "1") => true,
            Some("false" | "0") => false,
            _ => default,
        }
    }

    /// Integer attribute accessor. Malformed values read as absent.
    #[must_use]
    pub fn int_attr(&self, name: &str) -> Option<i32> {
        self.attr(name).and_then(|value| value.parse().ok())
    }

    /// Current style.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub(crate) fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Last measured metrics.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Seeded rendered auto height.
    #[must_use]
    pub fn intrinsic_height(&self) -> i32 {
        self.intrinsic_height
    }

    /// Seeded total vertical margin.
    #[must_use]
    pub fn vertical_margin(&self) -> i32 {
        self.vertical_margin
    }
}
