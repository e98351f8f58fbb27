//! Style properties consulted by layout utilities.

use serde::{Deserialize, Serialize};

/// CSS positioning scheme of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    /// Normal flow.
    #[default]
    Static,
    /// Normal flow, offset relative to its own slot.
    Relative,
    /// Out of flow, placed against the nearest positioned ancestor.
    Absolute,
    /// Out of flow, placed against the viewport.
    Fixed,
}

/// Float status of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Float {
    /// Not floated.
    #[default]
    None,
    /// Floated to the left edge.
    Left,
    /// Floated to the right edge.
    Right,
}

/// Overflow behavior of an element's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Overflow {
    /// Content may paint outside the box.
    #[default]
    Visible,
    /// Overflowing content is clipped.
    Hidden,
    /// Scrollbars appear when needed.
    Auto,
    /// Scrollbars are always present.
    Scroll,
}

/// An explicit length value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    /// Absolute pixels.
    Px(i32),
    /// Percentage of the containing block.
    Percent(f32),
}

impl Length {
    /// Pixel value, when this length is expressed in absolute pixels.
    #[must_use]
    pub const fn as_px(self) -> Option<i32> {
        match self {
            Self::Px(px) => Some(px),
            Self::Percent(_) => None,
        }
    }
}

/// The subset of computed style that vertical layout reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    /// Explicit height, if any.
    pub height: Option<Length>,
    /// Positioning scheme.
    pub position: Position,
    /// Float status.
    pub float: Float,
    /// Overflow behavior.
    pub overflow: Overflow,
}

impl Style {
    /// Create a default style: static, unfloated, visible overflow, no
    /// explicit height.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this element consumes vertical space in normal flow.
    ///
    /// Floated and absolutely or fixed positioned elements do not.
    #[must_use]
    pub fn in_flow(&self) -> bool {
        self.float == Float::None && !matches!(self.position, Position::Absolute | Position::Fixed)
    }
}
