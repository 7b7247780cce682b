//! Input and notification types shared by the selection machine and its
//! embedding shell.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Pointer button identifier, independent of any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl PointerButton {
    /// Whether this is the primary (selection-driving) button.
    pub fn is_primary(&self) -> bool {
        matches!(self, PointerButton::Left)
    }
}

/// Cursor shape the shell should display for the current pointer position.
///
/// Names follow the usual CSS/desktop resize vocabulary so shells can map
/// them onto whatever cursor set their backend offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Crosshair while drawing a fresh selection.
    Crosshair,
    /// Four-way move cursor over the selection body.
    Move,
    /// Horizontal resize over the left or right edge.
    EwResize,
    /// Vertical resize over the top or bottom edge.
    NsResize,
    /// Diagonal resize over the top-left or bottom-right corner.
    NwseResize,
    /// Diagonal resize over the top-right or bottom-left corner.
    NeswResize,
}

/// Snapshot emitted whenever the pointer moves over the selection surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Pointer position in image space, or the image origin when the pointer
    /// is outside the displayed frame.
    pub position: Point,
    /// Current selection in image space. Covers the whole image while no
    /// selection is set.
    pub selection: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_button() {
        assert!(PointerButton::Left.is_primary());
        assert!(!PointerButton::Right.is_primary());
        assert!(!PointerButton::Middle.is_primary());
        assert!(!PointerButton::Other(4).is_primary());
    }

    #[test]
    fn test_default_cursor() {
        assert_eq!(CursorHint::default(), CursorHint::Default);
    }
}
