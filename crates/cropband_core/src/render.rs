//! Drawing seam between the selection machine and whatever paints pixels.

use crate::geometry::Rect;

/// Paints and erases the selection outline.
///
/// The machine erases an outline by drawing it a second time with the same
/// geometry, so `draw_outline` must be self-inverting: two calls with an
/// identical rectangle restore every pixel the first call touched. An XOR
/// pen has this property; an opaque stroke does not.
pub trait OutlineRenderer {
    /// Draw (or erase) the outline of `rect` in view space.
    fn draw_outline(&mut self, rect: Rect);

    /// Drop any visible outline and return the surface to its base content.
    fn clear(&mut self);
}

/// Renderer that paints nothing. Useful for headless use and tests that only
/// exercise the state machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl OutlineRenderer for NullRenderer {
    fn draw_outline(&mut self, _rect: Rect) {}

    fn clear(&mut self) {}
}
