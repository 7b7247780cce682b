//! The rubber-band selection state machine.
//!
//! [`RubberBand`] consumes raw pointer events from a hosting surface and
//! keeps a crop rectangle consistent across draws, moves, edge and corner
//! resizes, display-mode switches, and image swaps. Outline painting goes
//! through the [`OutlineRenderer`] seam. Erasing is a second draw with the
//! previous geometry, so renderers must be self-inverting; the machine
//! guarantees that erase draw happens before the geometry is touched.

use crate::callback::Notifier;
use crate::event::{CursorHint, PointerButton, StatusEvent};
use crate::geometry::{Point, Rect, Size};
use crate::mapper::{DisplayMode, Mapping};
use crate::render::OutlineRenderer;
use crate::zones::HitZones;

// ============================================================================
// Operations
// ============================================================================

/// What the pointer is doing (or would do, while hovering) to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    /// No interaction possible at the current position.
    #[default]
    None,
    /// Drawing a fresh rectangle from the press point.
    Draw,
    /// Dragging the whole rectangle.
    Move,
    /// Dragging the left edge.
    Left,
    /// Dragging the top edge.
    Top,
    /// Dragging the right edge.
    Right,
    /// Dragging the bottom edge.
    Bottom,
    /// Dragging the top-left corner.
    TopLeft,
    /// Dragging the top-right corner.
    TopRight,
    /// Dragging the bottom-right corner.
    BottomRight,
    /// Dragging the bottom-left corner.
    BottomLeft,
}

impl Operation {
    /// The cursor shape a host should show for this operation.
    pub fn cursor_hint(&self) -> CursorHint {
        match self {
            Operation::None => CursorHint::Default,
            Operation::Draw => CursorHint::Crosshair,
            Operation::Move => CursorHint::Move,
            Operation::Left | Operation::Right => CursorHint::EwResize,
            Operation::Top | Operation::Bottom => CursorHint::NsResize,
            Operation::TopLeft | Operation::BottomRight => CursorHint::NwseResize,
            Operation::TopRight | Operation::BottomLeft => CursorHint::NeswResize,
        }
    }
}

// ============================================================================
// Rubber band state machine
// ============================================================================

/// Interactive crop-rectangle state driven by pointer events.
///
/// The machine owns the selection rectangle in view space. Hosts feed it
/// pointer events plus the image and container dimensions; it classifies each
/// press against the rectangle's hit zones, updates geometry while dragging,
/// keeps the rectangle inside the displayed image frame, and reports results
/// through the status and commit notifiers.
#[derive(Debug)]
pub struct RubberBand {
    /// Current selection in view space. Always normalized between events.
    rect: Rect,
    /// Selection at the last primary press. A double-click is preceded by
    /// spurious single-click events whose effect this snapshot undoes.
    backup: Rect,
    /// View-space rectangle of the displayed image, cached between events.
    frame: Rect,
    op: Operation,
    dragging: bool,
    /// Press point, or the previous pointer position during a move drag.
    anchor: Point,
    disabled: bool,
    image: Size,
    container: Size,
    mode: DisplayMode,
    zones: HitZones,
    cursor: CursorHint,
    on_status: Notifier<StatusEvent>,
    on_commit: Notifier<Rect>,
}

impl Default for RubberBand {
    fn default() -> Self {
        Self::new()
    }
}

impl RubberBand {
    pub fn new() -> Self {
        Self {
            rect: Rect::ZERO,
            backup: Rect::ZERO,
            frame: Rect::ZERO,
            op: Operation::None,
            dragging: false,
            anchor: Point::new(0, 0),
            disabled: false,
            image: Size::new(0, 0),
            container: Size::new(0, 0),
            mode: DisplayMode::default(),
            zones: HitZones::default(),
            cursor: CursorHint::default(),
            on_status: Notifier::none(),
            on_commit: Notifier::none(),
        }
    }

    /// Replace the hit-zone tuning.
    pub fn with_zones(mut self, zones: HitZones) -> Self {
        self.zones = zones;
        self
    }

    /// Register the callback fired on every pointer move.
    pub fn on_status(mut self, f: impl Fn(StatusEvent) + 'static) -> Self {
        self.on_status = Notifier::new(f);
        self
    }

    /// Register the callback fired on double-click, carrying the image-space
    /// selection to crop.
    pub fn on_commit(mut self, f: impl Fn(Rect) + 'static) -> Self {
        self.on_commit = Notifier::new(f);
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The selection rectangle as held, in view space.
    pub fn selection_view_space(&self) -> Rect {
        self.rect
    }

    /// The selection mapped to image coordinates. Falls back to the full
    /// image rectangle while no selection is set.
    pub fn selection_image_space(&self) -> Rect {
        let crop = self.current_mapping().to_image_rect(self.rect);
        if crop.is_empty() {
            Rect::new(0, 0, self.image.width, self.image.height)
        } else {
            crop
        }
    }

    pub fn operation(&self) -> Operation {
        self.op
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Cursor shape for the most recent pointer position.
    pub fn cursor_hint(&self) -> CursorHint {
        self.cursor
    }

    /// View-space rectangle of the displayed image as last derived.
    pub fn view_frame(&self) -> Rect {
        self.frame
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    // ------------------------------------------------------------------
    // Host state
    // ------------------------------------------------------------------

    /// Set the native dimensions of the displayed image. Drops the selection
    /// when the freshly derived frame no longer contains it.
    pub fn set_image(&mut self, size: Size) {
        self.image = size;
        self.frame = self.mapping().frame;
        if !self.frame.contains_rect(&self.rect) {
            self.rect = Rect::ZERO;
        }
        log::info!("Image set to {}x{}", size.width, size.height);
    }

    /// Track a resize of the hosting surface.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
        self.frame = self.mapping().frame;
    }

    /// Switch between fit and native display, rescaling the selection so it
    /// keeps covering the same image content.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        let orig = self.mapping().frame;
        self.mode = mode;
        self.frame = self.mapping().frame;
        log::info!("Display mode set to {:?}", mode);
        if orig.is_empty() || self.rect.is_empty() {
            return;
        }

        let sx = self.frame.width as f64 / orig.width as f64;
        let sy = self.frame.height as f64 / orig.height as f64;
        self.rect.height = (self.rect.height as f64 * sy).round() as i32;
        self.rect.width = (self.rect.width as f64 * sx).round() as i32;

        // Rescale the frame-relative offset and re-anchor to the new frame.
        let dx = ((self.rect.x - orig.x) as f64 * sx).round() as i32;
        let dy = ((self.rect.y - orig.y) as f64 * sy).round() as i32;
        self.rect.x = dx + self.frame.x;
        self.rect.y = dy + self.frame.y;
    }

    /// Disable or re-enable cropping. Disabling drops the selection.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.rect = Rect::ZERO;
            self.op = Operation::None;
            self.dragging = false;
            log::debug!("Selection disabled");
        }
    }

    // ------------------------------------------------------------------
    // Pointer entry points
    // ------------------------------------------------------------------

    /// Primary-button press: snapshot the selection for double-click revert,
    /// classify the point, and start the matching drag. Non-primary or
    /// disabled presses drop the selection.
    pub fn on_press(
        &mut self,
        point: Point,
        button: PointerButton,
        renderer: &mut dyn OutlineRenderer,
    ) {
        if self.disabled || !button.is_primary() {
            self.op = Operation::None;
        } else {
            self.dragging = true;
            self.frame = self.mapping().frame;
            self.backup = self.rect;
            self.op = self.classify(point);
        }
        log::debug!("Press at ({}, {}) starts {:?}", point.x, point.y, self.op);

        match self.op {
            Operation::Draw => {
                self.anchor = point;
                self.rect = Rect::ZERO;
                self.repaint(renderer);
            }
            Operation::None => {
                self.dragging = false;
                self.rect = Rect::ZERO;
                self.repaint(renderer);
            }
            _ => {
                self.anchor = point;
                // Ink the outline so the next move can erase it by redraw.
                renderer.clear();
                renderer.draw_outline(self.rect);
            }
        }
    }

    /// Pointer move: while dragging, erase the previous outline, apply the
    /// geometry update for the (possibly flipped) operation, and ink the new
    /// outline. While hovering, only reclassify for the cursor hint. Always
    /// emits a status notification.
    pub fn on_move(&mut self, point: Point, renderer: &mut dyn OutlineRenderer) {
        if self.dragging {
            self.op = Self::flip_past_opposite_edge(self.op, point, &self.rect);
            // Erase with the previous geometry, strictly before mutation.
            renderer.draw_outline(self.rect);
        } else {
            self.op = self.classify(point);
        }
        self.cursor = self.op.cursor_hint();

        let (clamped, inside) = self.clamp_to_frame(point);
        if self.dragging {
            self.apply_geometry(clamped);
            renderer.draw_outline(self.rect);
        }
        self.emit_status(clamped, inside);
    }

    /// Primary-button release: finish the drag at the release point, leave
    /// the rectangle normalized and painted, and return to [`Operation::None`].
    pub fn on_release(&mut self, point: Point, renderer: &mut dyn OutlineRenderer) {
        let (point, _) = self.clamp_to_frame(point);
        if self.op != Operation::None {
            renderer.draw_outline(self.rect);
        }
        self.dragging = false;
        self.op = Self::flip_past_opposite_edge(self.op, point, &self.rect);
        self.apply_geometry(point);

        if self.op != Operation::None {
            self.rect = self.rect.normalized();
            self.repaint(renderer);
            log::debug!("Release finished {:?} with selection {:?}", self.op, self.rect);
            self.op = Operation::None;
        }
    }

    /// Double-click: undo the click pair's effect by restoring the snapshot,
    /// then fire the commit notifier with the image-space selection.
    pub fn on_double_click(&mut self, renderer: &mut dyn OutlineRenderer) {
        self.rect = self.backup;
        self.op = Operation::None;
        self.dragging = false;
        self.repaint(renderer);
        log::debug!("Double click committed selection {:?}", self.rect);
        self.on_commit.emit(self.selection_image_space());
    }

    /// Repaint the base content plus, outside a drag, the selection outline.
    pub fn repaint(&self, renderer: &mut dyn OutlineRenderer) {
        renderer.clear();
        if !self.dragging {
            renderer.draw_outline(self.rect);
        }
    }
}

// ============================================================================
// Hit testing and geometry internals
// ============================================================================

impl RubberBand {
    fn mapping(&self) -> Mapping {
        Mapping::compute(self.image, self.container, self.mode)
    }

    /// Mapping against the cached frame. The scale is cheap to re-derive; the
    /// frame must stay the one the current gesture started under.
    fn current_mapping(&self) -> Mapping {
        Mapping {
            frame: self.frame,
            scale: Mapping::scale_factor(self.image, self.container, self.mode),
        }
    }

    /// Decide the operation for a pointer position.
    ///
    /// Corner zones are checked first (last match wins), then the edge bands
    /// between the inflated and deflated rectangle, then the body. A point on
    /// none of those starts a draw when pressed inside the image frame.
    fn classify(&self, point: Point) -> Operation {
        let outer = self.zones.outer_frame(&self.rect);
        let inner = self.zones.inner_frame(&self.rect);

        let mut op = Operation::None;
        if self
            .zones
            .corner_zone(Point::new(outer.left(), outer.top()))
            .contains_point(point)
        {
            op = Operation::TopLeft;
        }
        if self
            .zones
            .corner_zone(Point::new(inner.right(), outer.top()))
            .contains_point(point)
        {
            op = Operation::TopRight;
        }
        if self
            .zones
            .corner_zone(Point::new(inner.right(), inner.bottom()))
            .contains_point(point)
        {
            op = Operation::BottomRight;
        }
        if self
            .zones
            .corner_zone(Point::new(outer.left(), inner.bottom()))
            .contains_point(point)
        {
            op = Operation::BottomLeft;
        }

        if op == Operation::None && outer.contains_point(point) {
            if inner.contains_point(point) {
                op = Operation::Move;
            } else if point.y >= outer.top() && point.y <= inner.top() {
                op = Operation::Top;
            } else if point.y >= inner.bottom() && point.y <= outer.bottom() {
                op = Operation::Bottom;
            } else if point.x >= inner.right() && point.x <= outer.right() {
                op = Operation::Right;
            } else if point.x >= outer.left() && point.x <= inner.left() {
                op = Operation::Left;
            }
        }

        if op == Operation::None && self.frame.contains_point(point) && self.dragging {
            op = Operation::Draw;
        }

        log::trace!("Hit test at ({}, {}) -> {:?}", point.x, point.y, op);
        op
    }

    /// Flip a resize operation when the pointer crosses the opposite edge,
    /// so the drag continues instead of collapsing at zero size. Corners
    /// flip each axis independently.
    fn flip_past_opposite_edge(op: Operation, point: Point, rect: &Rect) -> Operation {
        match op {
            Operation::Left if point.x > rect.right() => Operation::Right,
            Operation::Right if point.x < rect.left() => Operation::Left,
            Operation::Top if point.y > rect.bottom() => Operation::Bottom,
            Operation::Bottom if point.y < rect.top() => Operation::Top,
            Operation::TopLeft => match (point.x > rect.right(), point.y > rect.bottom()) {
                (true, true) => Operation::BottomRight,
                (true, false) => Operation::TopRight,
                (false, true) => Operation::BottomLeft,
                (false, false) => Operation::TopLeft,
            },
            Operation::TopRight => match (point.x < rect.left(), point.y > rect.bottom()) {
                (true, true) => Operation::BottomLeft,
                (true, false) => Operation::TopLeft,
                (false, true) => Operation::BottomRight,
                (false, false) => Operation::TopRight,
            },
            Operation::BottomLeft => match (point.x > rect.right(), point.y < rect.top()) {
                (true, true) => Operation::TopRight,
                (true, false) => Operation::BottomRight,
                (false, true) => Operation::TopLeft,
                (false, false) => Operation::BottomLeft,
            },
            Operation::BottomRight => match (point.x < rect.left(), point.y < rect.top()) {
                (true, true) => Operation::TopLeft,
                (true, false) => Operation::BottomLeft,
                (false, true) => Operation::TopRight,
                (false, false) => Operation::BottomRight,
            },
            other => other,
        }
    }

    /// Clamp a pointer position onto the image frame border. Returns the
    /// adjusted point and whether the raw point was already inside. Derives
    /// the frame first if it was never computed.
    fn clamp_to_frame(&mut self, raw: Point) -> (Point, bool) {
        if self.frame.size().is_empty() {
            self.frame = self.mapping().frame;
        }
        let inside = self.frame.contains_point(raw);
        let point = if inside {
            raw
        } else {
            self.frame.clamp_point(raw)
        };
        (point, inside)
    }

    /// Adjust a proposed move delta by each side's overshoot so the moved
    /// rectangle stays inside the image frame.
    fn clamp_offset(&self, delta: Point) -> Point {
        let moved = self.rect.offset(delta.x, delta.y);
        let mut delta = delta;
        if !self.frame.contains_rect(&moved) {
            if moved.top() < self.frame.top() {
                delta.y += self.frame.top() - moved.top();
            }
            if moved.right() > self.frame.right() {
                delta.x += self.frame.right() - moved.right();
            }
            if moved.bottom() > self.frame.bottom() {
                delta.y += self.frame.bottom() - moved.bottom();
            }
            if moved.left() < self.frame.left() {
                delta.x += self.frame.left() - moved.left();
            }
        }
        delta
    }

    /// Apply the geometry update for the current operation with the (already
    /// clamped) pointer position as the varying coordinate.
    fn apply_geometry(&mut self, point: Point) {
        match self.op {
            Operation::Draw => {
                self.rect = Rect::from_corners(self.anchor, point);
            }
            Operation::Move => {
                let delta = Point::new(point.x - self.anchor.x, point.y - self.anchor.y);
                let delta = self.clamp_offset(delta);
                self.rect = self.rect.offset(delta.x, delta.y);
                self.anchor = point;
            }
            Operation::Left => {
                self.rect =
                    Rect::from_coords(point.x, self.rect.top(), self.rect.right(), self.rect.bottom());
            }
            Operation::Top => {
                self.rect =
                    Rect::from_coords(self.rect.left(), point.y, self.rect.right(), self.rect.bottom());
            }
            Operation::Right => {
                self.rect =
                    Rect::from_coords(self.rect.left(), self.rect.top(), point.x, self.rect.bottom());
            }
            Operation::Bottom => {
                self.rect =
                    Rect::from_coords(self.rect.left(), self.rect.top(), self.rect.right(), point.y);
            }
            Operation::TopLeft => {
                self.rect = Rect::from_coords(point.x, point.y, self.rect.right(), self.rect.bottom());
            }
            Operation::TopRight => {
                self.rect = Rect::from_coords(self.rect.left(), point.y, point.x, self.rect.bottom());
            }
            Operation::BottomRight => {
                self.rect = Rect::from_coords(self.rect.left(), self.rect.top(), point.x, point.y);
            }
            Operation::BottomLeft => {
                self.rect = Rect::from_coords(point.x, self.rect.top(), self.rect.right(), point.y);
            }
            Operation::None => {}
        }
    }

    /// Report the pointer position and selection in image space. An empty
    /// selection reads as the full image; the position then tracks the
    /// pointer while it stays on the displayed frame.
    fn emit_status(&self, point: Point, inside: bool) {
        if self.on_status.is_none() {
            return;
        }
        let mapping = self.current_mapping();
        let crop = mapping.to_image_rect(self.rect);
        let event = if crop.is_empty() {
            let full = Rect::new(0, 0, self.image.width, self.image.height);
            let position = if inside {
                mapping.to_image_point(point)
            } else {
                full.position()
            };
            StatusEvent {
                position,
                selection: full,
            }
        } else {
            StatusEvent {
                position: crop.position(),
                selection: crop,
            }
        };
        self.on_status.emit(event);
    }
}
