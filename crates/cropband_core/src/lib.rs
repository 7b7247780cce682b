//! cropband_core - interaction logic for a rubber-band crop selection
//!
//! This crate holds the pure, windowing-free heart of the cropper: integer
//! rectangle algebra, the view/image coordinate mapper, configurable hit
//! zones, and the [`RubberBand`] state machine that turns pointer events into
//! a consistent selection rectangle. Painting is abstracted behind the
//! [`OutlineRenderer`] trait; hosts plug in their own surface.

mod callback;
mod event;
mod geometry;
mod mapper;
mod render;
mod selection;
mod zones;

pub use callback::Notifier;
pub use event::{CursorHint, PointerButton, StatusEvent};
pub use geometry::{Point, Rect, Size};
pub use mapper::{DisplayMode, Mapping};
pub use render::{NullRenderer, OutlineRenderer};
pub use selection::{Operation, RubberBand};
pub use zones::HitZones;
