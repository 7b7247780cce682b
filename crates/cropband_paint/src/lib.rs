//! cropband_paint - CPU rasterizer for the crop selection overlay
//!
//! [`Frame`] owns a packed-u32 framebuffer and implements the invertible
//! outline contract from `cropband_core` by XOR-ing the selection border
//! into the presented pixels. The [`crop`] module extracts the committed
//! selection from the source image.

mod error;
mod frame;

pub mod crop;

pub use error::{PaintError, Result};
pub use frame::{Frame, OUTLINE_MASK};
