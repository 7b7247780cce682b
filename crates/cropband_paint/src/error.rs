//! Error types for the painter.

use thiserror::Error;

/// Errors from framebuffer construction and crop export.
#[derive(Error, Debug)]
pub enum PaintError {
    #[error("Buffer holds {actual} pixels but {width}x{height} needs {expected}")]
    BufferSizeMismatch {
        expected: usize,
        actual: usize,
        width: usize,
        height: usize,
    },

    #[error("Image operation failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PaintError>;
