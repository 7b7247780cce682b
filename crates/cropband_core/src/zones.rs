//! Hit-zone tuning for selection hit-testing.
//!
//! These margins decide how forgiving the edge and corner grips feel. The
//! defaults were tuned against stock desktop cursors and are kept as plain
//! configuration; in particular the corner bias compensates for diagonal
//! resize cursors whose hotspot sits off-center.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Margins and biases used to classify a pointer against the selection
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitZones {
    /// Half-width of the band around the rectangle outline that counts as an
    /// edge grip. Also the side length of the corner anchor squares.
    #[serde(default = "default_edge_margin")]
    pub edge_margin: i32,

    /// Amount each corner anchor square is inflated in every direction.
    #[serde(default = "default_corner_reach")]
    pub corner_reach: i32,

    /// Shift applied to every corner zone after inflation.
    #[serde(default = "default_corner_bias")]
    pub corner_bias: Point,
}

fn default_edge_margin() -> i32 {
    2
}

fn default_corner_reach() -> i32 {
    8
}

fn default_corner_bias() -> Point {
    Point::new(-8, -8)
}

impl Default for HitZones {
    fn default() -> Self {
        Self {
            edge_margin: default_edge_margin(),
            corner_reach: default_corner_reach(),
            corner_bias: default_corner_bias(),
        }
    }
}

impl HitZones {
    /// The rectangle grown by the edge margin. Points between this and the
    /// inner frame sit on an edge grip.
    pub fn outer_frame(&self, rect: &Rect) -> Rect {
        rect.inflate(self.edge_margin, self.edge_margin)
    }

    /// The rectangle shrunk by the edge margin. Points inside it are on the
    /// selection body rather than a grip.
    pub fn inner_frame(&self, rect: &Rect) -> Rect {
        rect.inflate(-self.edge_margin, -self.edge_margin)
    }

    /// The grip zone for a corner whose anchor is the given point.
    ///
    /// An anchor square of `edge_margin` pixels is inflated by the corner
    /// reach and then shifted by the corner bias.
    pub fn corner_zone(&self, anchor: Point) -> Rect {
        Rect::new(anchor.x, anchor.y, self.edge_margin, self.edge_margin)
            .inflate(self.corner_reach, self.corner_reach)
            .offset(self.corner_bias.x, self.corner_bias.y)
    }
}
