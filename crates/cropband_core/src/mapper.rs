//! View-space to image-space mapping.
//!
//! The displayed image either fills its container proportionally (fit mode)
//! or shows at native size, clipped when the container is smaller. A
//! [`Mapping`] captures the resulting scale factor and displayed-image
//! rectangle for one container/image pairing; the transforms on it are pure
//! and side-effect free.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// How the image is fitted into its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Scale the image to fit the container, preserving aspect ratio.
    #[default]
    Fit,
    /// Show the image at native size, clipped when larger than the container.
    Native,
}

impl DisplayMode {
    /// The other mode. Handy for a toggle binding.
    pub fn toggled(&self) -> DisplayMode {
        match self {
            DisplayMode::Fit => DisplayMode::Native,
            DisplayMode::Native => DisplayMode::Fit,
        }
    }
}

/// Scale factor and displayed-image rectangle for one container/image pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping {
    /// View-space rectangle covered by the displayed image.
    pub frame: Rect,
    /// View pixels per image pixel.
    pub scale: f64,
}

impl Mapping {
    /// The degenerate mapping used before an image is assigned. Transforms
    /// through it are the identity.
    pub fn empty() -> Self {
        Self {
            frame: Rect::ZERO,
            scale: 0.0,
        }
    }

    /// View pixels per image pixel for the given pairing.
    ///
    /// Native mode always maps 1:1. Fit mode uses the smaller of the two
    /// axis ratios so the whole image stays visible. A zero-extent image
    /// yields `0.0`, which downstream transforms treat as identity.
    pub fn scale_factor(image: Size, container: Size, mode: DisplayMode) -> f64 {
        if mode == DisplayMode::Native {
            return 1.0;
        }
        if image.is_empty() {
            return 0.0;
        }
        let rx = container.width as f64 / image.width as f64;
        let ry = container.height as f64 / image.height as f64;
        rx.min(ry)
    }

    /// Compute the mapping for an image displayed inside a container.
    ///
    /// The frame size is the image size under the scale factor (truncated to
    /// whole pixels). On each axis the frame is centered when smaller than
    /// the container and pinned to zero when it is not, matching a
    /// scrollable/clipped native-size display.
    pub fn compute(image: Size, container: Size, mode: DisplayMode) -> Self {
        if image.is_empty() {
            return Self::empty();
        }

        let scale = Self::scale_factor(image, container, mode);
        let width = (image.width as f64 * scale) as i32;
        let height = (image.height as f64 * scale) as i32;

        let x = if mode == DisplayMode::Native || width > container.width {
            0
        } else {
            (container.width - width) / 2
        };
        let y = if mode == DisplayMode::Native || height > container.height {
            0
        } else {
            (container.height - height) / 2
        };

        Self {
            frame: Rect::new(x, y, width, height),
            scale,
        }
    }

    /// Map a view-space rectangle into image space.
    ///
    /// Subtracts the frame origin and divides by the scale factor, rounding
    /// each coordinate and dimension to the nearest pixel. Identity when the
    /// scale factor is zero.
    pub fn to_image_rect(&self, rect: Rect) -> Rect {
        if self.scale == 0.0 {
            return rect;
        }
        let r = rect.offset(-self.frame.x, -self.frame.y);
        Rect::new(
            round_div(r.x, self.scale),
            round_div(r.y, self.scale),
            round_div(r.width, self.scale),
            round_div(r.height, self.scale),
        )
    }

    /// Map a view-space point into image space. Same transform as
    /// [`Mapping::to_image_rect`] applied to a single point.
    pub fn to_image_point(&self, point: Point) -> Point {
        if self.scale == 0.0 {
            return point;
        }
        let p = point.offset(-self.frame.x, -self.frame.y);
        Point::new(round_div(p.x, self.scale), round_div(p.y, self.scale))
    }

    /// Map an image-space rectangle back into view space. Inverse of
    /// [`Mapping::to_image_rect`] up to rounding.
    pub fn to_view_rect(&self, rect: Rect) -> Rect {
        if self.scale == 0.0 {
            return rect;
        }
        Rect::new(
            round_mul(rect.x, self.scale) + self.frame.x,
            round_mul(rect.y, self.scale) + self.frame.y,
            round_mul(rect.width, self.scale),
            round_mul(rect.height, self.scale),
        )
    }
}

fn round_div(value: i32, scale: f64) -> i32 {
    (value as f64 / scale).round() as i32
}

fn round_mul(value: i32, scale: f64) -> i32 {
    (value as f64 * scale).round() as i32
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_scale_factor_native_is_one() {
        let s = Mapping::scale_factor(Size::new(3000, 2000), Size::new(800, 600), DisplayMode::Native);
        assert!(approx_eq(s, 1.0));
    }

    #[test]
    fn test_scale_factor_fit_uses_limiting_axis() {
        // Width ratio 0.5, height ratio 0.75: width limits
        let s = Mapping::scale_factor(Size::new(1600, 800), Size::new(800, 600), DisplayMode::Fit);
        assert!(approx_eq(s, 0.5));

        // Height limits here
        let s = Mapping::scale_factor(Size::new(800, 1200), Size::new(800, 600), DisplayMode::Fit);
        assert!(approx_eq(s, 0.5));
    }

    #[test]
    fn test_scale_factor_zero_image() {
        let s = Mapping::scale_factor(Size::new(0, 0), Size::new(800, 600), DisplayMode::Fit);
        assert!(approx_eq(s, 0.0));
    }

    #[test]
    fn test_compute_centers_limited_axis() {
        // Height limits the scale to 1.5; the 600px-wide result centers
        // horizontally while the flush axis pins to zero
        let m = Mapping::compute(Size::new(400, 400), Size::new(800, 600), DisplayMode::Fit);
        assert_eq!(m.frame, Rect::new(100, 0, 600, 600));
        assert!(approx_eq(m.scale, 1.5));
    }

    #[test]
    fn test_compute_native_origin_is_zero() {
        let m = Mapping::compute(Size::new(400, 300), Size::new(800, 600), DisplayMode::Native);
        assert_eq!(m.frame, Rect::new(0, 0, 400, 300));
        assert!(approx_eq(m.scale, 1.0));
    }

    #[test]
    fn test_compute_oversized_native_pins_to_zero() {
        // Image larger than the container is clipped, not centered
        let m = Mapping::compute(Size::new(3000, 200), Size::new(800, 600), DisplayMode::Native);
        assert_eq!(m.frame.x, 0);
        assert_eq!(m.frame.width, 3000);
        // Native pins both axes, even the one that would fit
        assert_eq!(m.frame.y, 0);
    }

    #[test]
    fn test_compute_empty_image() {
        let m = Mapping::compute(Size::new(0, 0), Size::new(800, 600), DisplayMode::Fit);
        assert_eq!(m.frame, Rect::ZERO);
        assert!(approx_eq(m.scale, 0.0));
    }

    #[test]
    fn test_to_image_rect_subtracts_frame_and_scales() {
        let m = Mapping::compute(Size::new(400, 400), Size::new(800, 600), DisplayMode::Fit);
        // Frame is {100, 0, 600, 600} at scale 1.5
        let r = m.to_image_rect(Rect::new(130, 30, 150, 75));
        assert_eq!(r, Rect::new(20, 20, 100, 50));
    }

    #[test]
    fn test_to_image_point() {
        let m = Mapping::compute(Size::new(400, 400), Size::new(800, 600), DisplayMode::Fit);
        assert_eq!(m.to_image_point(Point::new(100, 0)), Point::new(0, 0));
        assert_eq!(m.to_image_point(Point::new(700, 600)), Point::new(400, 400));
    }

    #[test]
    fn test_identity_at_zero_scale() {
        let m = Mapping::empty();
        let r = Rect::new(5, 6, 7, 8);
        assert_eq!(m.to_image_rect(r), r);
        assert_eq!(m.to_view_rect(r), r);
        assert_eq!(m.to_image_point(Point::new(3, 4)), Point::new(3, 4));
    }

    #[test]
    fn test_round_trip_exact_scale() {
        // Scale 2 divides all coordinates exactly
        let m = Mapping::compute(Size::new(400, 300), Size::new(800, 600), DisplayMode::Fit);
        assert!(approx_eq(m.scale, 2.0));
        for &r in &[
            Rect::new(10, 10, 100, 50),
            Rect::new(0, 0, 400, 300),
            Rect::new(33, 57, 201, 9),
        ] {
            assert_eq!(m.to_image_rect(m.to_view_rect(r)), r);
        }
    }

    #[test]
    fn test_round_trip_inexact_scale_within_one_pixel() {
        // Scale 0.6 does not divide most coordinates evenly
        let m = Mapping::compute(Size::new(1250, 1000), Size::new(800, 600), DisplayMode::Fit);
        assert!(m.scale > 0.5 && m.scale < 1.0);
        for x in (0..1200).step_by(97) {
            let r = Rect::new(x, x / 2, 300, 200);
            let back = m.to_image_rect(m.to_view_rect(r));
            assert!((back.x - r.x).abs() <= 1, "x drifted: {back:?} vs {r:?}");
            assert!((back.y - r.y).abs() <= 1, "y drifted: {back:?} vs {r:?}");
            assert!((back.width - r.width).abs() <= 1);
            assert!((back.height - r.height).abs() <= 1);
        }
    }

    #[test]
    fn test_display_mode_toggle() {
        assert_eq!(DisplayMode::Fit.toggled(), DisplayMode::Native);
        assert_eq!(DisplayMode::Native.toggled(), DisplayMode::Fit);
    }
}
