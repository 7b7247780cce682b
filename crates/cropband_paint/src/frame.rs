//! CPU framebuffer with an invertible selection outline.
//!
//! [`Frame`] keeps two copies of its pixels: `base`, the composed image
//! without any overlay, and `pixels`, the presented buffer. The selection
//! outline is XOR-ed into `pixels`, which makes drawing its own inverse and
//! satisfies the erase-by-redraw contract of
//! [`cropband_core::OutlineRenderer`].

use cropband_core::{OutlineRenderer, Rect};
use image::RgbaImage;

use crate::error::{PaintError, Result};

/// XOR mask flipping the RGB channels of a packed `0x00RRGGBB` pixel.
pub const OUTLINE_MASK: u32 = 0x00FF_FFFF;

/// Fill for the area a blit leaves uncovered.
const BACKGROUND: u32 = 0x0020_2020;

fn pack(px: &[u8; 4]) -> u32 {
    ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32
}

/// Fixed-size packed-u32 framebuffer.
#[derive(Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    /// Composed content without the outline.
    base: Vec<u32>,
    /// Presented content, base plus at most one inked outline.
    pixels: Vec<u32>,
}

impl Frame {
    /// Wrap an existing packed buffer as the base content.
    pub fn new(width: usize, height: usize, base: Vec<u32>) -> Result<Self> {
        let expected = width * height;
        if base.len() != expected {
            return Err(PaintError::BufferSizeMismatch {
                expected,
                actual: base.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: base.clone(),
            base,
        })
    }

    /// A background-filled frame, ready for [`Frame::blit`].
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            base: vec![BACKGROUND; width * height],
            pixels: vec![BACKGROUND; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The presented buffer, one packed pixel per cell, row major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Compose the image into the base content at `dest`, scaling when the
    /// sizes differ, and drop any inked outline. Pixels outside `dest` fall
    /// back to the background fill.
    pub fn blit(&mut self, image: &RgbaImage, dest: Rect) {
        let dest = dest.normalized();
        self.base.fill(BACKGROUND);

        if !dest.is_empty() {
            let scaled;
            let source = if image.width() == dest.width as u32
                && image.height() == dest.height as u32
            {
                image
            } else {
                scaled = image::imageops::resize(
                    image,
                    dest.width as u32,
                    dest.height as u32,
                    image::imageops::FilterType::Triangle,
                );
                &scaled
            };
            let packed: Vec<u32> = bytemuck::cast_slice::<u8, [u8; 4]>(source.as_raw())
                .iter()
                .map(pack)
                .collect();

            for row in 0..dest.height {
                let y = dest.y + row;
                if y < 0 || y as usize >= self.height {
                    continue;
                }
                for col in 0..dest.width {
                    let x = dest.x + col;
                    if x < 0 || x as usize >= self.width {
                        continue;
                    }
                    self.base[y as usize * self.width + x as usize] =
                        packed[(row * dest.width + col) as usize];
                }
            }
            log::debug!(
                "Blitted {}x{} image into {:?}",
                image.width(),
                image.height(),
                dest
            );
        }

        self.pixels.copy_from_slice(&self.base);
    }

    /// XOR one pixel, ignoring positions off the buffer. Clipped outlines
    /// stay self-inverting because every visible pixel is still touched
    /// exactly once per draw.
    fn toggle(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] ^= OUTLINE_MASK;
    }
}

impl From<&RgbaImage> for Frame {
    fn from(image: &RgbaImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let base: Vec<u32> = bytemuck::cast_slice::<u8, [u8; 4]>(image.as_raw())
            .iter()
            .map(pack)
            .collect();
        Self {
            width,
            height,
            pixels: base.clone(),
            base,
        }
    }
}

impl OutlineRenderer for Frame {
    /// XOR the 1 px border of `rect` into the presented buffer. Rows and
    /// columns are walked so that corner pixels are hit once; a second call
    /// with the same rectangle restores the previous content exactly.
    fn draw_outline(&mut self, rect: Rect) {
        let rect = rect.normalized();
        if rect.is_empty() {
            return;
        }
        let (x0, y0) = (rect.left(), rect.top());
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);

        for x in x0..=x1 {
            self.toggle(x, y0);
            if y1 != y0 {
                self.toggle(x, y1);
            }
        }
        for y in (y0 + 1)..y1 {
            self.toggle(x0, y);
            if x1 != x0 {
                self.toggle(x1, y);
            }
        }
    }

    fn clear(&mut self) {
        self.pixels.copy_from_slice(&self.base);
    }
}

#[cfg(test)]
mod tests {
    use cropband_core::{Point, PointerButton, RubberBand, Size};
    use image::Rgba;

    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 3) as u8, (y * 5) as u8, (x + y) as u8, 255])
        })
    }

    #[test]
    fn test_new_rejects_wrong_buffer_size() {
        let err = Frame::new(4, 4, vec![0; 15]).unwrap_err();
        match err {
            PaintError::BufferSizeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_image_packs_rgb_channels() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 128, 64, 255]));
        let frame = Frame::from(&img);
        assert_eq!(frame.pixels(), &[0x00FF_8040]);
    }

    #[test]
    fn test_outline_is_self_inverting() {
        let img = gradient(32, 24);
        let rects = [
            Rect::new(3, 4, 10, 6),
            Rect::new(0, 0, 32, 24),
            Rect::new(5, 5, 1, 1),
            Rect::new(2, 2, 1, 9),
            Rect::new(-5, -5, 20, 20),
            Rect::new(28, 20, 30, 30),
            Rect::new(100, 100, 5, 5),
        ];
        for rect in rects {
            let mut frame = Frame::from(&img);
            let before = frame.pixels().to_vec();
            frame.draw_outline(rect);
            frame.draw_outline(rect);
            assert_eq!(frame.pixels(), &before[..], "rect {rect:?}");
        }
    }

    #[test]
    fn test_outline_touches_perimeter_once() {
        let mut frame = Frame::blank(8, 8);
        frame.draw_outline(Rect::new(0, 0, 4, 4));
        let changed: Vec<usize> = frame
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, px)| **px != BACKGROUND)
            .map(|(i, _)| i)
            .collect();
        // A 4x4 outline covers 12 pixels, each toggled exactly once.
        assert_eq!(changed.len(), 12);
        for i in changed {
            assert_eq!(frame.pixels()[i], BACKGROUND ^ OUTLINE_MASK);
        }
    }

    #[test]
    fn test_clear_restores_base_content() {
        let img = gradient(16, 16);
        let mut frame = Frame::from(&img);
        let base = frame.pixels().to_vec();
        frame.draw_outline(Rect::new(2, 2, 10, 10));
        assert_ne!(frame.pixels(), &base[..]);
        frame.clear();
        assert_eq!(frame.pixels(), &base[..]);
    }

    #[test]
    fn test_blit_fills_outside_with_background() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let mut frame = Frame::blank(8, 4);
        frame.blit(&img, Rect::new(2, 1, 2, 2));
        assert_eq!(frame.pixels()[0], BACKGROUND);
        assert_eq!(frame.pixels()[8 + 2], 0x00FF_0000);
        assert_eq!(frame.pixels()[2 * 8 + 3], 0x00FF_0000);
    }

    #[test]
    fn test_blit_scales_to_destination() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 255]));
        let mut frame = Frame::blank(4, 2);
        frame.blit(&img, Rect::new(0, 0, 4, 2));
        assert!(frame.pixels().iter().all(|px| *px == 0x0000_FF00));
    }

    #[test]
    fn test_blit_clips_offscreen_destination() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        let mut frame = Frame::blank(4, 4);
        frame.blit(&img, Rect::new(-2, -1, 4, 4));
        assert_eq!(frame.pixels()[0], 0x0000_00FF);
        assert_eq!(frame.pixels()[3 * 4 + 3], BACKGROUND);
    }

    #[test]
    fn test_gesture_leaves_exactly_one_outline() {
        let img = gradient(80, 60);
        let mut live = Frame::from(&img);

        let mut rb = RubberBand::new();
        rb.set_image(Size::new(80, 60));
        rb.set_container_size(Size::new(80, 60));
        rb.on_press(Point::new(10, 10), PointerButton::Left, &mut live);
        rb.on_move(Point::new(30, 20), &mut live);
        rb.on_move(Point::new(50, 40), &mut live);
        rb.on_release(Point::new(50, 40), &mut live);

        // Every intermediate geometry was erased by its redraw; only the
        // final outline may remain inked.
        let mut reference = Frame::from(&img);
        reference.draw_outline(Rect::new(10, 10, 40, 30));
        assert_eq!(live.pixels(), reference.pixels());

        live.clear();
        assert_eq!(live.pixels(), Frame::from(&img).pixels());
    }
}
