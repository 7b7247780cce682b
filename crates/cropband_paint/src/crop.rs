//! Crop extraction from the source image.

use std::path::Path;

use cropband_core::Rect;
use image::RgbaImage;

use crate::error::Result;

/// Cut the selection out of the source image.
///
/// The selection is expected in image space. An empty selection reads as the
/// whole image; anything sticking out of the bounds is clamped. A selection
/// that misses the image entirely also falls back to the whole image.
pub fn crop_selection(image: &RgbaImage, selection: Rect) -> RgbaImage {
    let bounds = Rect::new(0, 0, image.width() as i32, image.height() as i32);
    let mut rect = selection.normalized();
    if rect.is_empty() {
        rect = bounds;
    } else {
        rect = bounds.intersect(&rect);
        if rect.is_empty() {
            rect = bounds;
        }
    }

    log::debug!("Cropping {:?} out of {:?}", rect, bounds);
    image::imageops::crop_imm(
        image,
        rect.x as u32,
        rect.y as u32,
        rect.width as u32,
        rect.height as u32,
    )
    .to_image()
}

/// Write a cropped image as a PNG file.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("Wrote crop to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn numbered(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([x as u8, y as u8, (x + y) as u8, 255])
        })
    }

    #[test]
    fn test_empty_selection_crops_full_image() {
        let img = numbered(10, 8);
        let crop = crop_selection(&img, Rect::ZERO);
        assert_eq!(crop.dimensions(), (10, 8));
        assert_eq!(crop, img);
    }

    #[test]
    fn test_crop_extracts_region() {
        let img = numbered(10, 8);
        let crop = crop_selection(&img, Rect::new(2, 1, 3, 4));
        assert_eq!(crop.dimensions(), (3, 4));
        assert_eq!(crop.get_pixel(0, 0), img.get_pixel(2, 1));
        assert_eq!(crop.get_pixel(2, 3), img.get_pixel(4, 4));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = numbered(10, 8);
        let crop = crop_selection(&img, Rect::new(6, 5, 10, 10));
        assert_eq!(crop.dimensions(), (4, 3));
        assert_eq!(crop.get_pixel(0, 0), img.get_pixel(6, 5));
    }

    #[test]
    fn test_selection_missing_the_image_crops_everything() {
        let img = numbered(10, 8);
        let crop = crop_selection(&img, Rect::new(20, 20, 5, 5));
        assert_eq!(crop.dimensions(), (10, 8));
    }

    #[test]
    fn test_negative_selection_is_normalized() {
        let img = numbered(10, 8);
        let crop = crop_selection(&img, Rect::new(5, 5, -3, -4));
        assert_eq!(crop.dimensions(), (3, 4));
        assert_eq!(crop.get_pixel(0, 0), img.get_pixel(2, 1));
    }
}
