//! Brightness threshold to opaque white / fully transparent.

use image::{Rgba, RgbaImage};

/// Mean channel brightness a pixel must exceed to be kept.
pub const DEFAULT_BRIGHTNESS_CUTOFF: u8 = 50;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Map each pixel to opaque white when `(r + g + b) / 3 > cutoff`, and to
/// fully transparent otherwise. Alpha of the input is ignored.
pub fn binarize(img: &RgbaImage, cutoff: u8) -> RgbaImage {
    // Compare sums to avoid truncating the mean.
    let limit = u16::from(cutoff) * 3;
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, _] = img.get_pixel(x, y).0;
        if u16::from(r) + u16::from(g) + u16::from(b) > limit {
            WHITE
        } else {
            TRANSPARENT
        }
    })
}
