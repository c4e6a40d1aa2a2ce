//! Key out near-black backgrounds.

use image::{Rgba, RgbaImage};

/// Channel threshold below which a pixel counts as background.
pub const DEFAULT_DARK_THRESHOLD: u8 = 15;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Make every pixel whose red, green and blue are all below `threshold`
/// fully transparent. Other pixels are left untouched.
///
/// Returns the number of keyed pixels.
pub fn key_out_dark(img: &mut RgbaImage, threshold: u8) -> usize {
    let mut keyed = 0;
    for pixel in img.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r < threshold && g < threshold && b < threshold {
            *pixel = TRANSPARENT;
            keyed += 1;
        }
    }
    keyed
}
