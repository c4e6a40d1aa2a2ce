//! Bounding box of visible content and trimming to it.

use image::{RgbaImage, imageops};

/// Minimal rectangle enclosing every pixel with non-zero alpha.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    #[inline]
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Compute the bounding box of non-transparent pixels.
///
/// Returns `None` for a fully transparent (or zero-sized) image.
pub fn bounding_box(img: &RgbaImage) -> Option<BoundingBox> {
    let mut found: Option<BoundingBox> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        match found.as_mut() {
            Some(b) => {
                b.left = b.left.min(x);
                b.top = b.top.min(y);
                b.right = b.right.max(x + 1);
                b.bottom = b.bottom.max(y + 1);
            }
            None => {
                found = Some(BoundingBox {
                    left: x,
                    top: y,
                    right: x + 1,
                    bottom: y + 1,
                });
            }
        }
    }

    found
}

/// Copy out the given rectangle.
pub fn crop_box(img: &RgbaImage, b: BoundingBox) -> RgbaImage {
    imageops::crop_imm(img, b.left, b.top, b.width(), b.height()).to_image()
}

/// Trim transparent borders. `None` means the image is empty.
pub fn crop_to_content(img: &RgbaImage) -> Option<RgbaImage> {
    bounding_box(img).map(|b| crop_box(img, b))
}
