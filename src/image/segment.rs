//! Sprite slicing by transparent column gaps.
//!
//! A sprite is a strip of icons laid out side by side. Columns that hold at
//! least one visible pixel form runs; each run is one icon.

use image::{RgbaImage, imageops};

use crate::image::bbox::crop_to_content;
use crate::image::binarize::binarize;

/// Half-open column range `[start, end)` containing visible content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
}

impl Segment {
    #[inline]
    pub const fn width(&self) -> u32 {
        self.end - self.start
    }
}

/// One sliced icon and the name it will be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub name: String,
    pub image: RgbaImage,
}

/// Result of slicing a sprite.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceOutcome {
    /// Segment count matched the expected names; one icon per name, in order.
    Icons(Vec<Icon>),
    /// Segment count mismatch; the whole sprite should be saved instead.
    Fallback { found: usize, sprite: RgbaImage },
}

/// Scan columns left to right and collect runs of non-transparent columns.
pub fn find_segments(img: &RgbaImage) -> Vec<Segment> {
    let (width, height) = img.dimensions();
    let mut segments = Vec::new();
    let mut open: Option<u32> = None;

    for x in 0..width {
        let has_content = (0..height).any(|y| img.get_pixel(x, y)[3] > 0);
        match (has_content, open) {
            (true, None) => open = Some(x),
            (false, Some(start)) => {
                segments.push(Segment { start, end: x });
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        segments.push(Segment { start, end: width });
    }

    segments
}

/// Cut a full-height column range out of the sprite, then trim it to its
/// own bounding box.
pub fn extract_segment(img: &RgbaImage, segment: Segment) -> RgbaImage {
    let column =
        imageops::crop_imm(img, segment.start, 0, segment.width(), img.height()).to_image();
    crop_to_content(&column).unwrap_or(column)
}

/// Slice `sprite` into one icon per entry of `names`.
///
/// Falls back to the untouched sprite when the number of segments found
/// differs from `names.len()`.
pub fn slice_sprite<S: AsRef<str>>(sprite: RgbaImage, names: &[S]) -> SliceOutcome {
    let segments = find_segments(&sprite);
    if segments.len() != names.len() {
        return SliceOutcome::Fallback {
            found: segments.len(),
            sprite,
        };
    }

    let icons = segments
        .into_iter()
        .zip(names)
        .map(|(segment, name)| Icon {
            name: name.as_ref().to_string(),
            image: extract_segment(&sprite, segment),
        })
        .collect();
    SliceOutcome::Icons(icons)
}

/// Binarize a dark-background sprite into white-on-transparent, then slice it.
pub fn process_sprite<S: AsRef<str>>(sprite: &RgbaImage, cutoff: u8, names: &[S]) -> SliceOutcome {
    slice_sprite(binarize(sprite, cutoff), names)
}
