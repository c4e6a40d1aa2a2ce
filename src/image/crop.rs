//! Rectangular crop with coordinates given as fractions of the image size.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use serde::Deserialize;

use crate::image::bbox::{BoundingBox, crop_box};
use crate::image::error::TouchupError;

/// Crop window in `[0, 1]` fractions of width and height.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "[f64; 4]")]
pub struct NormalizedRect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl NormalizedRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, TouchupError> {
        for (name, v) in [("left", left), ("top", top), ("right", right), ("bottom", bottom)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(TouchupError::InvalidRect(format!(
                    "{name} = {v} is outside [0, 1]"
                )));
            }
        }
        if left >= right || top >= bottom {
            return Err(TouchupError::InvalidRect(format!(
                "{left},{top},{right},{bottom} has no area"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Scale to pixel coordinates, truncating toward zero.
    pub fn to_pixels(&self, width: u32, height: u32) -> Result<BoundingBox, TouchupError> {
        let (w, h) = (f64::from(width), f64::from(height));
        let b = BoundingBox {
            left: (w * self.left) as u32,
            top: (h * self.top) as u32,
            right: (w * self.right) as u32,
            bottom: (h * self.bottom) as u32,
        };
        if b.left >= b.right || b.top >= b.bottom {
            return Err(TouchupError::InvalidRect(format!(
                "{self} is empty on a {width}x{height} image"
            )));
        }
        Ok(b)
    }
}

impl fmt::Display for NormalizedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

impl TryFrom<[f64; 4]> for NormalizedRect {
    type Error = TouchupError;

    fn try_from([l, t, r, b]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(l, t, r, b)
    }
}

/// Parse `left,top,right,bottom`.
impl FromStr for NormalizedRect {
    type Err = TouchupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TouchupError::InvalidRect(format!("`{s}`: {e}")))?;
        let [l, t, r, b]: [f64; 4] = parts.try_into().map_err(|_| {
            TouchupError::InvalidRect(format!("`{s}`: expected left,top,right,bottom"))
        })?;
        Self::new(l, t, r, b)
    }
}

/// Crop `img` to `rect` scaled against its own dimensions.
pub fn crop_normalized(img: &RgbaImage, rect: &NormalizedRect) -> Result<RgbaImage, TouchupError> {
    let b = rect.to_pixels(img.width(), img.height())?;
    Ok(crop_box(img, b))
}
