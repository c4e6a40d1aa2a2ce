//! Image touch-up transforms.
//!
//! # Modules
//!
//! - [`io`]: decode/encode boundary (JPEG, PNG)
//! - [`key`]: key out near-black backgrounds
//! - [`bbox`]: bounding box of visible pixels, trim to content
//! - [`binarize`]: brightness threshold to white / transparent
//! - [`crop`]: crop by normalized coordinates
//! - [`segment`]: column segmentation and sprite slicing
//!
//! Transforms never touch the filesystem; only [`io`] does.

pub mod bbox;
pub mod binarize;
pub mod crop;
mod error;
pub mod io;
pub mod key;
pub mod segment;

pub use bbox::crop_to_content;
pub use binarize::{DEFAULT_BRIGHTNESS_CUTOFF, binarize};
pub use crop::{NormalizedRect, crop_normalized};
pub use error::TouchupError;
pub use io::{load_rgba, reencode_png, save_png};
pub use key::{DEFAULT_DARK_THRESHOLD, key_out_dark};
pub use segment::{SliceOutcome, process_sprite, slice_sprite};
