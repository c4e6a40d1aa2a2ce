//! Load/save boundary for raster assets.
//!
//! Everything past this module works on in-memory [`RgbaImage`]s; JPEG and
//! PNG only exist here.

use std::fs;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::image::error::TouchupError;

/// Decode an image file and convert it to 8-bit RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, TouchupError> {
    load_dynamic(path).map(DynamicImage::into_rgba8)
}

/// Decode an image file, keeping its native color type.
pub fn load_dynamic(path: &Path) -> Result<DynamicImage, TouchupError> {
    image::open(path).map_err(|source| TouchupError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an RGBA image as an optimized PNG, creating parent directories.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), TouchupError> {
    let (width, height) = img.dimensions();
    write_png(path, img.as_raw(), width, height, ExtendedColorType::Rgba8)
}

/// Re-encode any decodable image as an optimized PNG.
///
/// Pixel data is untouched: an RGB JPEG becomes an RGB PNG.
/// Returns the image dimensions.
pub fn reencode_png(input: &Path, output: &Path) -> Result<(u32, u32), TouchupError> {
    let img = load_dynamic(input)?;
    let (width, height) = (img.width(), img.height());
    write_png(output, img.as_bytes(), width, height, img.color().into())?;
    Ok((width, height))
}

fn write_png(
    path: &Path,
    bytes: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
) -> Result<(), TouchupError> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive)
        .write_image(bytes, width, height, color)
        .map_err(|source| TouchupError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| TouchupError::Io(parent.to_path_buf(), err))?;
    }

    fs::write(path, buf).map_err(|err| TouchupError::Io(path.to_path_buf(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let err = load_rgba(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, TouchupError::Decode { .. }));
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.png");
        fs::write(&path, "fake png").unwrap();

        let err = load_rgba(&path).unwrap_err();
        assert!(matches!(err, TouchupError::Decode { .. }));
    }

    #[test]
    fn test_save_png_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.png");
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));

        save_png(&img, &path).unwrap();

        let back = load_rgba(&path).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_reencode_jpeg_keeps_dimensions() {
        let dir = TempDir::new().unwrap();
        let jpeg = dir.path().join("photo.jpg");
        let png = dir.path().join("photo.png");

        RgbImage::from_pixel(37, 21, Rgb([200, 100, 50]))
            .save(&jpeg)
            .unwrap();

        let dims = reencode_png(&jpeg, &png).unwrap();
        assert_eq!(dims, (37, 21));

        let decoded = load_dynamic(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (37, 21));
        assert_eq!(
            image::ImageFormat::from_path(&png).unwrap(),
            image::ImageFormat::Png
        );
    }

    #[test]
    fn test_reencode_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = reencode_png(&dir.path().join("a.jpg"), &dir.path().join("a.png")).unwrap_err();
        assert!(matches!(err, TouchupError::Decode { .. }));
        assert!(!dir.path().join("a.png").exists());
    }
}
