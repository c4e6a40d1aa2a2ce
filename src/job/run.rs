//! Perform one resolved operation: load, transform, save.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;

use crate::image::{
    SliceOutcome, binarize, crop_normalized, crop_to_content, key_out_dark, load_rgba,
    process_sprite, reencode_png, save_png, slice_sprite,
};
use crate::job::{Operation, SliceJob, Target};
use crate::utils::plural::{plural_count, plural_s};
use crate::{debug, log, logger};

/// What an operation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Files written, in order.
    Wrote(Vec<PathBuf>),
    /// Nothing visible to keep; no file written.
    Empty,
    /// Segment count mismatch; the whole sprite was written to `path`.
    Fallback { found: usize, path: PathBuf },
}

/// Run `op` to completion.
///
/// Decode, encode and IO failures abort with an error. An empty image and
/// a segment mismatch are reported and returned as [`Outcome`]s.
pub fn execute(op: &Operation) -> Result<Outcome> {
    debug!(op.name(); "{:?}", op);
    match op {
        Operation::Convert(target) => convert(target),
        Operation::Key { target, threshold } => key(target, *threshold),
        Operation::Trim(target) => trim(target),
        Operation::Binarize { target, cutoff } => threshold(target, *cutoff),
        Operation::Crop { target, rect } => {
            let img = load_checked(target)?;
            log!("crop"; "original size: {}x{}", img.width(), img.height());
            let cropped = crop_normalized(&img, rect)?;
            write_one(&cropped, &target.output)?;
            logger::success(&format!(
                "Created {}: {}x{}",
                file_name(&target.output),
                cropped.width(),
                cropped.height()
            ));
            Ok(Outcome::Wrote(vec![target.output.clone()]))
        }
        Operation::Slice(job) => slice(job),
    }
}

fn convert(target: &Target) -> Result<Outcome> {
    target.check()?;
    let (width, height) = reencode_png(&target.input, &target.output)?;
    logger::success(&format!(
        "Converted {} to PNG: {width}x{height}",
        file_name(&target.input)
    ));
    Ok(Outcome::Wrote(vec![target.output.clone()]))
}

fn key(target: &Target, threshold: u8) -> Result<Outcome> {
    let mut img = load_checked(target)?;
    let keyed = key_out_dark(&mut img, threshold);
    debug!("key"; "{} pixel{} below {}", keyed, plural_s(keyed), threshold);

    write_one(&img, &target.output)?;
    logger::success(&format!(
        "Created transparent {}: {}x{}",
        file_name(&target.output),
        img.width(),
        img.height()
    ));
    Ok(Outcome::Wrote(vec![target.output.clone()]))
}

fn trim(target: &Target) -> Result<Outcome> {
    let img = load_checked(target)?;
    log!("trim"; "original size: {}x{}", img.width(), img.height());

    let Some(cropped) = crop_to_content(&img) else {
        log!("trim"; "image is empty, nothing written");
        return Ok(Outcome::Empty);
    };

    log!("trim"; "new size: {}x{}", cropped.width(), cropped.height());
    write_one(&cropped, &target.output)?;
    logger::success("Cropped transparency!");
    Ok(Outcome::Wrote(vec![target.output.clone()]))
}

fn threshold(target: &Target, cutoff: u8) -> Result<Outcome> {
    let img = load_checked(target)?;
    let out = binarize(&img, cutoff);
    write_one(&out, &target.output)?;
    logger::success(&format!(
        "Binarized {}: {}x{}",
        file_name(&target.output),
        out.width(),
        out.height()
    ));
    Ok(Outcome::Wrote(vec![target.output.clone()]))
}

fn slice(job: &SliceJob) -> Result<Outcome> {
    // Check every destination before writing any of them
    job.check()?;

    let img = load_rgba(&job.input)?;
    log!("slice"; "processing image: {}x{}", img.width(), img.height());

    let outcome = match job.cutoff {
        Some(cutoff) => process_sprite(&img, cutoff, &job.names),
        None => slice_sprite(img, &job.names),
    };

    match outcome {
        SliceOutcome::Icons(icons) => {
            log!("slice"; "found {}", plural_count(icons.len(), "segment"));
            let mut written = Vec::with_capacity(icons.len());
            for icon in icons {
                let path = job.icon_path(&icon.name);
                write_one(&icon.image, &path)?;
                log!("slice"; "saved {}", path.display());
                written.push(path);
            }
            Ok(Outcome::Wrote(written))
        }
        SliceOutcome::Fallback { found, sprite } => {
            log!("slice"; "found {}", plural_count(found, "segment"));
            logger::warning(&format!(
                "did not find exactly {}, saving whole sprite to {}",
                plural_count(job.names.len(), "segment"),
                job.fallback.display()
            ));
            write_one(&sprite, &job.fallback)?;
            Ok(Outcome::Fallback {
                found,
                path: job.fallback.clone(),
            })
        }
    }
}

/// Overwrite check, then decode.
fn load_checked(target: &Target) -> Result<RgbaImage> {
    target.check()?;
    Ok(load_rgba(&target.input)?)
}

fn write_one(img: &RgbaImage, path: &Path) -> Result<()> {
    save_png(img, path).with_context(|| format!("while saving {}", path.display()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
