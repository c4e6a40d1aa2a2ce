//! Resolved touch-up operations.
//!
//! Both CLI subcommands and `[jobs.*]` presets resolve into an
//! [`Operation`] with every default filled in and every path absolute or
//! cwd-relative. [`execute`] then performs it: load, transform, save.

mod run;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::image::{NormalizedRect, TouchupError};

pub use run::execute;

/// Input/output pair for operations that write exactly one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Allow `output` to be the same file as `input`.
    pub in_place: bool,
}

impl Target {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, in_place: bool) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            in_place,
        }
    }

    /// Refuse to clobber the input unless explicitly allowed.
    pub fn check(&self) -> Result<(), TouchupError> {
        if self.in_place {
            return Ok(());
        }
        ensure_distinct(&self.input, &self.output)
    }
}

/// Sprite slicing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceJob {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// File name prefix, e.g. `icon-` gives `icon-mac.png`.
    pub prefix: String,
    /// Expected icon names, left to right.
    pub names: Vec<String>,
    /// Where the whole sprite goes when the segment count doesn't match.
    pub fallback: PathBuf,
    /// Brightness cutoff to binarize with before slicing; `None` slices as-is.
    pub cutoff: Option<u8>,
}

impl SliceJob {
    /// Every icon must land in its own file, and none may replace the input.
    pub fn check(&self) -> Result<(), TouchupError> {
        let mut seen = HashSet::with_capacity(self.names.len());
        for name in &self.names {
            if !seen.insert(name.as_str()) {
                return Err(TouchupError::DuplicateIcon(name.clone()));
            }
            ensure_distinct(&self.input, &self.icon_path(name))?;
        }
        ensure_distinct(&self.input, &self.fallback)
    }

    pub fn icon_path(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{}{name}.png", self.prefix))
    }

    /// `<out_dir>/<input stem>-transparent.png`
    pub fn default_fallback(input: &Path, out_dir: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_else(|| "sprite".into());
        out_dir.join(format!("{stem}-transparent.png"))
    }

    /// Directory containing `input`, or `.` for a bare file name.
    pub fn default_out_dir(input: &Path) -> PathBuf {
        match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// A single fully-resolved touch-up.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Re-encode as optimized PNG.
    Convert(Target),
    /// Key out near-black pixels.
    Key { target: Target, threshold: u8 },
    /// Trim transparent borders.
    Trim(Target),
    /// Brightness threshold to white / transparent.
    Binarize { target: Target, cutoff: u8 },
    /// Crop by normalized coordinates.
    Crop { target: Target, rect: NormalizedRect },
    /// Slice a sprite into named icons.
    Slice(SliceJob),
}

impl Operation {
    /// Short name used as the log prefix.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Convert(_) => "convert",
            Self::Key { .. } => "key",
            Self::Trim(_) => "trim",
            Self::Binarize { .. } => "binarize",
            Self::Crop { .. } => "crop",
            Self::Slice(_) => "slice",
        }
    }
}

/// Error if `output` resolves to the same existing file as `input`.
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<(), TouchupError> {
    if is_same_file(input, output) {
        return Err(TouchupError::WouldOverwrite(output.to_path_buf()));
    }
    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        // `b` doesn't exist yet, so it can't be `a`
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_same_path_is_rejected() {
        let target = Target::new("logo.png", "logo.png", false);
        assert!(matches!(
            target.check(),
            Err(TouchupError::WouldOverwrite(_))
        ));
    }

    #[test]
    fn test_in_place_is_allowed_when_opted_in() {
        let target = Target::new("logo.png", "logo.png", true);
        assert!(target.check().is_ok());
    }

    #[test]
    fn test_aliased_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        let file = dir.path().join("logo.png");
        fs::write(&file, "x").unwrap();

        let alias = dir.path().join("a/../logo.png");
        assert!(ensure_distinct(&file, &alias).is_err());
    }

    #[test]
    fn test_new_output_is_distinct() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("logo.jpg");
        fs::write(&file, "x").unwrap();

        assert!(ensure_distinct(&file, &dir.path().join("logo.png")).is_ok());
    }

    #[test]
    fn test_slice_paths() {
        let input = Path::new("assets/device-icons-sprite.png");
        let out_dir = SliceJob::default_out_dir(input);
        assert_eq!(out_dir, PathBuf::from("assets"));
        assert_eq!(
            SliceJob::default_fallback(input, &out_dir),
            PathBuf::from("assets/device-icons-sprite-transparent.png")
        );
        assert_eq!(
            SliceJob::default_out_dir(Path::new("sprite.png")),
            PathBuf::from(".")
        );

        let job = SliceJob {
            input: input.to_path_buf(),
            out_dir,
            prefix: "icon-".into(),
            names: vec!["mac".into()],
            fallback: PathBuf::new(),
            cutoff: None,
        };
        assert_eq!(job.icon_path("mac"), PathBuf::from("assets/icon-mac.png"));
    }

    #[test]
    fn test_slice_rejects_repeated_name() {
        let job = SliceJob {
            input: PathBuf::from("sprite.png"),
            out_dir: PathBuf::from("icons"),
            prefix: "icon-".into(),
            names: ["mac", "ipad", "mac"].map(String::from).to_vec(),
            fallback: PathBuf::from("sprite-transparent.png"),
            cutoff: Some(50),
        };
        match job.check() {
            Err(TouchupError::DuplicateIcon(name)) => assert_eq!(name, "mac"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
