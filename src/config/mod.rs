//! Configuration for `touchup.toml`.
//!
//! The file is optional. It is looked up from the current directory
//! upward; its parent directory becomes the project root.
//!
//! # Sections
//!
//! | Section          | Purpose                                          |
//! |------------------|--------------------------------------------------|
//! | `[defaults]`     | Assets dir, thresholds, sprite icon names        |
//! | `[jobs.<name>]`  | Named one-shot presets, run with `touchup run`   |
//!
//! ```toml
//! [defaults]
//! assets = "src/assets"
//!
//! [jobs.crop-logo]
//! op = "trim"
//! input = "logo.png"
//! in_place = true
//! ```

mod error;
mod job;
mod util;

pub use error::ConfigError;
pub use job::JobSpec;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::image::{DEFAULT_BRIGHTNESS_CUTOFF, DEFAULT_DARK_THRESHOLD};
use crate::job::Operation;
use crate::{debug, log};
use util::find_config_file;

/// Default config file name.
pub const CONFIG_FILE: &str = "touchup.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing touchup.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TouchupConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// File name that was searched for, e.g. from `-C` (internal use only)
    #[serde(skip)]
    pub config_name: PathBuf,

    /// Project root directory - parent of config file, or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Parameter defaults
    #[serde(default)]
    pub defaults: Defaults,

    /// Named job presets
    #[serde(default)]
    pub jobs: BTreeMap<String, JobSpec>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Directory job paths are relative to (relative to the project root)
    pub assets: PathBuf,
    /// Channel threshold for `key`
    pub dark_threshold: u8,
    /// Brightness cutoff for `binarize` and `slice`
    pub brightness_cutoff: u8,
    /// Expected sprite icons, left to right
    pub icon_names: Vec<String>,
    /// File name prefix for sliced icons
    pub icon_prefix: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("."),
            dark_threshold: DEFAULT_DARK_THRESHOLD,
            brightness_cutoff: DEFAULT_BRIGHTNESS_CUTOFF,
            icon_names: ["mac", "ipad", "iphone", "vision", "watch"]
                .map(String::from)
                .to_vec(),
            icon_prefix: "icon-".to_string(),
        }
    }
}

impl TouchupConfig {
    /// Locate and load `config_name`, falling back to built-in defaults
    /// rooted at the current directory when no file exists.
    pub fn load(config_name: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(&cwd, config_name)
    }

    /// Like [`TouchupConfig::load`], searching upward from `start`.
    pub fn load_from(start: &Path, config_name: &Path) -> Result<Self> {
        let Some(path) = find_config_file(start, config_name) else {
            debug!("config"; "no {} found, using defaults", config_name.display());
            return Ok(Self {
                root: start.to_path_buf(),
                config_name: config_name.to_path_buf(),
                ..Self::default()
            });
        };

        let mut config = Self::from_path(&path)?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| start.to_path_buf());
        debug!("config"; "loaded {}", path.display());
        config.config_path = Some(path);
        config.config_name = config_name.to_path_buf();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("in {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Absolute assets directory.
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(&self.defaults.assets)
    }

    /// Resolve a job path against the assets directory.
    pub fn asset_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.assets_dir().join(path)
        }
    }

    /// Resolve the named job preset.
    pub fn job(&self, name: &str) -> Result<Operation, ConfigError> {
        match self.jobs.get(name) {
            Some(spec) => Ok(spec.resolve(self)),
            None if self.config_path.is_none() => {
                let name = if self.config_name.as_os_str().is_empty() {
                    PathBuf::from(CONFIG_FILE)
                } else {
                    self.config_name.clone()
                };
                Err(ConfigError::NoConfig(name))
            }
            None => {
                let available = if self.jobs.is_empty() {
                    "none".to_string()
                } else {
                    self.jobs.keys().cloned().collect::<Vec<_>>().join(", ")
                };
                Err(ConfigError::UnknownJob {
                    name: name.to_string(),
                    available,
                })
            }
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::NormalizedRect;
    use crate::job::{SliceJob, Target};
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[defaults]
assets = "src/assets"
dark_threshold = 20

[jobs.convert-logo]
op = "convert"
input = "revivr-logo-hires.jpg"
output = "revivr-logo-hires.png"

[jobs.make-transparent]
op = "key"
input = "revivr-vision-logo-gen-v11.png"
output = "revivr-vision-logo-clean-v11.png"

[jobs.crop-logo]
op = "trim"
input = "revivr-vision-logo-clean-v11.png"
in_place = true

[jobs.visionmark]
op = "crop"
input = "/tmp/upload.png"
output = "visionmark-thumbnail.png"
rect = [0.25, 0.25, 0.75, 0.80]

[jobs.icons]
op = "slice"
input = "device-icons-sprite.png"
fallback = "device-icons-transparent.png"
"#;

    fn sample(root: &Path) -> TouchupConfig {
        let mut config = TouchupConfig::from_str(SAMPLE).unwrap();
        config.root = root.to_path_buf();
        config.config_path = Some(root.join(CONFIG_FILE));
        config
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = TouchupConfig::from_str("").unwrap();
        assert_eq!(config.defaults, Defaults::default());
        assert_eq!(config.defaults.dark_threshold, 15);
        assert_eq!(config.defaults.brightness_cutoff, 50);
        assert_eq!(config.defaults.icon_names.len(), 5);
        assert!(config.jobs.is_empty());
    }

    #[test]
    fn test_partial_defaults_keep_builtins() {
        let config = TouchupConfig::from_str(SAMPLE).unwrap();
        assert_eq!(config.defaults.dark_threshold, 20);
        assert_eq!(config.defaults.brightness_cutoff, 50);
        assert_eq!(config.defaults.icon_prefix, "icon-");
    }

    #[test]
    fn test_resolve_key_job_uses_defaults() {
        let root = Path::new("/site");
        let op = sample(root).job("make-transparent").unwrap();
        assert_eq!(
            op,
            Operation::Key {
                target: Target::new(
                    "/site/src/assets/revivr-vision-logo-gen-v11.png",
                    "/site/src/assets/revivr-vision-logo-clean-v11.png",
                    false,
                ),
                threshold: 20,
            }
        );
    }

    #[test]
    fn test_resolve_trim_without_output_is_in_place() {
        let op = sample(Path::new("/site")).job("crop-logo").unwrap();
        let path = "/site/src/assets/revivr-vision-logo-clean-v11.png";
        assert_eq!(op, Operation::Trim(Target::new(path, path, true)));
    }

    #[test]
    fn test_resolve_crop_keeps_absolute_input() {
        let op = sample(Path::new("/site")).job("visionmark").unwrap();
        assert_eq!(
            op,
            Operation::Crop {
                target: Target::new(
                    "/tmp/upload.png",
                    "/site/src/assets/visionmark-thumbnail.png",
                    false
                ),
                rect: NormalizedRect::new(0.25, 0.25, 0.75, 0.80).unwrap(),
            }
        );
    }

    #[test]
    fn test_resolve_slice() {
        let op = sample(Path::new("/site")).job("icons").unwrap();
        let Operation::Slice(job) = op else {
            panic!("expected slice");
        };
        assert_eq!(
            job,
            SliceJob {
                input: PathBuf::from("/site/src/assets/device-icons-sprite.png"),
                out_dir: PathBuf::from("/site/src/assets"),
                prefix: "icon-".into(),
                names: Defaults::default().icon_names,
                fallback: PathBuf::from("/site/src/assets/device-icons-transparent.png"),
                cutoff: Some(50),
            }
        );
    }

    #[test]
    fn test_slice_without_binarize() {
        let config = TouchupConfig::from_str(
            r#"
[jobs.raw]
op = "slice"
input = "sprite.png"
names = ["a", "b"]
binarize = false
"#,
        )
        .unwrap();
        let Operation::Slice(job) = config.job("raw").unwrap() else {
            panic!("expected slice");
        };
        assert_eq!(job.cutoff, None);
        assert_eq!(job.names, vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_rect_is_parse_error() {
        let err = TouchupConfig::from_str(
            r#"
[jobs.bad]
op = "crop"
input = "a.png"
output = "b.png"
rect = [0.5, 0.0, 0.25, 1.0]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_unknown_op_is_parse_error() {
        let err = TouchupConfig::from_str(
            r#"
[jobs.bad]
op = "resize"
input = "a.png"
"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_misspelled_job_field_is_parse_error() {
        let err = TouchupConfig::parse_with_ignored(
            r#"
[jobs.k]
op = "key"
input = "a.png"
output = "b.png"
threshhold = 40
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        if let ConfigError::Toml(inner) = err {
            assert!(inner.to_string().contains("threshhold"));
        }
    }

    #[test]
    fn test_unknown_job() {
        let err = sample(Path::new("/site")).job("nope").unwrap_err();
        match err {
            ConfigError::UnknownJob { name, available } => {
                assert_eq!(name, "nope");
                assert!(available.contains("crop-logo"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_job_without_config_file() {
        let config = TouchupConfig::default();
        assert!(matches!(
            config.job("crop-logo"),
            Err(ConfigError::NoConfig(_))
        ));
    }

    #[test]
    fn test_parse_with_ignored_collects_unknown_fields() {
        let (config, ignored) = TouchupConfig::parse_with_ignored(
            r#"
[defaults]
dark_threshold = 10
colour = "red"

[extra]
x = 1
"#,
        )
        .unwrap();
        assert_eq!(config.defaults.dark_threshold, 10);
        assert!(ignored.contains(&"defaults.colour".to_string()));
        assert!(ignored.contains(&"extra".to_string()));
    }

    #[test]
    fn test_load_from_sets_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src/assets");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), SAMPLE).unwrap();

        let config = TouchupConfig::load_from(&nested, Path::new(CONFIG_FILE)).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.assets_dir(), dir.path().join("src/assets"));
        assert_eq!(config.jobs.len(), 5);
    }

    #[test]
    fn test_load_from_without_file() {
        let dir = TempDir::new().unwrap();
        let config =
            TouchupConfig::load_from(dir.path(), Path::new("missing-touchup.toml")).unwrap();
        assert_eq!(config.root, dir.path());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_missing_config_reports_requested_name() {
        let dir = TempDir::new().unwrap();
        let config = TouchupConfig::load_from(dir.path(), Path::new("site.toml")).unwrap();
        match config.job("crop-logo") {
            Err(ConfigError::NoConfig(name)) => assert_eq!(name, Path::new("site.toml")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
