//! `[jobs.<name>]` presets.
//!
//! Each preset names one operation and its parameters. Relative paths
//! resolve against `[defaults] assets`; omitted parameters fall back to
//! `[defaults]`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::config::TouchupConfig;
use crate::image::NormalizedRect;
use crate::job::{Operation, SliceJob, Target};

/// A job preset as written in `touchup.toml`.
///
/// Fields are strict: a misspelled parameter is a parse error rather than
/// a silently applied default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case", deny_unknown_fields)]
pub enum JobSpec {
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[serde(default)]
        in_place: bool,
    },
    Key {
        input: PathBuf,
        output: PathBuf,
        threshold: Option<u8>,
        #[serde(default)]
        in_place: bool,
    },
    Trim {
        input: PathBuf,
        /// Omitted means write back to `input` (requires `in_place`).
        output: Option<PathBuf>,
        #[serde(default)]
        in_place: bool,
    },
    Binarize {
        input: PathBuf,
        output: PathBuf,
        cutoff: Option<u8>,
        #[serde(default)]
        in_place: bool,
    },
    Crop {
        input: PathBuf,
        output: PathBuf,
        /// `[left, top, right, bottom]` fractions
        rect: NormalizedRect,
        #[serde(default)]
        in_place: bool,
    },
    Slice {
        input: PathBuf,
        names: Option<Vec<String>>,
        out_dir: Option<PathBuf>,
        prefix: Option<String>,
        fallback: Option<PathBuf>,
        cutoff: Option<u8>,
        #[serde(default = "default_true")]
        binarize: bool,
    },
}

fn default_true() -> bool {
    true
}

impl JobSpec {
    /// Fill in defaults and resolve paths against the assets directory.
    pub fn resolve(&self, config: &TouchupConfig) -> Operation {
        let defaults = &config.defaults;
        let target = |input: &PathBuf, output: &PathBuf, in_place: bool| {
            Target::new(
                config.asset_path(input),
                config.asset_path(output),
                in_place,
            )
        };

        match self {
            Self::Convert {
                input,
                output,
                in_place,
            } => Operation::Convert(target(input, output, *in_place)),
            Self::Key {
                input,
                output,
                threshold,
                in_place,
            } => Operation::Key {
                target: target(input, output, *in_place),
                threshold: threshold.unwrap_or(defaults.dark_threshold),
            },
            Self::Trim {
                input,
                output,
                in_place,
            } => Operation::Trim(target(input, output.as_ref().unwrap_or(input), *in_place)),
            Self::Binarize {
                input,
                output,
                cutoff,
                in_place,
            } => Operation::Binarize {
                target: target(input, output, *in_place),
                cutoff: cutoff.unwrap_or(defaults.brightness_cutoff),
            },
            Self::Crop {
                input,
                output,
                rect,
                in_place,
            } => Operation::Crop {
                target: target(input, output, *in_place),
                rect: *rect,
            },
            Self::Slice {
                input,
                names,
                out_dir,
                prefix,
                fallback,
                cutoff,
                binarize,
            } => {
                let input = config.asset_path(input);
                let out_dir = out_dir
                    .as_ref()
                    .map(|d| config.asset_path(d))
                    .unwrap_or_else(|| config.assets_dir());
                let fallback = fallback
                    .as_ref()
                    .map(|f| config.asset_path(f))
                    .unwrap_or_else(|| SliceJob::default_fallback(&input, &out_dir));

                Operation::Slice(SliceJob {
                    input,
                    out_dir,
                    prefix: prefix.clone().unwrap_or_else(|| defaults.icon_prefix.clone()),
                    names: names.clone().unwrap_or_else(|| defaults.icon_names.clone()),
                    fallback,
                    cutoff: binarize.then(|| cutoff.unwrap_or(defaults.brightness_cutoff)),
                })
            }
        }
    }
}
