//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CONFIG_FILE, ConfigError, TouchupConfig};
use crate::image::NormalizedRect;
use crate::job::{Operation, SliceJob, Target};

/// Touch up static image assets: convert, key, trim, binarize, crop, slice
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file name, searched upward from the current directory
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = CONFIG_FILE,
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Re-encode an image (e.g. JPEG) as optimized PNG
    #[command(visible_alias = "c")]
    Convert {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,
        /// Allow OUTPUT to be the same file as INPUT
        #[arg(long)]
        in_place: bool,
    },

    /// Make near-black pixels fully transparent
    #[command(visible_alias = "k")]
    Key {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,
        /// Pixels with red, green and blue all below this become transparent
        #[arg(short, long)]
        threshold: Option<u8>,
        /// Allow OUTPUT to be the same file as INPUT
        #[arg(long)]
        in_place: bool,
    },

    /// Crop transparent borders down to the visible content
    #[command(visible_alias = "t")]
    Trim {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
        /// Defaults to INPUT (requires --in-place)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Allow OUTPUT to be the same file as INPUT
        #[arg(long)]
        in_place: bool,
    },

    /// Turn bright pixels opaque white and the rest transparent
    #[command(visible_alias = "b")]
    Binarize {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,
        /// Mean brightness a pixel must exceed to stay visible
        #[arg(long)]
        cutoff: Option<u8>,
        /// Allow OUTPUT to be the same file as INPUT
        #[arg(long)]
        in_place: bool,
    },

    /// Crop to a rectangle given as fractions of the image size
    Crop {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
        #[arg(value_hint = clap::ValueHint::FilePath)]
        output: PathBuf,
        /// left,top,right,bottom in [0, 1], e.g. 0.25,0.25,0.75,0.8
        #[arg(short, long)]
        rect: NormalizedRect,
        /// Allow OUTPUT to be the same file as INPUT
        #[arg(long)]
        in_place: bool,
    },

    /// Slice a sprite into one PNG per icon
    #[command(visible_alias = "s")]
    Slice {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
        /// Expected icon names, left to right (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        names: Option<Vec<String>>,
        /// Output directory (default: directory of INPUT)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        out_dir: Option<PathBuf>,
        /// Icon file name prefix
        #[arg(short, long)]
        prefix: Option<String>,
        /// Where to save the whole sprite if the icon count doesn't match
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        fallback: Option<PathBuf>,
        /// Brightness cutoff used to binarize before slicing
        #[arg(long, conflicts_with = "no_binarize")]
        cutoff: Option<u8>,
        /// Slice the sprite as-is, keyed by its own alpha
        #[arg(long)]
        no_binarize: bool,
    },

    /// Run a named job from the config file
    #[command(visible_alias = "r")]
    Run {
        /// Job name, as in `[jobs.<name>]`
        job: String,
    },
}

impl Commands {
    /// Resolve into an [`Operation`], filling gaps from the config defaults.
    ///
    /// Paths given on the command line are used as-is (relative to cwd).
    pub fn resolve(&self, config: &TouchupConfig) -> Result<Operation, ConfigError> {
        let defaults = &config.defaults;
        let op = match self {
            Self::Convert {
                input,
                output,
                in_place,
            } => Operation::Convert(Target::new(input, output, *in_place)),
            Self::Key {
                input,
                output,
                threshold,
                in_place,
            } => Operation::Key {
                target: Target::new(input, output, *in_place),
                threshold: threshold.unwrap_or(defaults.dark_threshold),
            },
            Self::Trim {
                input,
                output,
                in_place,
            } => Operation::Trim(Target::new(
                input,
                output.as_ref().unwrap_or(input),
                *in_place,
            )),
            Self::Binarize {
                input,
                output,
                cutoff,
                in_place,
            } => Operation::Binarize {
                target: Target::new(input, output, *in_place),
                cutoff: cutoff.unwrap_or(defaults.brightness_cutoff),
            },
            Self::Crop {
                input,
                output,
                rect,
                in_place,
            } => Operation::Crop {
                target: Target::new(input, output, *in_place),
                rect: *rect,
            },
            Self::Slice {
                input,
                names,
                out_dir,
                prefix,
                fallback,
                cutoff,
                no_binarize,
            } => {
                let out_dir = out_dir
                    .clone()
                    .unwrap_or_else(|| SliceJob::default_out_dir(input));
                let fallback = fallback
                    .clone()
                    .unwrap_or_else(|| SliceJob::default_fallback(input, &out_dir));
                Operation::Slice(SliceJob {
                    input: input.clone(),
                    out_dir,
                    prefix: prefix.clone().unwrap_or_else(|| defaults.icon_prefix.clone()),
                    names: names.clone().unwrap_or_else(|| defaults.icon_names.clone()),
                    fallback,
                    cutoff: (!no_binarize).then(|| cutoff.unwrap_or(defaults.brightness_cutoff)),
                })
            }
            Self::Run { job } => return config.job(job),
        };
        Ok(op)
    }
}
