//! Touchup - one-shot touch-ups for static site image assets.

mod cli;
mod config;
mod image;
mod job;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::TouchupConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = TouchupConfig::load(&cli.config)?;
    let op = cli.command.resolve(&config)?;

    // Empty images and sprite mismatches are reported inside and still exit 0
    job::execute(&op)?;
    Ok(())
}
