//! Command-line argument definitions for the Graintfa CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, export scale,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Graintfa texture renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene document (JSON)
    #[arg(
        help = "Path to the input file",
        required_unless_present = "list_elements"
    )]
    pub input: Option<String>,

    /// Path to the output PNG file
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Integer upscale factor; overrides the configured export scale
    #[arg(short, long)]
    pub scale: Option<u32>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the registered elements and exit
    #[arg(long)]
    pub list_elements: bool,
}
