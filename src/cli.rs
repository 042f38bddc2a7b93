//! Command-line interface definitions for Xiaoyuzhou Daily.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the Xiaoyuzhou Daily application.
///
/// This struct defines all configuration options that can be passed to the
/// application at runtime. Options include the output directory, an optional
/// fetch configuration file, and the transport used for feed requests.
///
/// # Examples
///
/// ```sh
/// # Basic usage: everything lands in the current directory
/// xiaoyuzhou_daily
///
/// # Collect artifacts somewhere else
/// xiaoyuzhou_daily -o ./artifacts
///
/// # Override mirrors or categories from a YAML file
/// xiaoyuzhou_daily -c fetch.yaml
///
/// # Fetch feeds through a headless browser instead of plain HTTP
/// xiaoyuzhou_daily --via-browser
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the CSV ledger and the screenshots
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Optional path to a fetch configuration YAML file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Fetch ranking feeds by navigating a headless browser instead of
    /// issuing direct HTTP requests (for mirrors that gate plain clients)
    #[arg(long)]
    pub via_browser: bool,
}
