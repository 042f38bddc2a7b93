//! # Xiaoyuzhou Daily
//!
//! A daily snapshot pipeline for the Xiaoyuzhou FM podcast charts. Each run
//! fetches the current rankings through public RSSHub mirrors, appends them
//! to a cumulative CSV ledger, renders a shareable chart image, and captures
//! a mobile screenshot of the Xiaoyuzhou homepage.
//!
//! ## Features
//!
//! - Fetches four charts (编辑推荐, 热门榜, 锋芒榜, 新星榜) with ordered
//!   mirror fallback across public RSSHub instances
//! - Appends up to ten entries per chart to `xiaoyuzhou_data.csv`, a
//!   BOM-marked CSV that spreadsheets open cleanly
//! - Renders the day's rankings as a card-style PNG via headless Chrome
//! - Captures the homepage in an emulated iPhone layout as a bonus artifact
//! - Optional browser-driven fetching for mirrors that gate plain HTTP
//!
//! ## Usage
//!
//! ```sh
//! xiaoyuzhou_daily -o ./artifacts
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Retrieve each chart from the first mirror that answers
//! 2. **Recording**: Append the entries to the CSV ledger
//! 3. **Rendering**: Build the chart HTML and rasterize it to PNG
//! 4. **Homepage**: Capture the mobile homepage (failure never aborts the run)
//!
//! A run where every chart fails on every mirror exits with an error so a
//! scheduler can flag the day as missed. Any single chart or the homepage
//! failing is logged and tolerated.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod browser;
mod cli;
mod config;
mod fetch;
mod models;
mod outputs;
mod utils;

use cli::Cli;
use config::FetchConfig;
use fetch::browser::BrowserTransport;
use fetch::http::HttpTransport;
use fetch::RankingFetcher;
use models::RankingEntry;
use outputs::{chart, homepage, ledger};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("xiaoyuzhou_daily starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, via_browser = args.via_browser, "Parsed CLI arguments");

    let config = match args.config.as_deref() {
        Some(path) => FetchConfig::load(path)?,
        None => FetchConfig::default(),
    };
    info!(
        mirrors = config.mirrors.len(),
        categories = config.categories.len(),
        per_category_limit = config.per_category_limit,
        "Configuration ready"
    );

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }
    let output_dir = Path::new(&args.output_dir);

    let today = Local::now().date_naive();

    // ---- Fetch rankings ----
    let fetched = if args.via_browser {
        info!("Fetching feeds through headless browser");
        let transport = BrowserTransport::launch(config.request_timeout())?;
        RankingFetcher::new(config.clone(), transport)
            .fetch_all(today)
            .await
    } else {
        let transport = HttpTransport::new(config.request_timeout())?;
        RankingFetcher::new(config.clone(), transport)
            .fetch_all(today)
            .await
    };

    let entries = require_entries(fetched)?;
    info!(count = entries.len(), date = %today, "Collected ranking entries");

    // ---- CSV ledger ----
    let ledger_path = ledger::append_entries(output_dir, &entries)?;
    info!(path = %ledger_path.display(), "Ledger stage complete");

    // ---- Daily chart ----
    let chart_path = chart::generate_chart(output_dir, today, &config, &entries)?;
    info!(path = %chart_path.display(), "Chart stage complete");

    // ---- Homepage screenshot (best effort) ----
    if let Err(e) = homepage::capture_homepage(output_dir, today, config.page_settle_delay()).await
    {
        error!(error = %e, "Homepage capture failed; keeping the rest of the run");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Gate the pipeline on having anything to record.
///
/// A partially failed day is worth keeping; a fully empty one is not: when
/// every category failed on every mirror, the run exits with an error so a
/// scheduler can flag the day as missed.
///
/// # Errors
///
/// Returns an error when `entries` is empty.
fn require_entries(entries: Vec<RankingEntry>) -> Result<Vec<RankingEntry>, Box<dyn Error>> {
    if entries.is_empty() {
        error!("Every category failed on every mirror; nothing to record");
        return Err("no ranking data could be fetched from any mirror".into());
    }
    Ok(entries)
}
