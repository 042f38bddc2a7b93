//! Output generation modules for the CSV ledger and the screenshots.
//!
//! This module contains submodules responsible for persisting fetched
//! rankings and rendering the shareable images:
//!
//! # Submodules
//!
//! - [`ledger`]: Appends entries to the cumulative CSV ledger
//! - [`chart`]: Builds the daily chart HTML and rasterizes it to PNG
//! - [`homepage`]: Captures a mobile-layout screenshot of the Xiaoyuzhou homepage
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── xiaoyuzhou_data.csv          # Cumulative ledger, one row per entry per day
//! ├── temp_chart.html              # Intermediate chart document (kept for inspection)
//! ├── daily_chart_2025-05-06.png   # Rendered chart for the run date
//! └── homepage_2025-05-06.png      # Homepage screenshot for the run date
//! ```

pub mod chart;
pub mod homepage;
pub mod ledger;
