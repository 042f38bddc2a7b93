//! Headless Chrome launch helper shared by the fetcher and the renderers.
//!
//! All three browser consumers (the browser feed transport, the chart
//! renderer, and the homepage capturer) go through [`launch`] so they agree
//! on the flags needed to run inside containers and CI runners.

use headless_chrome::{Browser, LaunchOptions};
use std::error::Error;
use std::ffi::OsStr;

/// Launch a headless Chrome instance.
///
/// # Arguments
///
/// * `window_size` - Optional `(width, height)` of the browser window; pass
///   `None` for Chrome's default
/// * `extra_args` - Additional command line flags, appended after the
///   stability flags (e.g. a device scale factor or user agent override)
///
/// # Errors
///
/// Returns an error if no Chrome binary can be found or the process fails
/// to start.
pub fn launch(
    window_size: Option<(u32, u32)>,
    extra_args: &[String],
) -> Result<Browser, Box<dyn Error>> {
    // Chrome refuses to start as root without these in containers and CI.
    let mut args: Vec<&OsStr> = vec![
        OsStr::new("--no-sandbox"),
        OsStr::new("--disable-dev-shm-usage"),
    ];
    args.extend(extra_args.iter().map(|arg| OsStr::new(arg.as_str())));

    let browser = Browser::new(LaunchOptions {
        headless: true,
        window_size,
        args,
        ..Default::default()
    })?;
    Ok(browser)
}
