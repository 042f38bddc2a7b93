//! Homepage screenshot in a mobile layout.
//!
//! Captures the Xiaoyuzhou FM homepage as a phone-sized PNG, emulating an
//! iPhone: portrait viewport, 3x device scale factor, and a mobile Safari
//! user agent so the site serves its mobile layout. The capture is a bonus
//! artifact; callers are expected to log a failure and carry on rather than
//! abort the run.

use chrono::NaiveDate;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

/// The page being captured.
pub const HOMEPAGE_URL: &str = "https://www.xiaoyuzhoufm.com/";

/// iPhone 12 portrait viewport.
const MOBILE_VIEWPORT: (u32, u32) = (390, 844);

/// iPhone 12 device scale factor.
const MOBILE_SCALE_FACTOR: u32 = 3;

/// Mobile Safari user agent matching the emulated device.
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_4 like Mac OS X) \
AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.4 Mobile/15E148 Safari/604.1";

/// The homepage is heavy; give it a generous load deadline.
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// File name of the homepage capture for a given date.
pub fn homepage_file_name(date: NaiveDate) -> String {
    format!("homepage_{date}.png")
}

/// Capture the homepage as a mobile-layout PNG in `dir`.
///
/// Navigates a freshly launched, phone-shaped browser to the homepage,
/// waits `settle_delay` after navigation so late-loading cover art makes it
/// into the frame, and captures the visible viewport.
///
/// # Arguments
///
/// * `dir` - Output directory for the PNG
/// * `date` - The run date, used in the PNG file name
/// * `settle_delay` - Post-navigation delay before the capture
///
/// # Returns
///
/// The path of the written PNG.
///
/// # Errors
///
/// Returns an error if Chrome cannot be launched, the page does not load
/// within the deadline, or the capture cannot be written.
#[instrument(level = "info", skip_all, fields(url = HOMEPAGE_URL))]
pub async fn capture_homepage(
    dir: &Path,
    date: NaiveDate,
    settle_delay: Duration,
) -> Result<PathBuf, Box<dyn Error>> {
    let extra_args = vec![
        format!("--force-device-scale-factor={MOBILE_SCALE_FACTOR}"),
        format!("--user-agent={MOBILE_USER_AGENT}"),
    ];
    let browser = crate::browser::launch(Some(MOBILE_VIEWPORT), &extra_args)?;

    let tab = browser.new_tab()?;
    tab.set_user_agent(MOBILE_USER_AGENT, None, Some("iPhone"))?;
    tab.set_default_timeout(PAGE_LOAD_TIMEOUT);
    tab.navigate_to(HOMEPAGE_URL)?;
    tab.wait_until_navigated()?;

    // Covers and episode lists stream in after the load event.
    tokio::time::sleep(settle_delay).await;

    let png = tab.capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)?;

    let png_path = dir.join(homepage_file_name(date));
    std::fs::write(&png_path, &png)?;
    info!(path = %png_path.display(), bytes = png.len(), "Captured homepage");
    Ok(png_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homepage_file_name_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        assert_eq!(homepage_file_name(date), "homepage_2025-05-06.png");
    }
}
