//! Browser-driven transport for ranking feeds.
//!
//! Some RSSHub mirrors sit behind bot checks that reject plain HTTP clients
//! but pass a real browser. This transport navigates a shared headless
//! Chrome tab to each feed URL and reads the rendered body text, which for a
//! JSON route is the JSON document itself.
//!
//! Navigations through one visible session are paced: a short delay is
//! inserted between categories so the session does not look like a scraper
//! hammering the mirror.

use super::FeedTransport;
use headless_chrome::{Browser, Tab};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Gap between category navigations within the shared browser session.
const FEED_PACING_DELAY: Duration = Duration::from_secs(2);

/// Feed transport that reads feeds through a headless Chrome tab.
///
/// The browser and a single tab are launched once and reused for every
/// mirror attempt of every category.
pub struct BrowserTransport {
    // The browser must stay alive for the tab to remain usable.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserTransport {
    /// Launch a headless browser and open the tab used for all fetches.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Deadline applied to each navigation and element wait
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome cannot be launched or the tab cannot be
    /// opened.
    pub fn launch(timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let browser = crate::browser::launch(None, &[])?;
        let tab = browser.new_tab()?;
        tab.set_default_timeout(timeout);
        info!("Browser transport ready");
        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl FeedTransport for BrowserTransport {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
        self.tab.navigate_to(url)?;
        self.tab.wait_until_navigated()?;
        let body = self.tab.wait_for_element("body")?;
        let text = body.get_inner_text()?;
        debug!(bytes = text.len(), "Page body extracted");
        Ok(text)
    }

    fn pacing_delay(&self) -> Duration {
        FEED_PACING_DELAY
    }
}
