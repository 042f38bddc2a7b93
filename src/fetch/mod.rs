//! Ranking feed retrieval with ordered mirror fallback.
//!
//! RSSHub's public mirrors are individually unreliable, so every category is
//! requested from each configured mirror in order until one returns a payload
//! that parses as a feed. The first usable response wins and the remaining
//! mirrors are skipped for that category.
//!
//! # Fetched Charts
//!
//! | Chart | Route | Notes |
//! |-------|-------|-------|
//! | 编辑推荐 | `/xiaoyuzhou/editor_choice.json` | Editor picks |
//! | 热门榜 | `/xiaoyuzhou/ranking/hot.json` | Overall popularity |
//! | 锋芒榜 | `/xiaoyuzhou/ranking/sharp.json` | Trending upstarts |
//! | 新星榜 | `/xiaoyuzhou/ranking/new.json` | New shows |
//!
//! The set is configuration, not code; see [`crate::config::FetchConfig`].
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`FeedTransport`]: Core trait that turns a feed URL into a response body
//! - [`http::HttpTransport`]: Direct HTTP requests (the default)
//! - [`browser::BrowserTransport`]: Navigates a headless browser instead,
//!   for mirrors that gate plain HTTP clients
//!
//! A category where every mirror fails is logged and skipped, never fatal on
//! its own. Whether an entirely empty run aborts is the caller's decision.

use crate::config::{CategoryRoute, FetchConfig};
use crate::models::{entries_from_payload, FeedPayload, RankingEntry};
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub mod browser;
pub mod http;

/// How much of an unusable mirror response body makes it into the log.
const BODY_PREVIEW_BYTES: usize = 200;

/// Trait for retrieving the raw text of a feed URL.
///
/// Implementors decide how a URL is turned into a body: a plain HTTP client,
/// a full browser, or a scripted stub in tests. The fetcher treats every
/// implementation identically.
pub trait FeedTransport {
    /// Fetch the response body of `url` as text.
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute feed URL to fetch
    ///
    /// # Returns
    ///
    /// The response body, or an error if the mirror could not be reached or
    /// answered with a non-success status.
    async fn fetch_text(&self, url: &str) -> Result<String, Box<dyn Error>>;

    /// Delay inserted between categories.
    ///
    /// Transports that hold a visible session (the browser) pace their
    /// navigations; plain HTTP needs no gap.
    fn pacing_delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// Fetches all configured ranking categories through a [`FeedTransport`].
pub struct RankingFetcher<T> {
    config: FetchConfig,
    transport: T,
}

impl<T> RankingFetcher<T>
where
    T: FeedTransport,
{
    /// Create a fetcher for the given configuration and transport.
    pub fn new(config: FetchConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Fetch every configured category in order and flatten the results.
    ///
    /// Categories are fetched strictly in configuration order, which is what
    /// fixes the row order of the CSV ledger and the card order of the chart.
    /// Failed categories contribute nothing; the run carries on.
    ///
    /// # Arguments
    ///
    /// * `date` - The local date stamped on every produced entry
    ///
    /// # Returns
    ///
    /// All fetched entries, grouped by category in configuration order.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch_all(&self, date: NaiveDate) -> Vec<RankingEntry> {
        let mut entries = Vec::new();
        for (idx, category) in self.config.categories.iter().enumerate() {
            if idx > 0 && !self.transport.pacing_delay().is_zero() {
                tokio::time::sleep(self.transport.pacing_delay()).await;
            }
            let mut batch = self.fetch_category(date, category).await;
            entries.append(&mut batch);
        }
        info!(
            total = entries.len(),
            categories = self.config.categories.len(),
            "Fetch stage complete"
        );
        entries
    }

    /// Fetch one category, trying each mirror in order until one succeeds.
    ///
    /// A mirror attempt counts as failed if the transport errors or if the
    /// body does not parse as a feed document (`{"items": [...]}`), which
    /// covers mirror error pages and rate-limit notices. The first usable
    /// payload short-circuits the remaining mirrors.
    ///
    /// # Returns
    ///
    /// The category's entries capped at the configured limit, or an empty
    /// vector if every mirror failed.
    #[instrument(level = "info", skip_all, fields(category = %category.label))]
    pub async fn fetch_category(
        &self,
        date: NaiveDate,
        category: &CategoryRoute,
    ) -> Vec<RankingEntry> {
        for mirror in &self.config.mirrors {
            let url = feed_url(mirror, &category.route);
            debug!(%url, "Trying mirror");

            let body = match self.transport.fetch_text(&url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(%url, error = %e, "Mirror fetch failed; trying next");
                    continue;
                }
            };

            match serde_json::from_str::<FeedPayload>(&body) {
                Ok(payload) => {
                    let entries = entries_from_payload(
                        date,
                        &category.label,
                        payload,
                        self.config.per_category_limit,
                    );
                    info!(%url, count = entries.len(), "Fetched ranking feed");
                    return entries;
                }
                Err(e) => {
                    warn!(
                        %url,
                        error = %e,
                        body_preview = %truncate_for_log(&body, BODY_PREVIEW_BYTES),
                        "Mirror returned unusable payload; trying next"
                    );
                }
            }
        }

        warn!(category = %category.label, "All mirrors failed; skipping category");
        Vec::new()
    }
}

/// Join a mirror base URL and a route path into a feed URL.
fn feed_url(mirror: &str, route: &str) -> String {
    format!("{}{}", mirror.trim_end_matches('/'), route)
}
