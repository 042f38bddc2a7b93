//! Runtime configuration for the fetch pipeline.
//!
//! Every knob the fetcher honors lives in [`FetchConfig`]: the ordered RSSHub
//! mirror list, the ordered category routes, the per-category item cap, the
//! per-request timeout, and the settle delay used before screenshots. The
//! defaults reproduce the public mirror set and the four Xiaoyuzhou charts;
//! a YAML file passed via `--config` overrides any subset of the fields.
//!
//! ```yaml
//! mirrors:
//!   - "https://rsshub.example.org"
//! per_category_limit: 5
//! ```
//!
//! Fields not present in the file keep their defaults, so a config that only
//! swaps the mirror list still fetches all four charts.

use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::info;

/// Public RSSHub mirrors, tried in order until one answers with a usable feed.
pub const DEFAULT_MIRRORS: [&str; 4] = [
    "https://rsshub.app",
    "https://rsshub.feedly.cn",
    "https://rsshub.pseudoyu.com",
    "https://rsshub.mormm.com",
];

/// The four Xiaoyuzhou charts, as `(label, route)` pairs in display order.
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("编辑推荐", "/xiaoyuzhou/editor_choice.json"),
    ("热门榜", "/xiaoyuzhou/ranking/hot.json"),
    ("锋芒榜", "/xiaoyuzhou/ranking/sharp.json"),
    ("新星榜", "/xiaoyuzhou/ranking/new.json"),
];

/// How many entries of each chart make it into the ledger and the rendering.
pub const DEFAULT_PER_CATEGORY_LIMIT: usize = 10;

/// Per-request timeout for feed fetches, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How long rendered pages get to settle before a screenshot, in seconds.
pub const DEFAULT_PAGE_SETTLE_DELAY_SECS: u64 = 5;

/// One chart to fetch: a human-readable label plus the RSSHub route for it.
///
/// Categories are kept as an ordered list rather than a map because their
/// order is meaningful: it decides fetch order, ledger row order, and the
/// card order on the rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRoute {
    /// Display label, also written verbatim into the CSV ledger.
    pub label: String,
    /// Route path appended to a mirror base URL, e.g. `/xiaoyuzhou/ranking/hot.json`.
    pub route: String,
}

/// Everything the fetch and render stages need to know at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Mirror base URLs, tried in order for every category.
    pub mirrors: Vec<String>,
    /// Charts to fetch, in the order they are fetched and rendered.
    pub categories: Vec<CategoryRoute>,
    /// Maximum entries kept per category.
    pub per_category_limit: usize,
    /// Timeout applied to each individual feed request, in seconds.
    pub request_timeout_secs: u64,
    /// Delay before screenshots of pages that load content late, in seconds.
    pub page_settle_delay_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            mirrors: DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(label, route)| CategoryRoute {
                    label: label.to_string(),
                    route: route.to_string(),
                })
                .collect(),
            per_category_limit: DEFAULT_PER_CATEGORY_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            page_settle_delay_secs: DEFAULT_PAGE_SETTLE_DELAY_SECS,
        }
    }
}

impl FetchConfig {
    /// Load a configuration from a YAML file, falling back to defaults for
    /// any field the file does not mention.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// describes a configuration the fetcher could not act on (no mirrors,
    /// no categories, or a zero item cap).
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        info!(
            path,
            mirrors = config.mirrors.len(),
            categories = config.categories.len(),
            "Loaded fetch configuration"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.mirrors.is_empty() {
            return Err("configuration needs at least one mirror".into());
        }
        if self.categories.is_empty() {
            return Err("configuration needs at least one category".into());
        }
        if self.per_category_limit == 0 {
            return Err("per_category_limit must be at least 1".into());
        }
        Ok(())
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Screenshot settle delay as a [`Duration`].
    pub fn page_settle_delay(&self) -> Duration {
        Duration::from_secs(self.page_settle_delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_cover_all_four_charts() {
        let config = FetchConfig::default();

        assert_eq!(config.mirrors.len(), 4);
        assert_eq!(config.mirrors[0], "https://rsshub.app");
        assert_eq!(config.categories.len(), 4);
        assert_eq!(config.categories[0].label, "编辑推荐");
        assert_eq!(config.categories[0].route, "/xiaoyuzhou/editor_choice.json");
        assert_eq!(config.categories[3].label, "新星榜");
        assert_eq!(config.per_category_limit, 10);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.page_settle_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults_for_missing_fields() {
        let file = write_config(
            "mirrors:\n  - \"https://rsshub.internal.example\"\nper_category_limit: 5\n",
        );

        let config = FetchConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.mirrors, vec!["https://rsshub.internal.example"]);
        assert_eq!(config.per_category_limit, 5);
        // Untouched fields fall back to the defaults.
        assert_eq!(config.categories.len(), 4);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_yaml_can_replace_categories() {
        let file = write_config(
            "categories:\n  - label: \"热门榜\"\n    route: \"/xiaoyuzhou/ranking/hot.json\"\n",
        );

        let config = FetchConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].label, "热门榜");
    }

    #[test]
    fn test_empty_mirror_list_is_rejected() {
        let file = write_config("mirrors: []\n");
        assert!(FetchConfig::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let file = write_config("per_category_limit: 0\n");
        assert!(FetchConfig::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(FetchConfig::load("/nonexistent/fetch.yaml").is_err());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let file = write_config("mirrors: [unterminated\n");
        assert!(FetchConfig::load(file.path().to_str().unwrap()).is_err());
    }
}
