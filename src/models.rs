//! Data models for podcast ranking entries and the RSSHub wire format.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RankingEntry`]: One ranked podcast row, ready for the CSV ledger and the chart
//! - [`FeedPayload`], [`FeedItem`], [`FeedAuthor`]: The JSON shape RSSHub mirrors
//!   return for the Xiaoyuzhou routes
//!
//! Mirrors disagree about which optional fields they populate, so every wire
//! field is an `Option` and [`entries_from_payload`] fills the gaps with fixed
//! placeholders instead of dropping the item.

use chrono::NaiveDate;
use serde::Deserialize;

/// Placeholder used when a feed item carries no title.
pub const MISSING_TITLE: &str = "无标题";
/// Placeholder used when a feed item carries no author name.
pub const MISSING_AUTHOR: &str = "未知";

/// A single ranked podcast on one day's chart.
///
/// Each run of the application produces one `RankingEntry` per podcast per
/// category. Entries are appended to the CSV ledger and grouped by category
/// when the daily chart is rendered.
///
/// # Fields
///
/// * `date` - The local calendar date of the run
/// * `category` - The chart the podcast appeared on (e.g. "热门榜")
/// * `rank` - Position within the category, starting at 1
/// * `title` - Podcast title, or [`MISSING_TITLE`] if the feed omitted it
/// * `author` - Podcast author, or [`MISSING_AUTHOR`] if the feed omitted it
/// * `link` - Episode or show URL; empty when the feed omitted it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    /// The local date this ranking was observed.
    pub date: NaiveDate,
    /// The category label the entry was ranked under.
    pub category: String,
    /// 1-based position within the category.
    pub rank: u32,
    /// Podcast title.
    pub title: String,
    /// Podcast author name.
    pub author: String,
    /// Episode or show URL.
    pub link: String,
}

/// The top-level JSON document an RSSHub mirror returns for a ranking route.
///
/// A response missing the `items` array is treated as unusable, which is what
/// lets the fetcher distinguish a real feed from a mirror error page that
/// happens to be valid JSON.
#[derive(Debug, Deserialize)]
pub struct FeedPayload {
    /// Ranked feed items in chart order.
    pub items: Vec<FeedItem>,
}

/// One item of an RSSHub ranking feed.
///
/// All fields are optional on the wire; missing values are replaced with
/// placeholders when the item is converted to a [`RankingEntry`].
#[derive(Debug, Deserialize)]
pub struct FeedItem {
    /// Podcast title.
    pub title: Option<String>,
    /// Nested author object.
    pub author: Option<FeedAuthor>,
    /// Episode or show URL.
    pub url: Option<String>,
}

/// The nested author object of a feed item.
#[derive(Debug, Deserialize)]
pub struct FeedAuthor {
    /// Author display name.
    pub name: Option<String>,
}

/// Convert a parsed feed payload into ranking entries for one category.
///
/// Items are taken in feed order, which is the chart order the mirror
/// published, and capped at `limit`. Ranks are assigned 1-based from that
/// order. Missing titles and authors become [`MISSING_TITLE`] and
/// [`MISSING_AUTHOR`]; a missing URL becomes an empty string so the CSV
/// column stays aligned.
///
/// # Arguments
///
/// * `date` - The local date to stamp on every entry
/// * `category` - The category label these items were ranked under
/// * `payload` - The parsed mirror response
/// * `limit` - Maximum number of items to keep
///
/// # Returns
///
/// At most `limit` entries, in feed order, with contiguous ranks from 1.
pub fn entries_from_payload(
    date: NaiveDate,
    category: &str,
    payload: FeedPayload,
    limit: usize,
) -> Vec<RankingEntry> {
    payload
        .items
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, item)| RankingEntry {
            date,
            category: category.to_string(),
            rank: (idx + 1) as u32,
            title: item.title.unwrap_or_else(|| MISSING_TITLE.to_string()),
            author: item
                .author
                .and_then(|author| author.name)
                .unwrap_or_else(|| MISSING_AUTHOR.to_string()),
            link: item.url.unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()
    }

    #[test]
    fn test_payload_parses_full_item() {
        let json = r#"{
            "items": [
                {
                    "title": "声东击西",
                    "author": {"name": "ETW Studio"},
                    "url": "https://www.xiaoyuzhoufm.com/podcast/abc123"
                }
            ]
        }"#;

        let payload: FeedPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].title.as_deref(), Some("声东击西"));
    }

    #[test]
    fn test_payload_without_items_is_rejected() {
        let json = r#"{"message": "route temporarily unavailable"}"#;
        assert!(serde_json::from_str::<FeedPayload>(json).is_err());
    }

    #[test]
    fn test_payload_ignores_unknown_fields() {
        let json = r#"{
            "title": "小宇宙 - 热门榜",
            "lastBuildDate": "2025-05-06T00:00:00Z",
            "items": [{"title": "奇想驿", "author": {"name": "产品沉思录"}, "url": "https://example.com/1"}]
        }"#;

        let payload: FeedPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.items.len(), 1);
    }

    #[test]
    fn test_entries_keep_feed_order_and_rank_from_one() {
        let json = r#"{
            "items": [
                {"title": "第一名", "author": {"name": "甲"}, "url": "https://example.com/1"},
                {"title": "第二名", "author": {"name": "乙"}, "url": "https://example.com/2"},
                {"title": "第三名", "author": {"name": "丙"}, "url": "https://example.com/3"}
            ]
        }"#;

        let payload: FeedPayload = serde_json::from_str(json).unwrap();
        let entries = entries_from_payload(test_date(), "热门榜", payload, 10);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].title, "第一名");
        assert_eq!(entries[1].rank, 2);
        assert_eq!(entries[2].rank, 3);
        assert_eq!(entries[2].title, "第三名");
        assert!(entries.iter().all(|e| e.category == "热门榜"));
        assert!(entries.iter().all(|e| e.date == test_date()));
    }

    #[test]
    fn test_entries_capped_at_limit() {
        let items: Vec<String> = (1..=25)
            .map(|n| format!(r#"{{"title": "节目{n}", "url": "https://example.com/{n}"}}"#))
            .collect();
        let json = format!(r#"{{"items": [{}]}}"#, items.join(","));

        let payload: FeedPayload = serde_json::from_str(&json).unwrap();
        let entries = entries_from_payload(test_date(), "新星榜", payload, 10);

        assert_eq!(entries.len(), 10);
        assert_eq!(entries[9].rank, 10);
        assert_eq!(entries[9].title, "节目10");
    }

    #[test]
    fn test_missing_fields_become_placeholders() {
        let json = r#"{"items": [{}]}"#;

        let payload: FeedPayload = serde_json::from_str(json).unwrap();
        let entries = entries_from_payload(test_date(), "编辑推荐", payload, 10);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, MISSING_TITLE);
        assert_eq!(entries[0].author, MISSING_AUTHOR);
        assert_eq!(entries[0].link, "");
        assert_eq!(entries[0].rank, 1);
    }

    #[test]
    fn test_null_fields_become_placeholders() {
        let json = r#"{"items": [{"title": null, "author": {"name": null}, "url": null}]}"#;

        let payload: FeedPayload = serde_json::from_str(json).unwrap();
        let entries = entries_from_payload(test_date(), "锋芒榜", payload, 10);

        assert_eq!(entries[0].title, MISSING_TITLE);
        assert_eq!(entries[0].author, MISSING_AUTHOR);
        assert_eq!(entries[0].link, "");
    }

    #[test]
    fn test_author_object_without_name_becomes_placeholder() {
        let json = r#"{"items": [{"title": "有标题", "author": {}, "url": "https://example.com/x"}]}"#;

        let payload: FeedPayload = serde_json::from_str(json).unwrap();
        let entries = entries_from_payload(test_date(), "热门榜", payload, 10);

        assert_eq!(entries[0].title, "有标题");
        assert_eq!(entries[0].author, MISSING_AUTHOR);
    }

    #[test]
    fn test_empty_items_produce_no_entries() {
        let json = r#"{"items": []}"#;

        let payload: FeedPayload = serde_json::from_str(json).unwrap();
        let entries = entries_from_payload(test_date(), "热门榜", payload, 10);

        assert!(entries.is_empty());
    }
}
