//! Daily chart rendering: HTML card layout rasterized to a PNG.
//!
//! The chart is an HTML document styled as a stack of category cards, one
//! card per chart with rank, title, and author rows. The document is written
//! to disk, loaded in headless Chrome over a `file://` URL, and the full
//! page is captured as `daily_chart_<date>.png`.
//!
//! Feed-supplied text (titles, authors, category labels) is HTML-escaped
//! before it is embedded, so a podcast title that happens to contain markup
//! renders as text instead of becoming part of the document.

use crate::config::FetchConfig;
use crate::models::RankingEntry;
use chrono::NaiveDate;
use headless_chrome::protocol::cdp::Page;
use html_escape::encode_text;
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// File name of the intermediate HTML document inside the output directory.
pub const CHART_HTML_FILE: &str = "temp_chart.html";

/// Deadline for loading the local chart document and finding its body.
const RENDER_TIMEOUT: Duration = Duration::from_secs(20);

/// Card stack styling. 400px wide so the capture comes out as the kind of
/// tall narrow image chat apps preview nicely.
const CHART_STYLE: &str = r#"
body { font-family: sans-serif; background: #f6f6f6; padding: 20px; width: 400px; }
.header { text-align: center; margin-bottom: 20px; }
.title { font-size: 24px; font-weight: bold; color: #333; }
.date { color: #888; font-size: 14px; margin-top: 5px; }
.card { background: white; border-radius: 12px; padding: 15px; margin-bottom: 20px; box-shadow: 0 2px 8px rgba(0,0,0,0.05); }
.card-title { font-size: 18px; font-weight: bold; margin-bottom: 10px; border-left: 4px solid #ff5e5e; padding-left: 10px; }
.row { display: flex; align-items: center; margin-bottom: 12px; border-bottom: 1px solid #eee; padding-bottom: 8px; }
.rank { font-size: 18px; font-weight: bold; color: #ff5e5e; width: 30px; }
.info { flex: 1; overflow: hidden; }
.p-title { font-size: 15px; font-weight: 500; color: #333; margin: 0 0 4px 0; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.p-author { font-size: 12px; color: #999; margin: 0; }
"#;

/// File name of the rendered chart for a given date.
pub fn chart_file_name(date: NaiveDate) -> String {
    format!("daily_chart_{date}.png")
}

/// Build the chart HTML document for one day's entries.
///
/// Cards follow the category order of `config`; a category with no entries
/// produces no card. Within a card, rows appear in entry order, which is
/// rank order.
///
/// # Arguments
///
/// * `date` - The run date shown under the chart heading
/// * `config` - Supplies category order and the per-category limit shown in
///   card titles
/// * `entries` - All fetched entries for the day
///
/// # Returns
///
/// A complete, well-formed HTML document as a string.
pub fn build_chart_html(date: NaiveDate, config: &FetchConfig, entries: &[RankingEntry]) -> String {
    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>").unwrap();
    writeln!(html, "<html>").unwrap();
    writeln!(html, "<head>").unwrap();
    writeln!(html, "<meta charset=\"utf-8\">").unwrap();
    writeln!(html, "<style>{CHART_STYLE}</style>").unwrap();
    writeln!(html, "</head>").unwrap();
    writeln!(html, "<body>").unwrap();
    writeln!(html, "<div class=\"header\">").unwrap();
    writeln!(html, "  <div class=\"title\">小宇宙日报</div>").unwrap();
    writeln!(html, "  <div class=\"date\">{date}</div>").unwrap();
    writeln!(html, "</div>").unwrap();

    for category in &config.categories {
        let rows: Vec<&RankingEntry> = entries
            .iter()
            .filter(|entry| entry.category == category.label)
            .collect();
        if rows.is_empty() {
            continue;
        }

        writeln!(html, "<div class=\"card\">").unwrap();
        writeln!(
            html,
            "  <div class=\"card-title\">{} Top {}</div>",
            encode_text(&category.label),
            config.per_category_limit
        )
        .unwrap();
        for entry in rows {
            writeln!(html, "  <div class=\"row\">").unwrap();
            writeln!(html, "    <div class=\"rank\">{}</div>", entry.rank).unwrap();
            writeln!(html, "    <div class=\"info\">").unwrap();
            writeln!(
                html,
                "      <p class=\"p-title\">{}</p>",
                encode_text(&entry.title)
            )
            .unwrap();
            writeln!(
                html,
                "      <p class=\"p-author\">{}</p>",
                encode_text(&entry.author)
            )
            .unwrap();
            writeln!(html, "    </div>").unwrap();
            writeln!(html, "  </div>").unwrap();
        }
        writeln!(html, "</div>").unwrap();
    }

    writeln!(html, "</body>").unwrap();
    writeln!(html, "</html>").unwrap();
    html
}

/// Render the daily chart to a PNG in `dir`.
///
/// Writes the HTML document to [`CHART_HTML_FILE`], loads it in headless
/// Chrome via a `file://` URL, and captures the full page height. The HTML
/// file is left in place so a bad-looking render can be inspected.
///
/// # Arguments
///
/// * `dir` - Output directory for both the HTML document and the PNG
/// * `date` - The run date, used in the heading and the PNG file name
/// * `config` - Category order and per-category limit
/// * `entries` - All fetched entries for the day
///
/// # Returns
///
/// The path of the written PNG.
///
/// # Errors
///
/// Returns an error if the HTML cannot be written, Chrome cannot be
/// launched, or the page fails to load and capture.
#[instrument(level = "info", skip_all, fields(%date))]
pub fn generate_chart(
    dir: &Path,
    date: NaiveDate,
    config: &FetchConfig,
    entries: &[RankingEntry],
) -> Result<PathBuf, Box<dyn Error>> {
    let html = build_chart_html(date, config, entries);

    let html_path = dir.join(CHART_HTML_FILE);
    std::fs::write(&html_path, &html)?;
    info!(path = %html_path.display(), bytes = html.len(), "Wrote chart HTML");

    // file:// URLs need an absolute path.
    let absolute = std::fs::canonicalize(&html_path)?;
    let page_url =
        Url::from_file_path(&absolute).map_err(|_| "chart HTML path did not form a file URL")?;

    let browser = crate::browser::launch(None, &[])?;
    let tab = browser.new_tab()?;
    tab.set_default_timeout(RENDER_TIMEOUT);
    tab.navigate_to(page_url.as_str())?;
    tab.wait_until_navigated()?;

    // Capturing the body element covers the full document height, not just
    // the viewport.
    let body = tab.wait_for_element("body")?;
    let png = body.capture_screenshot(Page::CaptureScreenshotFormatOption::Png)?;

    let png_path = dir.join(chart_file_name(date));
    std::fs::write(&png_path, &png)?;
    info!(path = %png_path.display(), bytes = png.len(), "Rendered daily chart");
    Ok(png_path)
}
