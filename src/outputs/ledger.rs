//! Cumulative CSV ledger of fetched rankings.
//!
//! Every run appends its entries to a single CSV file, building a long-term
//! record of the charts over time. The file is created on first use with a
//! UTF-8 byte order mark and a header row; later runs append data rows only,
//! so the header never repeats and existing rows are never rewritten.
//!
//! The BOM is deliberate: spreadsheet applications commonly misread plain
//! UTF-8 CSVs full of Chinese text, and the mark makes them decode it
//! correctly.
//!
//! # Append Semantics
//!
//! Re-running on the same day appends that day's rows again. The ledger is
//! a log, not a set; deduplication is left to downstream analysis.

use crate::models::RankingEntry;
use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// File name of the ledger inside the output directory.
pub const LEDGER_FILE: &str = "xiaoyuzhou_data.csv";

/// UTF-8 byte order mark written once, at file creation.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Header row written once, at file creation.
const CSV_HEADER: [&str; 6] = ["date", "category", "rank", "title", "author", "link"];

/// Append ranking entries to the ledger, creating it if needed.
///
/// On first use the file is created with the BOM and header row; afterwards
/// the function only ever appends data rows. Fields are quoted by the CSV
/// writer as required, so titles containing commas, quotes, or newlines
/// survive round-tripping.
///
/// # Arguments
///
/// * `dir` - Output directory holding the ledger
/// * `entries` - Rows to append, in the order they should appear
///
/// # Returns
///
/// The path of the ledger file.
///
/// # Errors
///
/// Returns an error if the file cannot be created, opened, or written.
#[instrument(level = "info", skip_all, fields(rows = entries.len()))]
pub fn append_entries(dir: &Path, entries: &[RankingEntry]) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(LEDGER_FILE);
    let fresh = !path.exists();

    let mut writer = if fresh {
        let mut file = File::create(&path)?;
        file.write_all(&UTF8_BOM)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(CSV_HEADER)?;
        writer
    } else {
        let file = OpenOptions::new().append(true).open(&path)?;
        csv::Writer::from_writer(file)
    };

    for entry in entries {
        writer.write_record([
            entry.date.to_string(),
            entry.category.clone(),
            entry.rank.to_string(),
            entry.title.clone(),
            entry.author.clone(),
            entry.link.clone(),
        ])?;
    }
    writer.flush()?;

    info!(path = %path.display(), created = fresh, "Ledger updated");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(rank: u32, title: &str) -> RankingEntry {
        RankingEntry {
            date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            category: "热门榜".to_string(),
            rank,
            title: title.to_string(),
            author: "主播".to_string(),
            link: format!("https://example.com/{rank}"),
        }
    }

    #[test]
    fn test_fresh_ledger_gets_bom_header_and_rows() {
        let tmp = tempfile::tempdir().unwrap();

        let path = append_entries(tmp.path(), &[entry(1, "节目甲"), entry(2, "节目乙")]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);

        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,category,rank,title,author,link");
        assert_eq!(lines[1], "2025-05-06,热门榜,1,节目甲,主播,https://example.com/1");
        assert_eq!(lines[2], "2025-05-06,热门榜,2,节目乙,主播,https://example.com/2");
    }

    #[test]
    fn test_second_run_appends_without_touching_existing_rows() {
        let tmp = tempfile::tempdir().unwrap();

        let path = append_entries(tmp.path(), &[entry(1, "第一天")]).unwrap();
        let first_run = std::fs::read(&path).unwrap();

        append_entries(tmp.path(), &[entry(1, "第二天"), entry(2, "第二天续")]).unwrap();
        let both_runs = std::fs::read(&path).unwrap();

        // Everything from the first run survives byte for byte.
        assert!(both_runs.starts_with(&first_run));

        let text = String::from_utf8(both_runs[3..].to_vec()).unwrap();
        let header_count = text.lines().filter(|l| l.starts_with("date,")).count();
        assert_eq!(header_count, 1);
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_rerun_on_same_day_duplicates_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let rows = [entry(1, "重复的节目")];

        let path = append_entries(tmp.path(), &rows).unwrap();
        append_entries(tmp.path(), &rows).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let occurrences = text.lines().filter(|l| l.contains("重复的节目")).count();
        assert_eq!(occurrences, 2);
    }

    #[test]
    fn test_fields_with_commas_and_quotes_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let mut tricky = entry(1, r#"播客, 或者说 "电台""#);
        tricky.author = "甲, 乙".to_string();

        let path = append_entries(tmp.path(), &[tricky.clone()]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let mut reader = csv::Reader::from_reader(&bytes[3..]);
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[3], tricky.title.as_str());
        assert_eq!(&record[4], "甲, 乙");
    }
}
