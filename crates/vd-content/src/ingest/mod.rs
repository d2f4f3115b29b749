//! Tabular word-list ingestion.
//!
//! A grid of raw cells goes through header detection, empty-column pruning,
//! day-column detection and row extraction. Bad rows are recorded in the
//! report and skipped; ingestion itself never fails.

pub mod detect;
pub mod grid;
pub mod report;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use vd_db::models::WordRecord;

pub use detect::{DaySignals, RowPattern};
pub use grid::{Cell, Grid};
pub use report::{IngestReport, RejectReason, RejectedRow};

use detect::DAY_PREFIX;
use grid::{blank_cell, cell_at};

use crate::tags::strip_tags;

/// The book an import writes into.
#[derive(Debug, Clone, Copy)]
pub struct ImportTarget<'a> {
    pub book_id: &'a str,
    /// Display name of the book, usually the source file name
    pub book_name: &'a str,
}

#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub words: Vec<WordRecord>,
    pub report: IngestReport,
}

/// Fields pulled out of one data row, before a record is built.
#[derive(Debug, Clone, PartialEq)]
struct ParsedRow {
    day: Option<u32>,
    english: String,
    korean: String,
    synonyms: Vec<String>,
    antonyms: Vec<String>,
    definition: Option<String>,
    example: Option<String>,
    day_from_prefix: bool,
}

/// Turn a grid into new words for `target`.
///
/// `existing` is the caller's snapshot of words already stored; a row whose
/// English form (case-insensitive) matches a word of the same book is
/// rejected as a duplicate. Callers importing into the same book
/// concurrently must serialize around their store.
pub fn ingest(
    grid: &Grid,
    target: &ImportTarget<'_>,
    existing: &[WordRecord],
    now: DateTime<Utc>,
) -> IngestOutcome {
    let header_detected = detect::detect_header(grid);
    let data_start = usize::from(header_detected);

    let (grid, day_signals, pruned_columns) = detect_layout(grid, header_detected);
    let has_day_column = day_signals.has_day_column();

    tracing::debug!(
        book_id = target.book_id,
        header_detected,
        has_day_column,
        ?day_signals,
        ?pruned_columns,
        "detected import layout"
    );

    let known: HashSet<String> = existing
        .iter()
        .filter(|word| word.book_id == target.book_id)
        .map(|word| dedup_key(&word.english))
        .collect();

    let mut report = IngestReport {
        book_id: target.book_id.to_string(),
        book_name: target.book_name.to_string(),
        header_detected,
        day_column_detected: has_day_column,
        day_signals,
        pruned_columns,
        ..IngestReport::default()
    };
    let mut words = Vec::new();

    for (index, row) in grid.rows().iter().enumerate().skip(data_start) {
        report.total_rows += 1;

        let parsed = match parse_row(row, has_day_column) {
            Ok(parsed) => parsed,
            Err(english) => {
                tracing::debug!(row = index, "skipping row without english or korean");
                report.rejected.push(RejectedRow {
                    row: index,
                    reason: RejectReason::MissingRequiredField,
                    english,
                });
                continue;
            }
        };

        if known.contains(&dedup_key(&parsed.english)) {
            tracing::debug!(row = index, english = %parsed.english, "skipping duplicate word");
            report.rejected.push(RejectedRow {
                row: index,
                reason: RejectReason::Duplicate,
                english: Some(parsed.english),
            });
            continue;
        }

        if parsed.day_from_prefix {
            report.day_from_prefix += 1;
        }
        words.push(build_record(parsed, target.book_id, now));
    }

    report.accepted = words.len();

    tracing::info!(
        book_id = target.book_id,
        total = report.total_rows,
        accepted = report.accepted,
        missing = report.missing_field_count(),
        duplicates = report.duplicate_count(),
        "ingested word list"
    );

    if !report.rejected.is_empty() {
        tracing::warn!(
            book_id = target.book_id,
            rejected = report.rejected.len(),
            "rows rejected during import"
        );
    }

    IngestOutcome { words, report }
}

/// Prune blank columns and decide whether the first column holds days.
///
/// The first column is judged before it is pruned: a blank day column next
/// to `"1 provide"` cells is the day-prefix layout and is kept. If it shows
/// no day evidence it is pruned with the others and the signals are taken
/// again on what remains.
fn detect_layout(grid: &Grid, header_detected: bool) -> (Grid, DaySignals, Vec<usize>) {
    let blank = detect::blank_columns(grid, usize::from(header_detected));
    let except_first: Vec<usize> = blank.iter().copied().filter(|&col| col != 0).collect();

    let with_first = grid.without_columns(&except_first);
    let signals = detect::collect_day_signals(&with_first, header_detected);
    if signals.has_day_column() || except_first.len() == blank.len() {
        return (with_first, signals, except_first);
    }

    let pruned = grid.without_columns(&blank);
    let signals = detect::collect_day_signals(&pruned, header_detected);
    (pruned, signals, blank)
}

fn dedup_key(english: &str) -> String {
    english.trim().to_lowercase()
}

/// Extract a row's fields. On failure returns the English form, if any, for
/// the report.
fn parse_row(row: &[Cell], has_day_column: bool) -> Result<ParsedRow, Option<String>> {
    let offset = usize::from(has_day_column);
    let field = |n: usize| cell_at(row, offset + n).text().into_owned();

    let day_cell = if has_day_column { cell_at(row, 0) } else { blank_cell() };
    let mut day = parse_day(day_cell);
    let mut english = field(0);
    let korean = field(1);

    if english.is_empty() || korean.is_empty() {
        return Err(Some(english).filter(|e| !e.is_empty()));
    }

    let mut day_from_prefix = false;
    if day_cell.is_blank() {
        if let Some((prefix_day, rest)) = split_day_prefix(&english) {
            day = Some(prefix_day);
            english = rest;
            day_from_prefix = true;
        }
    }

    Ok(ParsedRow {
        day,
        english,
        korean,
        synonyms: split_related(&field(2)),
        antonyms: split_related(&field(3)),
        definition: Some(strip_tags(&field(4))).filter(|d| !d.is_empty()),
        example: Some(field(5)).filter(|e| !e.is_empty()),
        day_from_prefix,
    })
}

/// `"1 provide"` -> `(1, "provide")`.
fn split_day_prefix(english: &str) -> Option<(u32, String)> {
    let caps = DAY_PREFIX.captures(english)?;
    let day = caps.get(1)?.as_str().parse().ok()?;
    let rest = caps.get(2)?.as_str().trim();
    (!rest.is_empty()).then(|| (day, rest.to_string()))
}

/// Read a day cell: `3`, `"3"`, `"Day 3"`, `"3일"`. Anything else is `None`.
fn parse_day(cell: &Cell) -> Option<u32> {
    match cell {
        Cell::Blank => None,
        Cell::Number(n) => {
            (n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX)).then(|| n.trunc() as u32)
        }
        Cell::Text(text) => {
            let text = text.trim();
            let text = match text.get(..3) {
                Some(prefix) if prefix.eq_ignore_ascii_case("day") => text[3..].trim_start(),
                _ => text,
            };
            let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
    }
}

/// Split a synonym/antonym cell on commas, dropping tags and empties.
fn split_related(text: &str) -> Vec<String> {
    text.split(',')
        .map(strip_tags)
        .filter(|item| !item.is_empty())
        .collect()
}

fn build_record(parsed: ParsedRow, book_id: &str, now: DateTime<Utc>) -> WordRecord {
    let mut word = WordRecord::new(book_id, parsed.english, parsed.korean, now);
    word.day = parsed.day;
    word.synonyms = parsed.synonyms;
    word.antonyms = parsed.antonyms;
    word.definition = parsed.definition;
    word.example = parsed.example;
    word
}
