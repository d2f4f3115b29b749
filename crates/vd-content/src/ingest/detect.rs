//! Layout detection for imported word lists.
//!
//! Detection runs in two stages: signals are extracted from a sample of rows,
//! then a decision table turns them into a layout. Both stages are exposed so
//! the report can show why a layout was chosen.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid, cell_at};
use crate::normalization::{contains_hangul, starts_with_latin};

/// Words that mark the first row as a header.
pub const HEADER_KEYWORDS: &[&str] = &[
    "day",
    "english",
    "korean",
    "영어",
    "한글",
    "뜻",
    "synonym",
    "antonym",
    "definition",
    "example",
    "동의어",
    "반의어",
    "영영풀이",
    "예문",
];

/// Data rows sampled when looking for empty columns.
pub const PRUNE_SAMPLE_ROWS: usize = 20;

/// Share of blank sampled cells at which a column is dropped.
pub const PRUNE_BLANK_RATIO: f64 = 0.8;

/// Populated data rows sampled for day-column detection.
pub const DAY_SAMPLE_ROWS: usize = 10;

/// `"1 provide"`: a day number glued to an English word.
pub(crate) static DAY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)$").expect("day prefix pattern is valid"));

/// Whether the first row is a header.
pub fn detect_header(grid: &Grid) -> bool {
    grid.rows().first().is_some_and(|row| {
        row.iter().any(|cell| {
            let text = cell.text().to_lowercase();
            HEADER_KEYWORDS.iter().any(|keyword| text.contains(keyword))
        })
    })
}

/// Columns that are blank in at least [`PRUNE_BLANK_RATIO`] of the sampled
/// data rows. Rows shorter than a column count as blank there.
pub fn blank_columns(grid: &Grid, data_start: usize) -> Vec<usize> {
    let sample: Vec<&Vec<Cell>> = grid
        .rows()
        .iter()
        .skip(data_start)
        .take(PRUNE_SAMPLE_ROWS)
        .collect();
    if sample.is_empty() {
        return Vec::new();
    }

    (0..grid.width())
        .filter(|&col| {
            let blanks = sample
                .iter()
                .filter(|row| cell_at(row, col).is_blank())
                .count();
            blanks as f64 / sample.len() as f64 >= PRUNE_BLANK_RATIO
        })
        .collect()
}

/// How a single data row is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPattern {
    /// `[1, "apple", "사과"]`
    Day,
    /// `["", "1 apple", "사과"]`
    DayPrefix,
    /// `["apple", "사과"]`
    NoDay,
    /// Anything else
    Unknown,
}

pub fn classify_row(row: &[Cell]) -> RowPattern {
    let first = cell_at(row, 0);
    let second = cell_at(row, 1).text();
    let third = cell_at(row, 2).text();

    if first.as_integer().is_some() && starts_with_latin(&second) && contains_hangul(&third) {
        return RowPattern::Day;
    }

    if first.is_blank() && contains_hangul(&third) {
        if let Some(caps) = DAY_PREFIX.captures(&second) {
            if caps.get(2).is_some_and(|rest| starts_with_latin(rest.as_str())) {
                return RowPattern::DayPrefix;
            }
        }
    }

    if starts_with_latin(&first.text()) && contains_hangul(&second) {
        return RowPattern::NoDay;
    }

    RowPattern::Unknown
}

/// Evidence collected for and against a leading day column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySignals {
    /// The header's first cell reads `day`
    pub header: bool,
    pub day_pattern: usize,
    pub day_prefix_pattern: usize,
    pub no_day_pattern: usize,
}

impl DaySignals {
    pub const fn day_evidence(&self) -> usize {
        self.day_pattern + self.day_prefix_pattern
    }

    /// Decision table:
    ///
    /// | header | outcome |
    /// |---|---|
    /// | yes | day column, unless rows only show the no-day layout |
    /// | no | day column only if day layouts outnumber no-day layouts |
    pub const fn has_day_column(&self) -> bool {
        if self.header {
            !(self.no_day_pattern > 0 && self.day_evidence() == 0)
        } else {
            self.day_evidence() > self.no_day_pattern
        }
    }
}

/// Whether a header's first cell names a day column.
pub fn header_day_signal(header: &[Cell]) -> bool {
    let first = cell_at(header, 0).text().to_lowercase();
    first == "day" || first.starts_with("day ")
}

/// Collect [`DaySignals`] from the header (if any) and up to
/// [`DAY_SAMPLE_ROWS`] data rows with at least two populated cells.
pub fn collect_day_signals(grid: &Grid, has_header: bool) -> DaySignals {
    let mut signals = DaySignals {
        header: has_header && grid.rows().first().is_some_and(|row| header_day_signal(row)),
        ..DaySignals::default()
    };

    let sample = grid
        .rows()
        .iter()
        .skip(usize::from(has_header))
        .filter(|row| row.iter().filter(|cell| !cell.is_blank()).count() >= 2)
        .take(DAY_SAMPLE_ROWS);

    for row in sample {
        match classify_row(row) {
            RowPattern::Day => signals.day_pattern += 1,
            RowPattern::DayPrefix => signals.day_prefix_pattern += 1,
            RowPattern::NoDay => signals.no_day_pattern += 1,
            RowPattern::Unknown => {}
        }
    }

    signals
}
