use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A raw spreadsheet cell.
///
/// Deserializes from JSON `null`, numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Blank,
    Number(f64),
    Text(String),
}

static BLANK: Cell = Cell::Blank;

impl Cell {
    /// Blank cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Blank => true,
            Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    /// The cell's text, trimmed. Integral numbers print without a fraction.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Blank => Cow::Borrowed(""),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Cow::Owned(format!("{}", *n as i64))
            }
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(text) => Cow::Borrowed(text.trim()),
        }
    }

    /// The cell as a whole number: an integral number or all-digit text.
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                Some(*n as u64)
            }
            Self::Text(text) => {
                let text = text.trim();
                if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                    text.parse().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// Rows of raw cells; rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Parse tab-separated text as pasted from a spreadsheet.
    ///
    /// One line per row; trailing empty lines are ignored.
    pub fn from_pasted_text(text: &str) -> Self {
        let mut rows: Vec<Vec<Cell>> = text
            .lines()
            .map(|line| {
                line.split('\t')
                    .map(|cell| {
                        if cell.trim().is_empty() {
                            Cell::Blank
                        } else {
                            Cell::Text(cell.to_string())
                        }
                    })
                    .collect()
            })
            .collect();

        while rows
            .last()
            .is_some_and(|row| row.iter().all(Cell::is_blank))
        {
            rows.pop();
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The cell at `(row, col)`, blank when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&BLANK)
    }

    /// A copy without the given column indices.
    pub fn without_columns(&self, columns: &[usize]) -> Self {
        if columns.is_empty() {
            return self.clone();
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(col, _)| !columns.contains(col))
                    .map(|(_, cell)| cell.clone())
                    .collect()
            })
            .collect();

        Self { rows }
    }
}

/// The cell at `col` of a row, blank when out of range.
pub fn cell_at(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&BLANK)
}

pub(crate) fn blank_cell() -> &'static Cell {
    &BLANK
}
