use serde::{Deserialize, Serialize};

use super::detect::DaySignals;

/// Why a data row did not become a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    /// English or Korean is empty
    MissingRequiredField,
    /// The book already holds a word with the same English form
    Duplicate,
}

impl RejectReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::Duplicate => "duplicate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    /// 0-based row index in the submitted grid, header included
    pub row: usize,
    pub reason: RejectReason,
    /// The row's English form, when it had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
}

/// Summary of one import run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub book_id: String,
    pub book_name: String,
    pub header_detected: bool,
    pub day_column_detected: bool,
    pub day_signals: DaySignals,
    /// Column indices dropped as mostly blank, in the submitted layout
    pub pruned_columns: Vec<usize>,
    /// Data rows seen (the header row is not counted)
    pub total_rows: usize,
    pub accepted: usize,
    pub rejected: Vec<RejectedRow>,
    /// Accepted rows whose day was split off the English cell
    pub day_from_prefix: usize,
}

impl IngestReport {
    pub fn rejected_count(&self, reason: RejectReason) -> usize {
        self.rejected.iter().filter(|row| row.reason == reason).count()
    }

    pub fn missing_field_count(&self) -> usize {
        self.rejected_count(RejectReason::MissingRequiredField)
    }

    pub fn duplicate_count(&self) -> usize {
        self.rejected_count(RejectReason::Duplicate)
    }
}
