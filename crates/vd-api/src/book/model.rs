use serde::{Deserialize, Serialize};
use validator::Validate;
use vd_content::ingest::{Grid, IngestReport};
use vd_db::models::WordRecord;

use crate::error::ApiError;

/// Import request: a spreadsheet as JSON rows or as pasted tab-separated text
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// Display name of the book, usually the source file name
    #[validate(length(min = 1, max = 255, message = "Book name must be 1-255 characters"))]
    pub book_name: String,
    #[serde(default)]
    pub rows: Option<Grid>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ImportRequest {
    /// Take the grid out of the request. Exactly one source must be given.
    pub fn take_grid(&mut self) -> Result<Grid, ApiError> {
        match (self.rows.take(), self.text.take()) {
            (Some(rows), None) => Ok(rows),
            (None, Some(text)) => Ok(Grid::from_pasted_text(&text)),
            (Some(_), Some(_)) => Err(ApiError::Validation(
                "Provide either rows or text, not both".to_string(),
            )),
            (None, None) => Err(ApiError::Validation(
                "Provide rows or text to import".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub report: IngestReport,
    pub words: Vec<WordRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListWordsQuery {
    /// Only words of this day
    pub day: Option<u32>,
    /// Only active words due now, soonest first
    #[serde(default)]
    pub due: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_take_grid_from_text() {
        let mut request: ImportRequest = serde_json::from_value(json!({
            "bookName": "toeic.xlsx",
            "text": "apple\t사과\npear\t배\n"
        }))
        .unwrap();

        let grid = request.take_grid().unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_take_grid_requires_one_source() {
        let mut neither: ImportRequest =
            serde_json::from_value(json!({ "bookName": "empty" })).unwrap();
        assert!(neither.take_grid().is_err());

        let mut both: ImportRequest = serde_json::from_value(json!({
            "bookName": "both",
            "rows": [["apple", "사과"]],
            "text": "apple\t사과"
        }))
        .unwrap();
        assert!(both.take_grid().is_err());
    }

    #[test]
    fn test_book_name_length() {
        let request: ImportRequest =
            serde_json::from_value(json!({ "bookName": "", "text": "a\tb" })).unwrap();
        assert!(request.validate().is_err());

        let request: ImportRequest =
            serde_json::from_value(json!({ "bookName": "toeic", "text": "a\tb" })).unwrap();
        assert!(request.validate().is_ok());
    }
}
