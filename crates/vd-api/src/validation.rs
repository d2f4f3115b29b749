use vd_content::ingest::Grid;

use crate::error::ApiError;

pub const MAX_BOOK_ID_LENGTH: usize = 128;

/// Book ids become document keys and path segments.
pub fn validate_book_id(book_id: &str) -> Result<(), ApiError> {
    if book_id.is_empty() {
        return Err(ApiError::Validation("Book id cannot be empty".to_string()));
    }

    if book_id.len() > MAX_BOOK_ID_LENGTH {
        return Err(ApiError::Validation(format!(
            "Book id must be at most {MAX_BOOK_ID_LENGTH} characters"
        )));
    }

    if !book_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ApiError::Validation(
            "Book id may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_grid_size(grid: &Grid, max_rows: usize) -> Result<(), ApiError> {
    if grid.is_empty() {
        return Err(ApiError::Validation("Import has no rows".to_string()));
    }

    if grid.len() > max_rows {
        return Err(ApiError::Validation(format!(
            "Import has {} rows, at most {max_rows} are allowed",
            grid.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vd_content::ingest::Cell;

    #[test]
    fn test_validate_book_id() {
        assert!(validate_book_id("toeic-day_1").is_ok());
        assert!(validate_book_id("").is_err());
        assert!(validate_book_id("has space").is_err());
        assert!(validate_book_id("단어장").is_err());
        assert!(validate_book_id(&"a".repeat(MAX_BOOK_ID_LENGTH)).is_ok());
        assert!(validate_book_id(&"a".repeat(MAX_BOOK_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_grid_size() {
        let grid = Grid::new(vec![
            vec![Cell::from("apple"), Cell::from("사과")],
            vec![Cell::from("pear"), Cell::from("배")],
        ]);

        assert!(validate_grid_size(&grid, 2).is_ok());
        assert!(validate_grid_size(&grid, 1).is_err());
        assert!(validate_grid_size(&Grid::new(Vec::new()), 10).is_err());
    }
}
