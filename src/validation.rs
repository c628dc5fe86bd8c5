use crate::error::AppError;
use chrono::NaiveDate;

/// Validate a record title. Whitespace-only titles count as empty; a valid
/// title is returned exactly as entered.
pub fn validate_title(title: &str) -> Result<&str, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput {
            field: "title",
            reason: "cannot be empty".into(),
        });
    }
    Ok(title)
}

/// Parse a deadline in YYYY-MM-DD format. Blank input means no deadline.
pub fn parse_deadline(input: &str) -> Result<Option<NaiveDate>, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::InvalidInput {
            field: "deadline",
            reason: format!("'{input}' is not a YYYY-MM-DD date"),
        })
}

/// Normalize an optional image reference: blank strings mean "no image".
pub fn normalize_image(image: Option<&str>) -> Option<String> {
    image
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
