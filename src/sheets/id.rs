use regex::Regex;
use thiserror::Error;

/// Errors related to spreadsheet identifier resolution.
#[derive(Error, Debug)]
pub enum SpreadsheetIdError {
    #[error("Spreadsheet ID not found in the input: {0}")]
    NotFound(String),
}

/// Resolves a user-supplied spreadsheet reference into a canonical resource ID.
///
/// Accepts either a bare spreadsheet ID (40-50 characters of `[A-Za-z0-9-_]`)
/// or a full sharing URL containing a `/d/<id>` segment. Anything else fails
/// with [`SpreadsheetIdError::NotFound`] naming the offending input.
pub fn resolve_spreadsheet_id(input: &str) -> Result<String, SpreadsheetIdError> {
    let canonical = Regex::new(r"^[A-Za-z0-9-_]{40,50}$").expect("Hardcoded regex pattern");
    if canonical.is_match(input) {
        return Ok(input.to_owned());
    }

    let sharing_url = Regex::new(r"/d/([A-Za-z0-9-_]+)").expect("Hardcoded regex pattern");
    sharing_url
        .captures(input)
        .map(|captures| captures[1].to_owned())
        .ok_or_else(|| SpreadsheetIdError::NotFound(input.to_owned()))
}
