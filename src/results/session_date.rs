use crate::error::{DescriptionError, Result};
use chrono::NaiveDate;
use std::path::Path;

/// Derive the session date from a result file name (`YYYYMMDD...`)
pub fn session_date_from_path<P: AsRef<Path>>(path: P) -> Result<NaiveDate> {
    let path = path.as_ref();
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DescriptionError::Format(format!("No file name in path: {}", path.display())))?;

    parse_date_prefix(filename)
}

/// Parse the leading 8 characters of `filename` as `YYYYMMDD`
pub fn parse_date_prefix(filename: &str) -> Result<NaiveDate> {
    let prefix: String = filename.chars().take(8).collect();

    if prefix.len() != 8 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DescriptionError::Format(format!(
            "Expected YYYYMMDD date prefix in file name: {}",
            filename
        )));
    }

    let field = |range: std::ops::Range<usize>| prefix[range].parse::<u32>().unwrap_or_default();
    let year = field(0..4) as i32;

    NaiveDate::from_ymd_opt(year, field(4..6), field(6..8)).ok_or_else(|| {
        DescriptionError::Format(format!("Invalid session date '{}' in {}", prefix, filename))
    })
}
