//! File source — parses an uploaded capture-form CSV into `CaptureRecord`s.
//!
//! The file must carry exactly 11 columns including `SOLUTION`; anything else
//! is rejected with a validation error and the session dataset is left
//! untouched. No repo-wide CSV dependency: the schema is fixed, so a small
//! local parser with quote handling is enough.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::AppError;
use crate::intake::expand_solution_abbreviation;
use crate::models::record::CaptureRecord;

/// The capture-form schema is exactly 11 columns wide.
pub const REQUIRED_COLUMN_COUNT: usize = 11;

const SOLUTION_COLUMN: &str = "SOLUTION";

/// Parses an uploaded capture-form CSV.
/// Column order is taken from the header row; the solution substitution is
/// applied before the records are returned.
pub fn parse_capture_csv(input: &str) -> Result<Vec<CaptureRecord>, AppError> {
    let mut rows = split_rows(input).into_iter();

    let header = rows
        .next()
        .ok_or_else(|| AppError::Validation("The uploaded file is empty.".to_string()))?;

    if header.len() != REQUIRED_COLUMN_COUNT {
        return Err(AppError::Validation(format!(
            "The uploaded CSV does not contain the correct number of columns. \
             Expected {REQUIRED_COLUMN_COUNT} columns."
        )));
    }

    let columns: Vec<String> = header.iter().map(|h| h.trim().to_uppercase()).collect();
    if !columns.iter().any(|c| c == SOLUTION_COLUMN) {
        return Err(AppError::Validation(
            "The uploaded CSV file must include a 'SOLUTION' field.".to_string(),
        ));
    }

    let field = |row: &[String], name: &str| -> String {
        columns
            .iter()
            .position(|c| c == name)
            .and_then(|i| row.get(i))
            .cloned()
            .unwrap_or_default()
    };

    let mut records = Vec::new();
    for (line_no, row) in rows.enumerate() {
        if row.len() != REQUIRED_COLUMN_COUNT {
            return Err(AppError::Validation(format!(
                "Row {} has {} columns, expected {REQUIRED_COLUMN_COUNT}.",
                line_no + 2,
                row.len()
            )));
        }
        records.push(CaptureRecord {
            client: field(&row, "CLIENT"),
            project_name: field(&row, "PROJECT_NAME"),
            solution: field(&row, SOLUTION_COLUMN),
            category: field(&row, "CATEGORY"),
            sub_category: field(&row, "SUB_CATEGORY"),
            importance: field(&row, "IMPORTANCE"),
            user_input: field(&row, "USER_INPUT"),
            key: field(&row, "KEY"),
            user_id: field(&row, "USER_ID"),
            session_id: field(&row, "SESSION ID"),
            date_loaded: parse_timestamp(&field(&row, "DATE_LOADED")),
        });
    }

    expand_solution_abbreviation(&mut records);
    Ok(records)
}

/// Splits CSV text into rows of fields, honoring double-quoted fields
/// (embedded commas, escaped quotes, and newlines inside quotes).
fn split_rows(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes => {} // swallow; the \n ends the row
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    // Drop fully blank trailing lines.
    rows.retain(|r| !(r.len() == 1 && r[0].trim().is_empty()));
    rows
}

/// Lenient timestamp parsing for the DATE_LOADED column — the capture system
/// exports either RFC 3339 or a plain `YYYY-MM-DD HH:MM:SS` stamp.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::SOLUTION_FULL_NAME;

    const HEADER: &str =
        "CLIENT,PROJECT_NAME,SOLUTION,CATEGORY,SUB_CATEGORY,IMPORTANCE,USER_INPUT,KEY,USER_ID,SESSION ID,DATE_LOADED";

    #[test]
    fn test_parses_well_formed_file() {
        let input = format!(
            "{HEADER}\nAcme,Migration,ILA,Key Challenges,Legacy stack,High,Old ERP,k1,u1,s1,2024-05-01 09:30:00\n"
        );
        let records = parse_capture_csv(&input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].client, "Acme");
        assert_eq!(records[0].importance, "High");
        assert!(records[0].date_loaded.is_some());
    }

    #[test]
    fn test_rejects_wrong_column_count() {
        let input = "CLIENT,PROJECT_NAME,SOLUTION\nAcme,Migration,ILA\n";
        let err = parse_capture_csv(input).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("correct number of columns")),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_missing_solution_column() {
        let header = HEADER.replace("SOLUTION", "PRODUCT");
        let input = format!("{header}\n");
        let err = parse_capture_csv(&input).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("'SOLUTION'")),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_expands_ila_on_load() {
        let input = format!("{HEADER}\nAcme,Migration,ILA,Additional Info,,,note,k1,u1,s1,\n");
        let records = parse_capture_csv(&input).unwrap();
        assert_eq!(records[0].solution, SOLUTION_FULL_NAME);
    }

    #[test]
    fn test_quoted_field_with_embedded_comma_and_quote() {
        let input = format!(
            "{HEADER}\nAcme,Migration,BI,Key Challenges,Reporting,High,\"Slow, \"\"manual\"\" reports\",k1,u1,s1,\n"
        );
        let records = parse_capture_csv(&input).unwrap();
        assert_eq!(records[0].user_input, "Slow, \"manual\" reports");
    }

    #[test]
    fn test_quoted_field_with_embedded_newline() {
        let input = format!(
            "{HEADER}\nAcme,Migration,BI,Additional Info,,,\"line one\nline two\",k1,u1,s1,\n"
        );
        let records = parse_capture_csv(&input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_input, "line one\nline two");
    }

    #[test]
    fn test_ragged_data_row_is_rejected() {
        let input = format!("{HEADER}\nAcme,Migration,BI\n");
        assert!(matches!(
            parse_capture_csv(&input),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(matches!(
            parse_capture_csv(""),
            Err(AppError::Validation(_))
        ));
    }
}
