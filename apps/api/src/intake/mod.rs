//! Data intake — two interchangeable sources for the capture dataset:
//! an uploaded delimited file and the warehouse. Both converge on the same
//! session-held `Vec<CaptureRecord>`.

use crate::models::record::CaptureRecord;

pub mod csv;
pub mod handlers;
pub mod warehouse;

/// The one value substitution applied to the solution column.
pub const SOLUTION_ABBREVIATION: &str = "ILA";
pub const SOLUTION_FULL_NAME: &str = "Information Landscape Assessment";

/// Expands the known solution abbreviation in place. Applied when a dataset
/// is installed and again before field reduction; idempotent.
pub fn expand_solution_abbreviation(records: &mut [CaptureRecord]) {
    for record in records {
        if record.solution == SOLUTION_ABBREVIATION {
            record.solution = SOLUTION_FULL_NAME.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_is_idempotent() {
        let mut records = vec![CaptureRecord {
            solution: "ILA".to_string(),
            ..CaptureRecord::default()
        }];
        expand_solution_abbreviation(&mut records);
        assert_eq!(records[0].solution, SOLUTION_FULL_NAME);
        expand_solution_abbreviation(&mut records);
        assert_eq!(records[0].solution, SOLUTION_FULL_NAME);
    }

    #[test]
    fn test_expansion_only_replaces_exact_value() {
        let mut records = vec![CaptureRecord {
            solution: "ILA Phase 2".to_string(),
            ..CaptureRecord::default()
        }];
        expand_solution_abbreviation(&mut records);
        assert_eq!(records[0].solution, "ILA Phase 2");
    }
}
