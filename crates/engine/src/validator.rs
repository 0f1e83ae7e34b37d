use std::collections::HashSet;

use serde::Serialize;

use crate::model::{ExistingSchedule, ScheduleArrangementInput, TeacherResponsibility};

// ---------------------------------------------------------------------------
// Validation result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Boundary validation
// ---------------------------------------------------------------------------

/// Validate a proposed placement before it reaches the conflict engine.
/// Errors must block the call; warnings are advisory.
pub fn validate_placement(input: &ScheduleArrangementInput) -> ValidationResult {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let required = [
        ("classId", &input.class_id),
        ("timeslotId", &input.timeslot_id),
        ("subjectCode", &input.subject_code),
        ("gradeId", &input.grade_id),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("Placement is missing '{}'", field));
        }
    }

    if input.academic_year == 0 {
        errors.push("Placement has no academic year".to_string());
    }

    if input.teacher_id.is_none() {
        warnings.push(format!(
            "Placement '{}' has no teacher -- assignment and teacher checks are skipped",
            input.class_id
        ));
    }

    ValidationResult { errors, warnings }
}

/// Validate a term snapshot loaded by the repository layer.
pub fn validate_snapshot(
    schedules: &[ExistingSchedule],
    responsibilities: &[TeacherResponsibility],
) -> ValidationResult {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // -----------------------------------------------------------------------
    // Error: duplicate class IDs
    // -----------------------------------------------------------------------
    {
        let mut seen: HashSet<&str> = HashSet::new();
        for schedule in schedules {
            if !seen.insert(schedule.class_id.as_str()) {
                errors.push(format!(
                    "Duplicate class ID '{}' -- each placement must have a unique ID",
                    schedule.class_id
                ));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Per-schedule errors
    // -----------------------------------------------------------------------
    for schedule in schedules {
        if schedule.timeslot_id.trim().is_empty() {
            errors.push(format!("Schedule '{}' has no timeslot", schedule.class_id));
        }
        if schedule.grade_id.trim().is_empty() {
            errors.push(format!("Schedule '{}' has no grade", schedule.class_id));
        }
    }

    // -----------------------------------------------------------------------
    // Responsibility warnings
    // -----------------------------------------------------------------------
    {
        let mut seen = HashSet::new();
        for resp in responsibilities {
            let key = (
                resp.teacher_id,
                resp.subject_code.as_str(),
                resp.grade_id.as_str(),
                resp.academic_year,
                resp.semester,
            );
            if !seen.insert(key) {
                warnings.push(format!(
                    "Responsibility {} duplicates teacher {} teaching {} for class {} in the same term",
                    resp.resp_id, resp.teacher_id, resp.subject_code, resp.grade_id
                ));
            }
            if resp.teach_hour == 0 {
                warnings.push(format!(
                    "Responsibility {} owes no weekly periods -- it will never need scheduling",
                    resp.resp_id
                ));
            }
        }
    }

    ValidationResult { errors, warnings }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::fixtures::{existing, placement, responsibilities, responsibility, schedule};

    #[test]
    fn well_formed_placement() {
        let result = validate_placement(&placement("N", "T1", "MATH101", "M1-1", Some(1), None));
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_fields_are_errors() {
        let mut input = placement("", "T1", " ", "M1-1", None, None);
        input.academic_year = 0;
        let result = validate_placement(&input);
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors[0].contains("classId"));
        assert!(result.errors[1].contains("subjectCode"));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn fixture_snapshot_is_valid() {
        let result = validate_snapshot(&existing(), &responsibilities());
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn duplicate_class_id_is_error() {
        let mut schedules = existing();
        schedules.push(schedule("C1", "T9", "ART101", "M1-3", None, None));
        let result = validate_snapshot(&schedules, &[]);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("'C1'"));
    }

    #[test]
    fn responsibility_warnings() {
        let mut resps = responsibilities();
        resps.push(responsibility(99, 1, "MATH101", "M1-1"));
        let mut idle = responsibility(100, 4, "PE101", "M1-1");
        idle.teach_hour = 0;
        resps.push(idle);

        let result = validate_snapshot(&existing(), &resps);
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].starts_with("Responsibility 99 duplicates"));
    }
}
