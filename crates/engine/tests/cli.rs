//! End-to-end tests for the `timetable-conflicts` command binary: one JSON
//! request on stdin, one JSON envelope on stdout.

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("timetable-conflicts").unwrap();
    cmd.env_remove("TIMETABLE_CONFLICTS_CONFIG");
    cmd
}

/// T1: teacher 1 teaches M1-1 MATH101 in room 101. T2: teacher 2 teaches
/// M1-2 ENG101 in room 102. T3: locked assembly for M1-1.
fn schedules() -> Value {
    json!([
        {
            "classId": "C1", "timeslotId": "T1",
            "subjectCode": "MATH101", "subjectName": "Mathematics 101",
            "roomId": 101, "roomName": "Room 101",
            "gradeId": "M1-1", "isLocked": false,
            "teacherId": 1, "teacherName": "John Doe"
        },
        {
            "classId": "C2", "timeslotId": "T2",
            "subjectCode": "ENG101", "subjectName": "English 101",
            "roomId": 102, "roomName": "Room 102",
            "gradeId": "M1-2", "isLocked": false,
            "teacherId": 2, "teacherName": "Jane Smith"
        },
        {
            "classId": "C3", "timeslotId": "T3",
            "subjectCode": "ASSEMBLY", "subjectName": "School Assembly",
            "roomId": null, "gradeId": "M1-1", "isLocked": true
        }
    ])
}

fn responsibilities() -> Value {
    json!([
        { "respId": 1, "teacherId": 1, "subjectCode": "MATH101", "gradeId": "M1-1",
          "academicYear": 2566, "semester": "SEMESTER_1", "teachHour": 4 },
        { "respId": 2, "teacherId": 2, "subjectCode": "ENG101", "gradeId": "M1-2",
          "academicYear": 2566, "semester": "SEMESTER_1", "teachHour": 3 },
        { "respId": 3, "teacherId": 1, "subjectCode": "MATH101", "gradeId": "M1-2",
          "academicYear": 2566, "semester": "SEMESTER_1", "teachHour": 4 },
        { "respId": 4, "teacherId": 2, "subjectCode": "ENG101", "gradeId": "M1-1",
          "academicYear": 2566, "semester": "SEMESTER_1", "teachHour": 3 }
    ])
}

fn placement(timeslot: &str, subject: &str, grade: &str, teacher: Option<u32>, room: Option<u32>) -> Value {
    json!({
        "classId": "NEW",
        "timeslotId": timeslot,
        "subjectCode": subject,
        "gradeId": grade,
        "teacherId": teacher,
        "roomId": room,
        "academicYear": 2566,
        "semester": "SEMESTER_1"
    })
}

fn run_ok(request: Value) -> Value {
    let output = cmd()
        .write_stdin(request.to_string())
        .assert()
        .success()
        .stdout(contains(r#""ok":true"#))
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    parsed["data"].clone()
}

fn check_all(placement: Value) -> Value {
    run_ok(json!({
        "command": "checkAll",
        "placement": placement,
        "schedules": schedules(),
        "responsibilities": responsibilities()
    }))
}

// ---------------------------------------------------------------------------
// Single-placement verdicts
// ---------------------------------------------------------------------------

#[test]
fn teacher_conflict_verdict() {
    let data = check_all(placement("T1", "SCI101", "M1-2", Some(1), None));
    assert_eq!(data["conflictType"], "TEACHER_CONFLICT");
    assert_eq!(
        data["message"],
        "Teacher John Doe is already teaching Mathematics 101 (MATH101) for class M1-1 at this time"
    );
    assert_eq!(data["conflictingSchedule"]["classId"], "C1");
}

#[test]
fn class_conflict_verdict() {
    let data = check_all(placement("T1", "ENG101", "M1-1", Some(2), None));
    assert_eq!(data["conflictType"], "CLASS_CONFLICT");
}

#[test]
fn room_conflict_verdict() {
    let data = check_all(placement("T1", "ENG101", "M1-2", Some(2), Some(101)));
    assert_eq!(data["conflictType"], "ROOM_CONFLICT");
}

#[test]
fn locked_timeslot_verdict() {
    let data = check_all(placement("T3", "PE101", "M1-1", None, None));
    assert_eq!(data["conflictType"], "LOCKED_TIMESLOT");
    assert_eq!(data["message"], "This timeslot is locked for class M1-1 (School Assembly)");
}

#[test]
fn teacher_not_assigned_verdict() {
    let data = check_all(placement("T4", "SCI101", "M1-1", Some(1), None));
    assert_eq!(data["conflictType"], "TEACHER_NOT_ASSIGNED");
    assert!(data.get("conflictingSchedule").is_none());
}

#[test]
fn legal_placement_verdict() {
    let data = check_all(placement("T4", "MATH101", "M1-2", Some(1), None));
    assert_eq!(data["conflictType"], "NONE");
    assert_eq!(data["message"], "No conflicts detected - schedule can be arranged");
}

#[test]
fn evaluate_returns_all_results() {
    let data = run_ok(json!({
        "command": "evaluate",
        "placement": placement("T1", "MATH101", "M1-2", Some(1), Some(101)),
        "schedules": schedules(),
        "responsibilities": responsibilities()
    }));
    assert_eq!(data["verdict"]["conflictType"], "TEACHER_CONFLICT");
    let kinds: Vec<&str> = data["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["conflictType"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["NONE", "TEACHER_CONFLICT", "NONE", "ROOM_CONFLICT", "NONE"]
    );
}

#[test]
fn check_single_rule() {
    let data = run_ok(json!({
        "command": "checkRule",
        "rule": "ROOM_CONFLICT",
        "placement": placement("T1", "ENG101", "M1-2", Some(2), None),
        "schedules": schedules()
    }));
    assert_eq!(data["conflictType"], "NONE");
    assert_eq!(data["message"], "No room assigned");
}

#[test]
fn check_rule_none_is_rejected() {
    let request = json!({
        "command": "checkRule",
        "rule": "NONE",
        "placement": placement("T1", "ENG101", "M1-2", Some(2), None)
    });
    cmd()
        .write_stdin(request.to_string())
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("is not a rule"));
}

// ---------------------------------------------------------------------------
// Batch, scan and overview
// ---------------------------------------------------------------------------

#[test]
fn batch_checks_sequentially() {
    let mut second = placement("T4", "MATH101", "M1-2", Some(1), None);
    second["classId"] = json!("NEW2");
    let data = run_ok(json!({
        "command": "checkBatch",
        "placements": [placement("T4", "MATH101", "M1-1", Some(1), None), second],
        "schedules": schedules(),
        "responsibilities": responsibilities()
    }));
    assert_eq!(data["accepted"], json!(["NEW"]));
    assert_eq!(data["rejected"][0]["classId"], "NEW2");
    assert_eq!(data["rejected"][0]["verdict"]["conflictType"], "TEACHER_CONFLICT");
}

#[test]
fn scan_term_reports_buckets() {
    let mut rows = schedules();
    rows.as_array_mut().unwrap().push(json!({
        "classId": "C4", "timeslotId": "T1",
        "subjectCode": "SCI101", "subjectName": "Science 101",
        "roomId": 101, "gradeId": "M1-1", "teacherId": 1
    }));
    let data = run_ok(json!({
        "command": "scan",
        "snapshot": {
            "academicYear": 2566,
            "semester": "1",
            "schedules": rows
        }
    }));
    assert_eq!(data["semester"], "SEMESTER_1");
    assert_eq!(data["teacherConflicts"].as_array().unwrap().len(), 1);
    assert_eq!(data["roomConflicts"].as_array().unwrap().len(), 1);
    assert_eq!(data["classConflicts"].as_array().unwrap().len(), 1);
    assert_eq!(data["unassignedSchedules"].as_array().unwrap().len(), 0);
    assert_eq!(data["totalConflicts"], 3);
}

#[test]
fn overview_metrics() {
    let data = run_ok(json!({
        "command": "overview",
        "snapshot": {
            "academicYear": 2566,
            "semester": "SEMESTER_1",
            "schedules": schedules(),
            "responsibilities": responsibilities()
        },
        "gradeCount": 2,
        "timeslotsPerTerm": 30
    }));
    assert_eq!(data["totalScheduledHours"], 3);
    assert_eq!(data["completionRate"], 5.0);
    assert_eq!(data["activeTeachers"], 2);
    assert_eq!(data["scheduleConflicts"], 0);
    assert_eq!(data["teacherWorkloads"][0]["status"], "UNDERUTILIZED");
}

// ---------------------------------------------------------------------------
// Boundary validation and errors
// ---------------------------------------------------------------------------

#[test]
fn validate_reports_errors_and_warnings() {
    let mut rows = schedules();
    let duplicate = rows[0].clone();
    rows.as_array_mut().unwrap().push(duplicate);
    let data = run_ok(json!({
        "command": "validate",
        "placement": placement("T1", "MATH101", "M1-1", None, None),
        "schedules": rows
    }));
    assert_eq!(data["errors"].as_array().unwrap().len(), 1);
    assert!(data["errors"][0].as_str().unwrap().contains("Duplicate class ID 'C1'"));
    assert_eq!(data["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn malformed_placement_is_rejected_before_checking() {
    let request = json!({
        "command": "checkAll",
        "placement": placement("", "MATH101", "M1-1", Some(1), None),
        "schedules": schedules()
    });
    cmd()
        .write_stdin(request.to_string())
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("timeslotId"));
}

#[test]
fn invalid_json_input() {
    cmd()
        .write_stdin("not json")
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#))
        .stdout(contains("Invalid JSON input"));
}

#[test]
fn unknown_command() {
    cmd()
        .write_stdin(r#"{"command":"arrange"}"#)
        .assert()
        .failure()
        .stdout(contains(r#""ok":false"#));
}

#[test]
fn bad_config_file_fails_overview() {
    let request = json!({
        "command": "overview",
        "snapshot": { "academicYear": 2566, "semester": "SEMESTER_1", "schedules": [] },
        "gradeCount": 1,
        "timeslotsPerTerm": 1
    });
    cmd()
        .env("TIMETABLE_CONFLICTS_CONFIG", "/nonexistent/timetable.toml")
        .write_stdin(request.to_string())
        .assert()
        .failure()
        .stdout(contains("Failed to read config file"));
}
