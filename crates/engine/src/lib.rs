//! Schedule conflict detection for school timetables.
//!
//! Given a proposed placement of a subject, teacher and room into a timeslot
//! for a grade, decides whether the placement is legal against the current
//! term snapshot. Everything here is pure and synchronous; the caller owns
//! loading a consistent snapshot and persisting the verdict.
//!
//! - [`checks`]: the five per-rule checkers
//! - [`detector`]: priority-ordered single verdict for one placement
//! - [`batch`]: sequential checking for bulk imports
//! - [`scan`]: term-wide conflict report
//! - [`overview`]: dashboard metrics built on the scan
//! - [`validator`]: boundary validation of caller input

pub mod batch;
pub mod checks;
pub mod config;
pub mod detector;
pub mod model;
pub mod overview;
pub mod scan;
pub mod validator;

pub use checks::{
    check_class_conflict, check_locked_timeslot, check_room_conflict, check_teacher_assignment,
    check_teacher_conflict,
};
pub use detector::{check_all_conflicts, evaluate_placement, ConflictReport, RULE_ORDER};
pub use model::{
    ConflictResult, ConflictType, ExistingSchedule, Exclusion, ScheduleArrangementInput,
    Semester, TeacherResponsibility, TermSnapshot,
};
pub use scan::{scan_term, ConflictSummary};
