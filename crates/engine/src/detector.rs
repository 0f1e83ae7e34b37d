use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checks::{
    check_class_conflict, check_locked_timeslot, check_room_conflict, check_teacher_assignment,
    check_teacher_conflict,
};
use crate::model::{
    ConflictResult, ConflictType, ExistingSchedule, Exclusion, ScheduleArrangementInput,
    TeacherResponsibility,
};

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Inputs shared by every rule for one placement.
struct RuleContext<'a> {
    existing: &'a [ExistingSchedule],
    responsibilities: &'a [TeacherResponsibility],
    exclusion: Exclusion<'a>,
}

type Rule = fn(&ScheduleArrangementInput, &RuleContext<'_>) -> ConflictResult;

fn locked_rule(input: &ScheduleArrangementInput, ctx: &RuleContext<'_>) -> ConflictResult {
    check_locked_timeslot(input, ctx.existing, ctx.exclusion)
}

fn teacher_rule(input: &ScheduleArrangementInput, ctx: &RuleContext<'_>) -> ConflictResult {
    check_teacher_conflict(input, ctx.existing, ctx.exclusion)
}

fn class_rule(input: &ScheduleArrangementInput, ctx: &RuleContext<'_>) -> ConflictResult {
    check_class_conflict(input, ctx.existing, ctx.exclusion)
}

fn room_rule(input: &ScheduleArrangementInput, ctx: &RuleContext<'_>) -> ConflictResult {
    check_room_conflict(input, ctx.existing, ctx.exclusion)
}

fn assignment_rule(input: &ScheduleArrangementInput, ctx: &RuleContext<'_>) -> ConflictResult {
    check_teacher_assignment(input, ctx.responsibilities)
}

/// Rules in verdict priority order. Locked slots override everything; among
/// resource clashes teacher beats class beats room; assignment legality is
/// reported last.
const RULES: [(ConflictType, Rule); 5] = [
    (ConflictType::LockedTimeslot, locked_rule),
    (ConflictType::TeacherConflict, teacher_rule),
    (ConflictType::ClassConflict, class_rule),
    (ConflictType::RoomConflict, room_rule),
    (ConflictType::TeacherNotAssigned, assignment_rule),
];

/// The conflict types in the order the aggregator reports them.
pub const RULE_ORDER: [ConflictType; 5] = [
    RULES[0].0, RULES[1].0, RULES[2].0, RULES[3].0, RULES[4].0,
];

const NO_CONFLICTS: &str = "No conflicts detected - schedule can be arranged";

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// The prioritized verdict plus every individual rule result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub verdict: ConflictResult,
    /// One entry per rule, in [`RULE_ORDER`].
    pub results: Vec<ConflictResult>,
}

/// Run a single rule by its conflict type. `None` for [`ConflictType::None`].
pub fn check_rule(
    rule: ConflictType,
    input: &ScheduleArrangementInput,
    existing: &[ExistingSchedule],
    responsibilities: &[TeacherResponsibility],
) -> Option<ConflictResult> {
    let ctx = RuleContext {
        existing,
        responsibilities,
        exclusion: input.exclusion(),
    };
    RULES
        .iter()
        .find(|(kind, _)| *kind == rule)
        .map(|(_, check)| check(input, &ctx))
}

/// Single-verdict gate for one proposed placement: the first non-`NONE`
/// result in [`RULE_ORDER`], or a `NONE` verdict when the placement is legal.
/// Later rules are not evaluated once one fires.
pub fn check_all_conflicts(
    input: &ScheduleArrangementInput,
    existing: &[ExistingSchedule],
    responsibilities: &[TeacherResponsibility],
) -> ConflictResult {
    let ctx = RuleContext {
        existing,
        responsibilities,
        exclusion: input.exclusion(),
    };

    let verdict = RULES
        .iter()
        .map(|(_, check)| check(input, &ctx))
        .find(ConflictResult::has_conflict)
        .unwrap_or_else(|| ConflictResult::clear(NO_CONFLICTS));

    log_verdict(input, &verdict);
    verdict
}

/// Like [`check_all_conflicts`] but runs every rule so callers can show all
/// problems with a placement, not just the highest-priority one.
pub fn evaluate_placement(
    input: &ScheduleArrangementInput,
    existing: &[ExistingSchedule],
    responsibilities: &[TeacherResponsibility],
) -> ConflictReport {
    let ctx = RuleContext {
        existing,
        responsibilities,
        exclusion: input.exclusion(),
    };

    let results: Vec<ConflictResult> = RULES.iter().map(|(_, check)| check(input, &ctx)).collect();
    let verdict = results
        .iter()
        .find(|r| r.has_conflict())
        .cloned()
        .unwrap_or_else(|| ConflictResult::clear(NO_CONFLICTS));

    log_verdict(input, &verdict);
    ConflictReport { verdict, results }
}

fn log_verdict(input: &ScheduleArrangementInput, verdict: &ConflictResult) {
    if verdict.has_conflict() {
        debug!(
            class_id = %input.class_id,
            timeslot_id = %input.timeslot_id,
            grade_id = %input.grade_id,
            conflict = ?verdict.conflict_type,
            "placement rejected"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
