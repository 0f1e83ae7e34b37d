#![deny(clippy::all)]

use napi_derive::napi;
use timetable_conflicts::model as engine;
use timetable_conflicts::{batch, detector, scan, validator};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Semester {
    #[napi(value = "SEMESTER_1")]
    First,
    #[napi(value = "SEMESTER_2")]
    Second,
}

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictType {
    #[napi(value = "NONE")]
    None,
    #[napi(value = "TEACHER_CONFLICT")]
    TeacherConflict,
    #[napi(value = "CLASS_CONFLICT")]
    ClassConflict,
    #[napi(value = "ROOM_CONFLICT")]
    RoomConflict,
    #[napi(value = "LOCKED_TIMESLOT")]
    LockedTimeslot,
    #[napi(value = "TEACHER_NOT_ASSIGNED")]
    TeacherNotAssigned,
}

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingResource {
    #[napi(value = "TEACHER")]
    Teacher,
    #[napi(value = "ROOM")]
    Room,
    #[napi(value = "BOTH")]
    Both,
}

// ---------------------------------------------------------------------------
// Enum conversions
// ---------------------------------------------------------------------------

impl From<Semester> for engine::Semester {
    fn from(v: Semester) -> Self {
        match v {
            Semester::First => engine::Semester::First,
            Semester::Second => engine::Semester::Second,
        }
    }
}

impl From<engine::Semester> for Semester {
    fn from(v: engine::Semester) -> Self {
        match v {
            engine::Semester::First => Semester::First,
            engine::Semester::Second => Semester::Second,
        }
    }
}

impl From<engine::ConflictType> for ConflictType {
    fn from(v: engine::ConflictType) -> Self {
        match v {
            engine::ConflictType::None => ConflictType::None,
            engine::ConflictType::TeacherConflict => ConflictType::TeacherConflict,
            engine::ConflictType::ClassConflict => ConflictType::ClassConflict,
            engine::ConflictType::RoomConflict => ConflictType::RoomConflict,
            engine::ConflictType::LockedTimeslot => ConflictType::LockedTimeslot,
            engine::ConflictType::TeacherNotAssigned => ConflictType::TeacherNotAssigned,
        }
    }
}

impl From<scan::MissingResource> for MissingResource {
    fn from(v: scan::MissingResource) -> Self {
        match v {
            scan::MissingResource::Teacher => MissingResource::Teacher,
            scan::MissingResource::Room => MissingResource::Room,
            scan::MissingResource::Both => MissingResource::Both,
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: snapshot / input side
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ExistingSchedule {
    pub class_id: String,
    pub timeslot_id: String,
    pub subject_code: String,
    pub subject_name: String,
    pub room_id: Option<u32>,
    pub room_name: Option<String>,
    pub grade_id: String,
    pub is_locked: Option<bool>,
    pub teacher_id: Option<u32>,
    pub teacher_name: Option<String>,
}

impl From<ExistingSchedule> for engine::ExistingSchedule {
    fn from(v: ExistingSchedule) -> Self {
        engine::ExistingSchedule {
            class_id: v.class_id,
            timeslot_id: v.timeslot_id,
            subject_code: v.subject_code,
            subject_name: v.subject_name,
            room_id: v.room_id,
            room_name: v.room_name,
            grade_id: v.grade_id,
            is_locked: v.is_locked.unwrap_or(false),
            teacher_id: v.teacher_id,
            teacher_name: v.teacher_name,
        }
    }
}

impl From<engine::ExistingSchedule> for ExistingSchedule {
    fn from(v: engine::ExistingSchedule) -> Self {
        ExistingSchedule {
            class_id: v.class_id,
            timeslot_id: v.timeslot_id,
            subject_code: v.subject_code,
            subject_name: v.subject_name,
            room_id: v.room_id,
            room_name: v.room_name,
            grade_id: v.grade_id,
            is_locked: Some(v.is_locked),
            teacher_id: v.teacher_id,
            teacher_name: v.teacher_name,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct TeacherResponsibility {
    pub resp_id: u32,
    pub teacher_id: u32,
    pub subject_code: String,
    pub grade_id: String,
    pub academic_year: u32,
    pub semester: Semester,
    pub teach_hour: u32,
}

impl From<TeacherResponsibility> for engine::TeacherResponsibility {
    fn from(v: TeacherResponsibility) -> Self {
        engine::TeacherResponsibility {
            resp_id: v.resp_id,
            teacher_id: v.teacher_id,
            subject_code: v.subject_code,
            grade_id: v.grade_id,
            academic_year: v.academic_year,
            semester: v.semester.into(),
            teach_hour: v.teach_hour,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ScheduleArrangementInput {
    pub class_id: String,
    pub timeslot_id: String,
    pub subject_code: String,
    pub grade_id: String,
    pub teacher_id: Option<u32>,
    pub room_id: Option<u32>,
    pub academic_year: u32,
    pub semester: Semester,
}

impl From<ScheduleArrangementInput> for engine::ScheduleArrangementInput {
    fn from(v: ScheduleArrangementInput) -> Self {
        engine::ScheduleArrangementInput {
            class_id: v.class_id,
            timeslot_id: v.timeslot_id,
            subject_code: v.subject_code,
            grade_id: v.grade_id,
            teacher_id: v.teacher_id,
            room_id: v.room_id,
            academic_year: v.academic_year,
            semester: v.semester.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: verdicts
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ConflictResult {
    pub conflict_type: ConflictType,
    pub message: String,
    pub conflicting_schedule: Option<ExistingSchedule>,
}

impl From<engine::ConflictResult> for ConflictResult {
    fn from(v: engine::ConflictResult) -> Self {
        ConflictResult {
            conflict_type: v.conflict_type.into(),
            message: v.message,
            conflicting_schedule: v.conflicting_schedule.map(Into::into),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct RejectedPlacement {
    pub class_id: String,
    pub verdict: ConflictResult,
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub accepted: Vec<String>,
    pub rejected: Vec<RejectedPlacement>,
}

impl From<batch::BatchOutcome> for BatchOutcome {
    fn from(v: batch::BatchOutcome) -> Self {
        BatchOutcome {
            accepted: v.accepted,
            rejected: v
                .rejected
                .into_iter()
                .map(|r| RejectedPlacement {
                    class_id: r.class_id,
                    verdict: r.verdict.into(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: term scan
// ---------------------------------------------------------------------------

fn pair(schedules: [engine::ExistingSchedule; 2]) -> Vec<ExistingSchedule> {
    schedules.into_iter().map(Into::into).collect()
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct TeacherConflict {
    pub teacher_id: u32,
    pub teacher_name: Option<String>,
    pub timeslot_id: String,
    /// Always two entries.
    pub schedules: Vec<ExistingSchedule>,
}

impl From<scan::TeacherConflict> for TeacherConflict {
    fn from(v: scan::TeacherConflict) -> Self {
        TeacherConflict {
            teacher_id: v.teacher_id,
            teacher_name: v.teacher_name,
            timeslot_id: v.timeslot_id,
            schedules: pair(v.schedules),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct RoomConflict {
    pub room_id: u32,
    pub room_name: Option<String>,
    pub timeslot_id: String,
    pub schedules: Vec<ExistingSchedule>,
}

impl From<scan::RoomConflict> for RoomConflict {
    fn from(v: scan::RoomConflict) -> Self {
        RoomConflict {
            room_id: v.room_id,
            room_name: v.room_name,
            timeslot_id: v.timeslot_id,
            schedules: pair(v.schedules),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ClassConflict {
    pub grade_id: String,
    pub timeslot_id: String,
    pub schedules: Vec<ExistingSchedule>,
}

impl From<scan::ClassConflict> for ClassConflict {
    fn from(v: scan::ClassConflict) -> Self {
        ClassConflict {
            grade_id: v.grade_id,
            timeslot_id: v.timeslot_id,
            schedules: pair(v.schedules),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct UnassignedSchedule {
    pub schedule: ExistingSchedule,
    pub missing_resource: MissingResource,
}

impl From<scan::UnassignedSchedule> for UnassignedSchedule {
    fn from(v: scan::UnassignedSchedule) -> Self {
        UnassignedSchedule {
            schedule: v.schedule.into(),
            missing_resource: v.missing_resource.into(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ConflictSummary {
    pub academic_year: u32,
    pub semester: Semester,
    pub teacher_conflicts: Vec<TeacherConflict>,
    pub room_conflicts: Vec<RoomConflict>,
    pub class_conflicts: Vec<ClassConflict>,
    pub unassigned_schedules: Vec<UnassignedSchedule>,
    pub total_conflicts: u32,
}

impl From<scan::ConflictSummary> for ConflictSummary {
    fn from(v: scan::ConflictSummary) -> Self {
        ConflictSummary {
            academic_year: v.academic_year,
            semester: v.semester.into(),
            teacher_conflicts: v.teacher_conflicts.into_iter().map(Into::into).collect(),
            room_conflicts: v.room_conflicts.into_iter().map(Into::into).collect(),
            class_conflicts: v.class_conflicts.into_iter().map(Into::into).collect(),
            unassigned_schedules: v.unassigned_schedules.into_iter().map(Into::into).collect(),
            total_conflicts: v.total_conflicts as u32,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation result
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl From<validator::ValidationResult> for ValidationResult {
    fn from(v: validator::ValidationResult) -> Self {
        ValidationResult {
            errors: v.errors,
            warnings: v.warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Exported functions
// ---------------------------------------------------------------------------

fn schedules(existing: Vec<ExistingSchedule>) -> Vec<engine::ExistingSchedule> {
    existing.into_iter().map(Into::into).collect()
}

fn responsibilities(resps: Vec<TeacherResponsibility>) -> Vec<engine::TeacherResponsibility> {
    resps.into_iter().map(Into::into).collect()
}

fn validated(input: ScheduleArrangementInput) -> napi::Result<engine::ScheduleArrangementInput> {
    let input = engine::ScheduleArrangementInput::from(input);
    let validation = validator::validate_placement(&input);
    if !validation.is_ok() {
        return Err(napi::Error::from_reason(validation.errors.join("; ")));
    }
    Ok(input)
}

/// Check a placement's shape and return errors and warnings without running
/// any rule.
#[napi]
pub fn validate_placement(input: ScheduleArrangementInput) -> ValidationResult {
    let input = engine::ScheduleArrangementInput::from(input);
    validator::validate_placement(&input).into()
}

#[napi]
pub fn check_teacher_conflict(
    input: ScheduleArrangementInput,
    existing: Vec<ExistingSchedule>,
) -> ConflictResult {
    let input = engine::ScheduleArrangementInput::from(input);
    timetable_conflicts::check_teacher_conflict(&input, &schedules(existing), input.exclusion())
        .into()
}

#[napi]
pub fn check_class_conflict(
    input: ScheduleArrangementInput,
    existing: Vec<ExistingSchedule>,
) -> ConflictResult {
    let input = engine::ScheduleArrangementInput::from(input);
    timetable_conflicts::check_class_conflict(&input, &schedules(existing), input.exclusion())
        .into()
}

#[napi]
pub fn check_room_conflict(
    input: ScheduleArrangementInput,
    existing: Vec<ExistingSchedule>,
) -> ConflictResult {
    let input = engine::ScheduleArrangementInput::from(input);
    timetable_conflicts::check_room_conflict(&input, &schedules(existing), input.exclusion())
        .into()
}

#[napi]
pub fn check_locked_timeslot(
    input: ScheduleArrangementInput,
    existing: Vec<ExistingSchedule>,
) -> ConflictResult {
    let input = engine::ScheduleArrangementInput::from(input);
    timetable_conflicts::check_locked_timeslot(&input, &schedules(existing), input.exclusion())
        .into()
}

#[napi]
pub fn check_teacher_assignment(
    input: ScheduleArrangementInput,
    responsibilities: Vec<TeacherResponsibility>,
) -> ConflictResult {
    let input = engine::ScheduleArrangementInput::from(input);
    timetable_conflicts::check_teacher_assignment(&input, &self::responsibilities(responsibilities))
        .into()
}

/// Single prioritized verdict for one placement. Rejects malformed input
/// instead of checking it.
#[napi]
pub fn check_all_conflicts(
    input: ScheduleArrangementInput,
    existing: Vec<ExistingSchedule>,
    responsibilities: Vec<TeacherResponsibility>,
) -> napi::Result<ConflictResult> {
    let input = validated(input)?;
    Ok(detector::check_all_conflicts(
        &input,
        &schedules(existing),
        &self::responsibilities(responsibilities),
    )
    .into())
}

/// Check placements in order, each against the snapshot plus those accepted
/// before it.
#[napi]
pub fn check_batch(
    placements: Vec<ScheduleArrangementInput>,
    existing: Vec<ExistingSchedule>,
    responsibilities: Vec<TeacherResponsibility>,
) -> napi::Result<BatchOutcome> {
    let placements = placements
        .into_iter()
        .map(validated)
        .collect::<napi::Result<Vec<_>>>()?;
    Ok(batch::check_batch(
        &placements,
        &schedules(existing),
        &self::responsibilities(responsibilities),
    )
    .into())
}

#[napi]
pub fn scan_term(
    academic_year: u32,
    semester: Semester,
    existing: Vec<ExistingSchedule>,
) -> ConflictSummary {
    scan::scan_term(academic_year, semester.into(), &schedules(existing)).into()
}
