use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Half of an academic year. Accepts the short forms `"1"` / `"2"` on input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Semester {
    #[serde(rename = "SEMESTER_1", alias = "1")]
    First,
    #[serde(rename = "SEMESTER_2", alias = "2")]
    Second,
}

/// Outcome category of a single rule check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    None,
    /// The teacher is already teaching another class in the timeslot.
    TeacherConflict,
    /// The grade already has a lesson in the timeslot.
    ClassConflict,
    /// The room is already occupied in the timeslot.
    RoomConflict,
    /// The grade has an immovable (locked) activity in the timeslot.
    LockedTimeslot,
    /// No responsibility authorizes this teacher/subject/grade/term.
    TeacherNotAssigned,
}

// ---------------------------------------------------------------------------
// Schedule snapshot types
// ---------------------------------------------------------------------------

/// One already-placed class period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExistingSchedule {
    /// Unique per placement.
    pub class_id: String,
    /// Opaque day/period/term key. Only ever compared for equality.
    pub timeslot_id: String,
    pub subject_code: String,
    pub subject_name: String,
    pub room_id: Option<u32>,
    pub room_name: Option<String>,
    pub grade_id: String,
    /// Immovable periods such as assemblies or exams.
    #[serde(default)]
    pub is_locked: bool,
    /// Locked non-teaching periods usually have no teacher.
    pub teacher_id: Option<u32>,
    pub teacher_name: Option<String>,
}

impl ExistingSchedule {
    /// Materialize an accepted proposal so later checks see it. The subject
    /// name is unknown at this point, so the code stands in for it.
    pub fn from_placement(input: &ScheduleArrangementInput) -> Self {
        ExistingSchedule {
            class_id: input.class_id.clone(),
            timeslot_id: input.timeslot_id.clone(),
            subject_code: input.subject_code.clone(),
            subject_name: input.subject_code.clone(),
            room_id: input.room_id,
            room_name: None,
            grade_id: input.grade_id.clone(),
            is_locked: false,
            teacher_id: input.teacher_id,
            teacher_name: None,
        }
    }
}

/// A standing assignment of a teacher to a subject and grade for one term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherResponsibility {
    pub resp_id: u32,
    pub teacher_id: u32,
    pub subject_code: String,
    pub grade_id: String,
    pub academic_year: u32,
    pub semester: Semester,
    /// Weekly periods owed.
    pub teach_hour: u32,
}

impl TeacherResponsibility {
    /// True when this responsibility authorizes the proposed placement.
    pub fn covers(&self, teacher_id: u32, input: &ScheduleArrangementInput) -> bool {
        self.teacher_id == teacher_id
            && self.subject_code == input.subject_code
            && self.grade_id == input.grade_id
            && self.academic_year == input.academic_year
            && self.semester == input.semester
    }
}

/// Everything the repository layer loaded for one term. The engine trusts it
/// to be a consistent snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermSnapshot {
    pub academic_year: u32,
    pub semester: Semester,
    pub schedules: Vec<ExistingSchedule>,
    #[serde(default)]
    pub responsibilities: Vec<TeacherResponsibility>,
}

// ---------------------------------------------------------------------------
// Proposed placement
// ---------------------------------------------------------------------------

/// The placement under evaluation (created or moved).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleArrangementInput {
    /// Identifies the placement; an entry with the same id in the snapshot is
    /// the placement itself, not a competitor.
    pub class_id: String,
    pub timeslot_id: String,
    pub subject_code: String,
    pub grade_id: String,
    pub teacher_id: Option<u32>,
    pub room_id: Option<u32>,
    pub academic_year: u32,
    pub semester: Semester,
}

impl ScheduleArrangementInput {
    /// The entry every schedule scan must skip when checking this placement.
    /// An empty id still only skips rows with an empty id.
    pub fn exclusion(&self) -> Exclusion<'_> {
        Exclusion::ClassId(&self.class_id)
    }
}

/// Which snapshot entry, if any, is the placement being re-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion<'a> {
    Nothing,
    ClassId(&'a str),
}

impl Exclusion<'_> {
    pub fn skips(&self, schedule: &ExistingSchedule) -> bool {
        match self {
            Exclusion::Nothing => false,
            Exclusion::ClassId(id) => schedule.class_id == *id,
        }
    }
}

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Result of one rule check, or the aggregated verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub conflict_type: ConflictType,
    /// Human-readable explanation shown to the user.
    pub message: String,
    /// The entry that caused the conflict, for UI display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_schedule: Option<ExistingSchedule>,
}

impl ConflictResult {
    pub fn clear(message: impl Into<String>) -> Self {
        ConflictResult {
            conflict_type: ConflictType::None,
            message: message.into(),
            conflicting_schedule: None,
        }
    }

    pub fn conflict(
        conflict_type: ConflictType,
        message: impl Into<String>,
        conflicting_schedule: Option<&ExistingSchedule>,
    ) -> Self {
        ConflictResult {
            conflict_type,
            message: message.into(),
            conflicting_schedule: conflicting_schedule.cloned(),
        }
    }

    pub fn has_conflict(&self) -> bool {
        self.conflict_type != ConflictType::None
    }
}
