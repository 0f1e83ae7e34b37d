use crate::model::{
    ConflictResult, ConflictType, ExistingSchedule, Exclusion, ScheduleArrangementInput,
    TeacherResponsibility,
};

// ---------------------------------------------------------------------------
// Shared clash predicates
// ---------------------------------------------------------------------------

/// Both sides name the same teacher in the same timeslot. A missing teacher
/// on either side never clashes.
pub(crate) fn teacher_clash(
    timeslot_id: &str,
    teacher_id: Option<u32>,
    other: &ExistingSchedule,
) -> bool {
    match (teacher_id, other.teacher_id) {
        (Some(a), Some(b)) => a == b && other.timeslot_id == timeslot_id,
        _ => false,
    }
}

pub(crate) fn class_clash(timeslot_id: &str, grade_id: &str, other: &ExistingSchedule) -> bool {
    other.grade_id == grade_id && other.timeslot_id == timeslot_id
}

pub(crate) fn room_clash(timeslot_id: &str, room_id: Option<u32>, other: &ExistingSchedule) -> bool {
    match (room_id, other.room_id) {
        (Some(a), Some(b)) => a == b && other.timeslot_id == timeslot_id,
        _ => false,
    }
}

fn first_match<'a>(
    existing: &'a [ExistingSchedule],
    exclusion: Exclusion<'_>,
    pred: impl Fn(&ExistingSchedule) -> bool,
) -> Option<&'a ExistingSchedule> {
    existing.iter().find(|s| !exclusion.skips(s) && pred(*s))
}

// ---------------------------------------------------------------------------
// Checkers
// ---------------------------------------------------------------------------

/// Teacher double-booking: the proposed teacher already teaches another
/// class in the same timeslot.
pub fn check_teacher_conflict(
    input: &ScheduleArrangementInput,
    existing: &[ExistingSchedule],
    exclusion: Exclusion<'_>,
) -> ConflictResult {
    let Some(teacher_id) = input.teacher_id else {
        return ConflictResult::clear("No teacher assigned");
    };

    match first_match(existing, exclusion, |s| {
        teacher_clash(&input.timeslot_id, Some(teacher_id), s)
    }) {
        Some(hit) => {
            let teacher = hit
                .teacher_name
                .clone()
                .unwrap_or_else(|| format!("ID {}", teacher_id));
            ConflictResult::conflict(
                ConflictType::TeacherConflict,
                format!(
                    "Teacher {} is already teaching {} ({}) for class {} at this time",
                    teacher, hit.subject_name, hit.subject_code, hit.grade_id
                ),
                Some(hit),
            )
        }
        None => ConflictResult::clear("No teacher conflict"),
    }
}

/// Class double-booking: the grade already has a lesson in the timeslot.
/// Only the placement itself (same class id) is exempt.
pub fn check_class_conflict(
    input: &ScheduleArrangementInput,
    existing: &[ExistingSchedule],
    exclusion: Exclusion<'_>,
) -> ConflictResult {
    match first_match(existing, exclusion, |s| {
        class_clash(&input.timeslot_id, &input.grade_id, s)
    }) {
        Some(hit) => ConflictResult::conflict(
            ConflictType::ClassConflict,
            format!(
                "Class {} already has {} ({}) scheduled at this time",
                input.grade_id, hit.subject_name, hit.subject_code
            ),
            Some(hit),
        ),
        None => ConflictResult::clear("No class conflict"),
    }
}

/// Room double-booking. A placement without a room never conflicts.
pub fn check_room_conflict(
    input: &ScheduleArrangementInput,
    existing: &[ExistingSchedule],
    exclusion: Exclusion<'_>,
) -> ConflictResult {
    let Some(room_id) = input.room_id else {
        return ConflictResult::clear("No room assigned");
    };

    match first_match(existing, exclusion, |s| {
        room_clash(&input.timeslot_id, Some(room_id), s)
    }) {
        Some(hit) => {
            let room = hit
                .room_name
                .clone()
                .unwrap_or_else(|| format!("ID {}", room_id));
            ConflictResult::conflict(
                ConflictType::RoomConflict,
                format!(
                    "Room {} is already being used by class {} for {} at this time",
                    room, hit.grade_id, hit.subject_name
                ),
                Some(hit),
            )
        }
        None => ConflictResult::clear("No room conflict"),
    }
}

/// Locked timeslot: the grade has an immovable activity in the timeslot,
/// regardless of teacher or room availability.
pub fn check_locked_timeslot(
    input: &ScheduleArrangementInput,
    existing: &[ExistingSchedule],
    exclusion: Exclusion<'_>,
) -> ConflictResult {
    match first_match(existing, exclusion, |s| {
        s.is_locked && class_clash(&input.timeslot_id, &input.grade_id, s)
    }) {
        Some(hit) => ConflictResult::conflict(
            ConflictType::LockedTimeslot,
            format!(
                "This timeslot is locked for class {} ({})",
                input.grade_id, hit.subject_name
            ),
            Some(hit),
        ),
        None => ConflictResult::clear("Timeslot is not locked"),
    }
}

/// Assignment legality. Has no time dimension: only the responsibilities are
/// consulted.
pub fn check_teacher_assignment(
    input: &ScheduleArrangementInput,
    responsibilities: &[TeacherResponsibility],
) -> ConflictResult {
    let Some(teacher_id) = input.teacher_id else {
        return ConflictResult::clear("No teacher assigned");
    };

    if responsibilities.iter().any(|r| r.covers(teacher_id, input)) {
        ConflictResult::clear("Teacher is properly assigned")
    } else {
        ConflictResult::conflict(
            ConflictType::TeacherNotAssigned,
            format!(
                "Teacher ID {} is not assigned to teach {} for class {}",
                teacher_id, input.subject_code, input.grade_id
            ),
            None,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{
        ExistingSchedule, ScheduleArrangementInput, Semester, TeacherResponsibility,
    };

    pub fn schedule(
        class_id: &str,
        timeslot: &str,
        subject: &str,
        grade: &str,
        teacher: Option<u32>,
        room: Option<u32>,
    ) -> ExistingSchedule {
        ExistingSchedule {
            class_id: class_id.to_string(),
            timeslot_id: timeslot.to_string(),
            subject_code: subject.to_string(),
            subject_name: format!("{} name", subject),
            room_id: room,
            room_name: room.map(|r| format!("Room {}", r)),
            grade_id: grade.to_string(),
            is_locked: false,
            teacher_id: teacher,
            teacher_name: teacher.map(|t| format!("Teacher {}", t)),
        }
    }

    /// T1: teacher 1, M1-1, MATH101, room 101. T2: teacher 2, M1-2, ENG101,
    /// room 102. T3: locked ASSEMBLY for M1-1.
    pub fn existing() -> Vec<ExistingSchedule> {
        let mut assembly = schedule("C3", "T3", "ASSEMBLY", "M1-1", None, None);
        assembly.subject_name = "School Assembly".to_string();
        assembly.is_locked = true;
        vec![
            schedule("C1", "T1", "MATH101", "M1-1", Some(1), Some(101)),
            schedule("C2", "T2", "ENG101", "M1-2", Some(2), Some(102)),
            assembly,
        ]
    }

    pub fn responsibility(
        resp_id: u32,
        teacher: u32,
        subject: &str,
        grade: &str,
    ) -> TeacherResponsibility {
        TeacherResponsibility {
            resp_id,
            teacher_id: teacher,
            subject_code: subject.to_string(),
            grade_id: grade.to_string(),
            academic_year: 2566,
            semester: Semester::First,
            teach_hour: 4,
        }
    }

    pub fn responsibilities() -> Vec<TeacherResponsibility> {
        vec![
            responsibility(1, 1, "MATH101", "M1-1"),
            responsibility(2, 2, "ENG101", "M1-2"),
            responsibility(3, 1, "MATH101", "M1-2"),
            responsibility(4, 2, "ENG101", "M1-1"),
        ]
    }

    pub fn placement(
        class_id: &str,
        timeslot: &str,
        subject: &str,
        grade: &str,
        teacher: Option<u32>,
        room: Option<u32>,
    ) -> ScheduleArrangementInput {
        ScheduleArrangementInput {
            class_id: class_id.to_string(),
            timeslot_id: timeslot.to_string(),
            subject_code: subject.to_string(),
            grade_id: grade.to_string(),
            teacher_id: teacher,
            room_id: room,
            academic_year: 2566,
            semester: Semester::First,
        }
    }
}
