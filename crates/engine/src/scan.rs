use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::checks::{class_clash, room_clash, teacher_clash};
use crate::model::{ExistingSchedule, Semester, TermSnapshot};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherConflict {
    pub teacher_id: u32,
    pub teacher_name: Option<String>,
    pub timeslot_id: String,
    pub schedules: [ExistingSchedule; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomConflict {
    pub room_id: u32,
    pub room_name: Option<String>,
    pub timeslot_id: String,
    pub schedules: [ExistingSchedule; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassConflict {
    pub grade_id: String,
    pub timeslot_id: String,
    pub schedules: [ExistingSchedule; 2],
}

/// Which resource a non-locked entry is missing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissingResource {
    Teacher,
    Room,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedSchedule {
    pub schedule: ExistingSchedule,
    pub missing_resource: MissingResource,
}

/// All conflicts of one term, bucketed by kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictSummary {
    pub academic_year: u32,
    pub semester: Semester,
    pub teacher_conflicts: Vec<TeacherConflict>,
    pub room_conflicts: Vec<RoomConflict>,
    pub class_conflicts: Vec<ClassConflict>,
    pub unassigned_schedules: Vec<UnassignedSchedule>,
    /// Sum of the four bucket lengths.
    pub total_conflicts: usize,
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Scan every entry of a term. Never stops early: three lessons sharing a
/// teacher and timeslot yield three teacher-conflict pairs. An entry may
/// appear in several buckets (for example unassigned and part of a class
/// conflict) but each clashing pair is counted once per bucket.
pub fn scan_term(
    academic_year: u32,
    semester: Semester,
    schedules: &[ExistingSchedule],
) -> ConflictSummary {
    let mut teacher_conflicts = Vec::new();
    let mut room_conflicts = Vec::new();
    let mut class_conflicts = Vec::new();

    for (timeslot_id, entries) in group_by_timeslot(schedules) {
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                // Duplicate rows of one placement are not a clash with itself.
                if a.class_id == b.class_id {
                    continue;
                }

                if let Some(teacher_id) = a.teacher_id {
                    if teacher_clash(timeslot_id, Some(teacher_id), b) {
                        teacher_conflicts.push(TeacherConflict {
                            teacher_id,
                            teacher_name: a.teacher_name.clone().or_else(|| b.teacher_name.clone()),
                            timeslot_id: timeslot_id.to_string(),
                            schedules: [(*a).clone(), (*b).clone()],
                        });
                    }
                }

                if let Some(room_id) = a.room_id {
                    if room_clash(timeslot_id, Some(room_id), b) {
                        room_conflicts.push(RoomConflict {
                            room_id,
                            room_name: a.room_name.clone().or_else(|| b.room_name.clone()),
                            timeslot_id: timeslot_id.to_string(),
                            schedules: [(*a).clone(), (*b).clone()],
                        });
                    }
                }

                if class_clash(timeslot_id, &a.grade_id, b) {
                    class_conflicts.push(ClassConflict {
                        grade_id: a.grade_id.clone(),
                        timeslot_id: timeslot_id.to_string(),
                        schedules: [(*a).clone(), (*b).clone()],
                    });
                }
            }
        }
    }

    let unassigned_schedules: Vec<UnassignedSchedule> =
        schedules.iter().filter_map(unassigned).collect();

    let total_conflicts = teacher_conflicts.len()
        + room_conflicts.len()
        + class_conflicts.len()
        + unassigned_schedules.len();

    info!(
        academic_year,
        ?semester,
        schedules = schedules.len(),
        teacher = teacher_conflicts.len(),
        room = room_conflicts.len(),
        class = class_conflicts.len(),
        unassigned = unassigned_schedules.len(),
        "term scan finished"
    );

    ConflictSummary {
        academic_year,
        semester,
        teacher_conflicts,
        room_conflicts,
        class_conflicts,
        unassigned_schedules,
        total_conflicts,
    }
}

impl TermSnapshot {
    pub fn scan(&self) -> ConflictSummary {
        scan_term(self.academic_year, self.semester, &self.schedules)
    }
}

/// Timeslots ascending, entries in input order within each timeslot.
fn group_by_timeslot(schedules: &[ExistingSchedule]) -> BTreeMap<&str, Vec<&ExistingSchedule>> {
    let mut groups: BTreeMap<&str, Vec<&ExistingSchedule>> = BTreeMap::new();
    for schedule in schedules {
        groups
            .entry(schedule.timeslot_id.as_str())
            .or_default()
            .push(schedule);
    }
    groups
}

/// Locked periods are allowed to run without teacher or room.
fn unassigned(schedule: &ExistingSchedule) -> Option<UnassignedSchedule> {
    if schedule.is_locked {
        return None;
    }
    let missing_resource = match (schedule.teacher_id, schedule.room_id) {
        (Some(_), Some(_)) => return None,
        (None, None) => MissingResource::Both,
        (None, Some(_)) => MissingResource::Teacher,
        (Some(_), None) => MissingResource::Room,
    };
    Some(UnassignedSchedule {
        schedule: schedule.clone(),
        missing_resource,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
