use serde::{Deserialize, Serialize};
use tracing::info;

use crate::detector::check_all_conflicts;
use crate::model::{
    ConflictResult, ExistingSchedule, ScheduleArrangementInput, TeacherResponsibility,
};

// ---------------------------------------------------------------------------
// Batch result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RejectedPlacement {
    pub class_id: String,
    pub verdict: ConflictResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Class ids of accepted placements, in input order.
    pub accepted: Vec<String>,
    pub rejected: Vec<RejectedPlacement>,
}

// ---------------------------------------------------------------------------
// Sequential batch check
// ---------------------------------------------------------------------------

/// Check a sequence of placements (bulk import, auto-arrangement) as if they
/// were committed one by one.
///
/// Each placement goes through [`check_all_conflicts`] against the snapshot
/// plus every placement accepted before it. An accepted placement replaces
/// the snapshot entry with the same class id, so moves do not collide with
/// their old position. Rejected placements leave the working snapshot
/// untouched.
pub fn check_batch(
    placements: &[ScheduleArrangementInput],
    existing: &[ExistingSchedule],
    responsibilities: &[TeacherResponsibility],
) -> BatchOutcome {
    let mut working: Vec<ExistingSchedule> = existing.to_vec();
    let mut outcome = BatchOutcome::default();

    for placement in placements {
        let verdict = check_all_conflicts(placement, &working, responsibilities);
        if verdict.has_conflict() {
            outcome.rejected.push(RejectedPlacement {
                class_id: placement.class_id.clone(),
                verdict,
            });
            continue;
        }

        let previous = working
            .iter()
            .find(|s| s.class_id == placement.class_id)
            .cloned();
        working.retain(|s| s.class_id != placement.class_id);
        working.push(committed(placement, previous.as_ref()));
        outcome.accepted.push(placement.class_id.clone());
    }

    info!(
        placements = placements.len(),
        accepted = outcome.accepted.len(),
        rejected = outcome.rejected.len(),
        "batch check finished"
    );
    outcome
}

/// The entry an accepted placement becomes. A re-save in the same grade and
/// timeslot keeps the lock of the entry it replaces, and unchanged subject,
/// teacher or room keep their display names.
fn committed(
    placement: &ScheduleArrangementInput,
    previous: Option<&ExistingSchedule>,
) -> ExistingSchedule {
    let mut entry = ExistingSchedule::from_placement(placement);
    let Some(previous) = previous else {
        return entry;
    };

    if previous.timeslot_id == entry.timeslot_id && previous.grade_id == entry.grade_id {
        entry.is_locked = previous.is_locked;
    }
    if previous.subject_code == entry.subject_code {
        entry.subject_name = previous.subject_name.clone();
    }
    if previous.teacher_id == entry.teacher_id {
        entry.teacher_name = previous.teacher_name.clone();
    }
    if previous.room_id == entry.room_id {
        entry.room_name = previous.room_name.clone();
    }
    entry
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
