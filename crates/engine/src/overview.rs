use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, WorkloadThresholds};
use crate::model::TermSnapshot;

// ---------------------------------------------------------------------------
// Dashboard types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkloadStatus {
    Underutilized,
    Optimal,
    High,
    Overloaded,
}

impl WorkloadStatus {
    pub fn classify(periods: u32, thresholds: &WorkloadThresholds) -> Self {
        if periods <= thresholds.underutilized_max {
            WorkloadStatus::Underutilized
        } else if periods <= thresholds.optimal_max {
            WorkloadStatus::Optimal
        } else if periods <= thresholds.high_max {
            WorkloadStatus::High
        } else {
            WorkloadStatus::Overloaded
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherWorkload {
    pub teacher_id: u32,
    pub teacher_name: Option<String>,
    /// Entries in the term naming this teacher.
    pub scheduled_periods: u32,
    /// Sum of `teach_hour` over the teacher's responsibilities in the term.
    pub assigned_hours: u32,
    pub status: WorkloadStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_scheduled_hours: u32,
    /// Percentage of required grade/timeslot cells filled, one decimal.
    pub completion_rate: f64,
    pub active_teachers: u32,
    /// `total_conflicts` of the term scan.
    pub schedule_conflicts: u32,
    pub total_grades: u32,
    /// Ordered by teacher id.
    pub teacher_workloads: Vec<TeacherWorkload>,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// `scheduled / (grades * timeslots) * 100`, rounded to one decimal; zero
/// when nothing is required.
pub fn completion_rate(scheduled_periods: u32, grade_count: u32, timeslots_per_term: u32) -> f64 {
    let required = u64::from(grade_count) * u64::from(timeslots_per_term);
    if required == 0 {
        return 0.0;
    }
    let rate = f64::from(scheduled_periods) / required as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Dashboard figures for one term snapshot.
pub fn overview_stats(
    snapshot: &TermSnapshot,
    grade_count: u32,
    timeslots_per_term: u32,
    config: &EngineConfig,
) -> OverviewStats {
    let total_scheduled = snapshot.schedules.len() as u32;

    let active: HashSet<u32> = snapshot
        .schedules
        .iter()
        .filter_map(|s| s.teacher_id)
        .collect();

    let summary = snapshot.scan();

    OverviewStats {
        total_scheduled_hours: total_scheduled,
        completion_rate: completion_rate(total_scheduled, grade_count, timeslots_per_term),
        active_teachers: active.len() as u32,
        schedule_conflicts: summary.total_conflicts as u32,
        total_grades: grade_count,
        teacher_workloads: teacher_workloads(snapshot, &config.workload),
    }
}

/// Every teacher that is scheduled or holds a responsibility in the term.
pub fn teacher_workloads(
    snapshot: &TermSnapshot,
    thresholds: &WorkloadThresholds,
) -> Vec<TeacherWorkload> {
    struct Tally {
        name: Option<String>,
        periods: u32,
        hours: u32,
    }

    let mut tallies: BTreeMap<u32, Tally> = BTreeMap::new();

    for schedule in &snapshot.schedules {
        if let Some(teacher_id) = schedule.teacher_id {
            let tally = tallies.entry(teacher_id).or_insert(Tally {
                name: None,
                periods: 0,
                hours: 0,
            });
            tally.periods += 1;
            if tally.name.is_none() {
                tally.name = schedule.teacher_name.clone();
            }
        }
    }

    for resp in snapshot
        .responsibilities
        .iter()
        .filter(|r| r.academic_year == snapshot.academic_year && r.semester == snapshot.semester)
    {
        tallies
            .entry(resp.teacher_id)
            .or_insert(Tally {
                name: None,
                periods: 0,
                hours: 0,
            })
            .hours += resp.teach_hour;
    }

    tallies
        .into_iter()
        .map(|(teacher_id, tally)| TeacherWorkload {
            teacher_id,
            teacher_name: tally.name,
            scheduled_periods: tally.periods,
            assigned_hours: tally.hours,
            status: WorkloadStatus::classify(tally.periods, thresholds),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
