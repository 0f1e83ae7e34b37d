use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use timetable_conflicts::config::{ConfigError, EngineConfig};
use timetable_conflicts::model::{
    ConflictType, ExistingSchedule, ScheduleArrangementInput, TeacherResponsibility, TermSnapshot,
};
use timetable_conflicts::validator::{self, ValidationResult};
use timetable_conflicts::{batch, detector, overview};

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
enum Request {
    /// Boundary validation only; never runs the rules.
    Validate {
        placement: Option<ScheduleArrangementInput>,
        #[serde(default)]
        schedules: Vec<ExistingSchedule>,
        #[serde(default)]
        responsibilities: Vec<TeacherResponsibility>,
    },
    CheckAll {
        placement: ScheduleArrangementInput,
        #[serde(default)]
        schedules: Vec<ExistingSchedule>,
        #[serde(default)]
        responsibilities: Vec<TeacherResponsibility>,
    },
    Evaluate {
        placement: ScheduleArrangementInput,
        #[serde(default)]
        schedules: Vec<ExistingSchedule>,
        #[serde(default)]
        responsibilities: Vec<TeacherResponsibility>,
    },
    CheckRule {
        rule: ConflictType,
        placement: ScheduleArrangementInput,
        #[serde(default)]
        schedules: Vec<ExistingSchedule>,
        #[serde(default)]
        responsibilities: Vec<TeacherResponsibility>,
    },
    CheckBatch {
        placements: Vec<ScheduleArrangementInput>,
        #[serde(default)]
        schedules: Vec<ExistingSchedule>,
        #[serde(default)]
        responsibilities: Vec<TeacherResponsibility>,
    },
    Scan {
        snapshot: TermSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    Overview {
        snapshot: TermSnapshot,
        grade_count: u32,
        timeslots_per_term: u32,
    },
}

#[derive(Debug, Serialize)]
struct OkResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrResponse {
    ok: bool,
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("Failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
    #[error("Invalid JSON input: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("'{0:?}' is not a rule that can be checked")]
    UnknownRule(ConflictType),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_ok<T: Serialize>(data: T) {
    let resp = OkResponse { ok: true, data };
    let json = serde_json::to_string(&resp).unwrap_or_else(|e| {
        format!("{{\"ok\":false,\"error\":\"serialization error: {}\"}}", e)
    });
    println!("{}", json);
    let _ = io::stdout().flush();
}

fn write_err(msg: impl std::fmt::Display) -> ! {
    let resp = ErrResponse {
        ok: false,
        error: msg.to_string(),
    };
    let json = serde_json::to_string(&resp).unwrap_or_else(|_| {
        "{\"ok\":false,\"error\":\"double serialization error\"}".to_string()
    });
    println!("{}", json);
    let _ = io::stdout().flush();
    std::process::exit(1);
}

/// Reject a placement that fails boundary validation before it reaches the
/// rules.
fn require_valid(placement: &ScheduleArrangementInput) -> Result<(), RequestError> {
    let result = validator::validate_placement(placement);
    if result.is_ok() {
        Ok(())
    } else {
        Err(RequestError::InvalidInput(result.errors.join("; ")))
    }
}

fn merge(a: ValidationResult, b: ValidationResult) -> ValidationResult {
    ValidationResult {
        errors: a.errors.into_iter().chain(b.errors).collect(),
        warnings: a.warnings.into_iter().chain(b.warnings).collect(),
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn handle(request: Request) -> Result<(), RequestError> {
    match request {
        Request::Validate {
            placement,
            schedules,
            responsibilities,
        } => {
            let snapshot = validator::validate_snapshot(&schedules, &responsibilities);
            let result = match placement {
                Some(p) => merge(validator::validate_placement(&p), snapshot),
                None => snapshot,
            };
            write_ok(result);
        }
        Request::CheckAll {
            placement,
            schedules,
            responsibilities,
        } => {
            require_valid(&placement)?;
            write_ok(detector::check_all_conflicts(
                &placement,
                &schedules,
                &responsibilities,
            ));
        }
        Request::Evaluate {
            placement,
            schedules,
            responsibilities,
        } => {
            require_valid(&placement)?;
            write_ok(detector::evaluate_placement(
                &placement,
                &schedules,
                &responsibilities,
            ));
        }
        Request::CheckRule {
            rule,
            placement,
            schedules,
            responsibilities,
        } => {
            require_valid(&placement)?;
            let result = detector::check_rule(rule, &placement, &schedules, &responsibilities)
                .ok_or(RequestError::UnknownRule(rule))?;
            write_ok(result);
        }
        Request::CheckBatch {
            placements,
            schedules,
            responsibilities,
        } => {
            for placement in &placements {
                require_valid(placement)?;
            }
            write_ok(batch::check_batch(&placements, &schedules, &responsibilities));
        }
        Request::Scan { snapshot } => {
            write_ok(snapshot.scan());
        }
        Request::Overview {
            snapshot,
            grade_count,
            timeslots_per_term,
        } => {
            let config = EngineConfig::from_env()?;
            write_ok(overview::overview_stats(
                &snapshot,
                grade_count,
                timeslots_per_term,
                &config,
            ));
        }
    }
    Ok(())
}

fn read_request() -> Result<Request, RequestError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(serde_json::from_str(&input)?)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    // stdout carries the JSON protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let result = read_request().and_then(|request| {
        debug!(?request, "request received");
        handle(request)
    });

    if let Err(e) = result {
        error!(error = %e, "request failed");
        write_err(e);
    }
}
