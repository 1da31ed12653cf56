//! Immutable progress snapshots over the stage sequence.
//!
//! Every stage-update event produces a fresh snapshot via pure
//! transformation — snapshots are never mutated in place, so a concurrent
//! reader always observes a consistent "progress as of event N" value.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::stage::{StageKey, StageStatus, StageUpdate};

/// State of one stage inside a snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageState {
    pub key: StageKey,
    pub label: &'static str,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// One immutable snapshot of pipeline progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub stages: Vec<StageState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_stage: Option<StageKey>,
    pub completed_count: usize,
    pub total: usize,
    pub percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,
}

/// The all-idle snapshot a run starts from.
#[must_use]
pub fn initial_progress() -> Progress {
    let stages: Vec<StageState> = StageKey::ORDER
        .iter()
        .map(|&key| StageState {
            key,
            label: key.label(),
            status: StageStatus::Idle,
            started_at: None,
            finished_at: None,
            error_message: None,
            hint: None,
        })
        .collect();

    Progress {
        total: stages.len(),
        stages,
        active_stage: None,
        completed_count: 0,
        percent: 0,
        last_updated_at: None,
    }
}

/// Folds one stage update into a new snapshot.
///
/// The matching stage takes the update's status, its first transition
/// timestamp, a finish timestamp on success or error, and the update's
/// message and hint verbatim. A success clears the active stage; running and
/// error keep it pointed at the updated stage, so a failed run's last active
/// stage is the failing one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn apply_stage_update(prev: &Progress, update: &StageUpdate, now: DateTime<Utc>) -> Progress {
    let stages: Vec<StageState> = prev
        .stages
        .iter()
        .map(|stage| {
            if stage.key != update.stage {
                return stage.clone();
            }
            let finished = matches!(update.status, StageStatus::Success | StageStatus::Error);
            StageState {
                key: stage.key,
                label: stage.label,
                status: update.status,
                started_at: stage.started_at.or(Some(now)),
                finished_at: if finished { Some(now) } else { stage.finished_at },
                error_message: update.error_message.clone(),
                hint: update.hint.clone(),
            }
        })
        .collect();

    let completed_count = stages
        .iter()
        .filter(|stage| stage.status == StageStatus::Success)
        .count();
    let percent = ((completed_count as f64 / stages.len() as f64) * 100.0).round() as u8;
    let active_stage = if update.status == StageStatus::Success {
        None
    } else {
        Some(update.stage)
    };

    Progress {
        stages,
        active_stage,
        completed_count,
        total: prev.total,
        percent,
        last_updated_at: Some(now),
    }
}
