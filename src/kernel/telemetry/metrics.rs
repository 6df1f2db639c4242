use std::collections::VecDeque;

use super::event::{FaultKind, TelemetryEvent};
use crate::kernel::round::RoundStatus;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub statement_stats: StatementStats,
    pub round_stats: RoundStats,
    pub session_stats: SessionStats,
    pub phrase_fallbacks: u64,
}

#[derive(Debug, Clone, Default)]
pub struct StatementStats {
    pub processed: u64,
    pub matched: u64,
    pub duplicates: u64,
    pub match_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RoundStats {
    pub started: u64,
    pub won: u64,
    pub lost: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub transitions: u64,
    pub restarts: u64,
    pub total_restart_delay_ms: u64,
    pub faults: u64,
    pub permission_faults: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::StatementProcessed { matched } => {
                snap.statement_stats.processed += 1;
                if *matched {
                    snap.statement_stats.matched += 1;
                }
            }
            TelemetryEvent::DuplicateSuppressed => snap.statement_stats.duplicates += 1,
            TelemetryEvent::RoundTransition { to, .. } => match to {
                RoundStatus::Playing => snap.round_stats.started += 1,
                RoundStatus::Success => snap.round_stats.won += 1,
                RoundStatus::Failed => snap.round_stats.lost += 1,
                RoundStatus::Idle => {}
            },
            TelemetryEvent::SessionTransition { .. } => snap.session_stats.transitions += 1,
            TelemetryEvent::RestartScheduled { delay_ms, .. } => {
                snap.session_stats.restarts += 1;
                snap.session_stats.total_restart_delay_ms += delay_ms;
            }
            TelemetryEvent::RecognitionFault { kind } => {
                snap.session_stats.faults += 1;
                if *kind == FaultKind::PermissionDenied {
                    snap.session_stats.permission_faults += 1;
                }
            }
            TelemetryEvent::PhraseFallback => snap.phrase_fallbacks += 1,
        }
    }

    if snap.statement_stats.processed > 0 {
        snap.statement_stats.match_rate =
            snap.statement_stats.matched as f64 / snap.statement_stats.processed as f64;
    }

    snap
}
