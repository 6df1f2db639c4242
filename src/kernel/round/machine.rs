use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use super::state::{RoundDelta, RoundId, RoundState, RoundStatus, SpokenStatement};
use crate::config::STATEMENT_DISPLAY_LIMIT;
use crate::kernel::time::Timestamp;

/// Terminal result of a round, reported once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won { round_id: RoundId, score: u32 },
    Lost { round_id: RoundId, score: u32 },
}

/// Decides round transitions and applies them as `RoundDelta`s.
///
/// Idle -> Playing -> {Success | Failed} -> Idle.
#[derive(Debug)]
pub struct RoundMachine {
    state: RoundState,
    target_score: u32,
    duration: Duration,
}

impl RoundMachine {
    pub fn new(target_score: u32, duration: Duration) -> Self {
        Self {
            state: RoundState::new(duration),
            target_score,
            duration,
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn time_left(&self) -> Duration {
        self.state.time_left
    }

    pub fn statements(&self) -> &[SpokenStatement] {
        &self.state.statements
    }

    /// Most recent statements for display, oldest first.
    pub fn recent_statements(&self) -> &[SpokenStatement] {
        let all = &self.state.statements;
        &all[all.len().saturating_sub(STATEMENT_DISPLAY_LIMIT)..]
    }

    /// Idle -> Playing. Returns the new round id, or None if not Idle.
    pub fn start(&mut self, now: Timestamp) -> Option<RoundId> {
        if self.state.status != RoundStatus::Idle {
            return None;
        }

        let id = Uuid::new_v4();
        self.state.reduce(RoundDelta::Started {
            id,
            at: now,
            duration: self.duration,
        });
        info!("Round {} started: {} points in {:?}", id, self.target_score, self.duration);
        Some(id)
    }

    /// Logs a statement and scores it. Ignored outside Playing.
    pub fn record_statement(&mut self, text: &str, is_match: bool, now: Timestamp) -> Option<RoundOutcome> {
        if self.state.status != RoundStatus::Playing {
            return None;
        }

        self.state.reduce(RoundDelta::Statement(SpokenStatement {
            text: text.to_string(),
            timestamp: now,
            is_match,
        }));

        if !is_match {
            return None;
        }

        self.state.reduce(RoundDelta::Scored);

        if self.state.score >= self.target_score && !self.state.success_fired {
            self.state.reduce(RoundDelta::Finished(RoundStatus::Success));
            info!("Round won with {} points", self.state.score);
            return self.state.round_id.map(|round_id| RoundOutcome::Won {
                round_id,
                score: self.state.score,
            });
        }

        None
    }

    /// Recomputes the countdown from wall-clock elapsed time.
    pub fn tick(&mut self, now: Timestamp) -> Option<RoundOutcome> {
        if self.state.status != RoundStatus::Playing {
            return None;
        }
        let started = self.state.started_at?;

        let left = self.duration.saturating_sub(now.since(started));
        self.state.reduce(RoundDelta::TimeLeft(left));

        if left.is_zero() && !self.state.success_fired {
            self.state.reduce(RoundDelta::Finished(RoundStatus::Failed));
            info!("Round lost on time with {} points", self.state.score);
            return self.state.round_id.map(|round_id| RoundOutcome::Lost {
                round_id,
                score: self.state.score,
            });
        }

        None
    }

    /// Any state -> Idle, clearing score, timer and statement log.
    pub fn reset(&mut self) -> bool {
        if self.state.status == RoundStatus::Idle {
            return false;
        }
        self.state.reduce(RoundDelta::Reset { duration: self.duration });
        true
    }
}
