use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::kernel::time::Timestamp;

pub type RoundId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    Idle,
    Playing,
    Success,
    Failed,
}

impl Default for RoundStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// One finalized statement the player made during a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenStatement {
    pub text: String,
    pub timestamp: Timestamp,
    pub is_match: bool,
}

/// Strict state delta. This is the ONLY way round state mutates.
#[derive(Debug, Clone)]
pub enum RoundDelta {
    Started { id: RoundId, at: Timestamp, duration: Duration },
    Statement(SpokenStatement),
    Scored,
    TimeLeft(Duration),
    Finished(RoundStatus),
    Reset { duration: Duration },
}

#[derive(Debug, Clone)]
pub struct RoundState {
    pub status: RoundStatus,
    pub score: u32,
    pub time_left: Duration,
    pub round_id: Option<RoundId>,
    pub started_at: Option<Timestamp>,
    /// Set when Success fires; cleared on every entry to Playing.
    pub success_fired: bool,
    /// Full log for the round. Display code reads a suffix of it.
    pub statements: Vec<SpokenStatement>,
    /// Monotonic mutation counter.
    pub version: u64,
}

impl RoundState {
    pub fn new(duration: Duration) -> Self {
        Self {
            status: RoundStatus::Idle,
            score: 0,
            time_left: duration,
            round_id: None,
            started_at: None,
            success_fired: false,
            statements: Vec::new(),
            version: 0,
        }
    }

    /// Whole seconds remaining, rounded up for display.
    pub fn seconds_left(&self) -> u64 {
        let ms = self.time_left.as_millis() as u64;
        (ms + 999) / 1000
    }

    /// Pure reduction: State + Delta -> Mutated State
    pub fn reduce(&mut self, delta: RoundDelta) {
        self.version += 1;

        match delta {
            RoundDelta::Started { id, at, duration } => {
                self.status = RoundStatus::Playing;
                self.score = 0;
                self.time_left = duration;
                self.round_id = Some(id);
                self.started_at = Some(at);
                self.success_fired = false;
                self.statements.clear();
            }
            RoundDelta::Statement(statement) => {
                self.statements.push(statement);
            }
            RoundDelta::Scored => {
                // Score is frozen outside Playing.
                if self.status == RoundStatus::Playing {
                    self.score += 1;
                }
            }
            RoundDelta::TimeLeft(left) => {
                self.time_left = left;
            }
            RoundDelta::Finished(status) => {
                if status == RoundStatus::Success {
                    self.success_fired = true;
                }
                self.status = status;
            }
            RoundDelta::Reset { duration } => {
                self.status = RoundStatus::Idle;
                self.score = 0;
                self.time_left = duration;
                self.started_at = None;
                self.success_fired = false;
                self.statements.clear();
            }
        }
    }
}
