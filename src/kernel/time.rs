use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Logical frame counter, advanced once per `tick_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick {
    pub frame: u64,
}

/// Driver cadence. Timer resolution must stay at or below 100ms.
pub const TICK_MS: u64 = 100;

impl Tick {
    pub fn new() -> Self {
        Tick { frame: 0 }
    }

    pub fn next(&self) -> Self {
        Tick { frame: self.frame + 1 }
    }
}

impl Default for Tick {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock instant in milliseconds since the Unix epoch.
///
/// Every time-dependent decision in the kernel takes one of these as an
/// argument instead of reading the clock itself, so tests can drive time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub ms: u64,
}

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Timestamp { ms }
    }

    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp { ms }
    }

    /// Elapsed time since `earlier`. Saturates to zero if the clock went backwards.
    pub fn since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.ms.saturating_sub(earlier.ms))
    }

    pub fn after(&self, delay: Duration) -> Self {
        Timestamp { ms: self.ms.saturating_add(delay.as_millis() as u64) }
    }

    /// Index of the fixed-width window this instant falls in.
    pub fn bucket(&self, width_ms: u64) -> u64 {
        if width_ms == 0 {
            return self.ms;
        }
        self.ms / width_ms
    }
}
