use serde::{Deserialize, Serialize};

use crate::kernel::recognition::SessionState;
use crate::kernel::round::RoundStatus;
use crate::kernel::time::Tick;

// Allowed: IDs, Timestamps, Durations, Counts, Enums
// Forbidden: transcripts, target phrases

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    RoundTransition {
        from: RoundStatus,
        to: RoundStatus,
        tick: Tick,
    },

    SessionTransition {
        from: SessionState,
        to: SessionState,
        tick: Tick,
    },

    StatementProcessed {
        matched: bool,
    },

    DuplicateSuppressed,

    RestartScheduled {
        attempt: u32,
        delay_ms: u64,
    },

    RecognitionFault {
        kind: FaultKind,
    },

    PhraseFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultKind {
    PermissionDenied,
    NoMicrophone,
    Network,
    RestartLimit,
    StartFailed,
    Other,
}

impl From<&crate::kernel::recognition::RecognitionError> for FaultKind {
    fn from(err: &crate::kernel::recognition::RecognitionError) -> Self {
        use crate::kernel::recognition::RecognitionError::*;
        match err {
            PermissionDenied => FaultKind::PermissionDenied,
            NoMicrophone => FaultKind::NoMicrophone,
            NetworkError => FaultKind::Network,
            RestartLimit { .. } => FaultKind::RestartLimit,
            StartFailed(_) => FaultKind::StartFailed, // Message STRIPPED
            NoSpeechTimeout | Aborted | Unknown(_) => FaultKind::Other,
        }
    }
}
