use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures returned synchronously by `SpeechSource::start`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("recognizer already started")]
    AlreadyStarted,
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the recognition session.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RecognitionError {
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("no microphone available")]
    NoMicrophone,
    #[error("network error in speech service")]
    NetworkError,
    #[error("no speech detected")]
    NoSpeechTimeout,
    #[error("recognition aborted")]
    Aborted,
    #[error("unknown recognition error: {0}")]
    Unknown(String),
    #[error("recognizer failed to stay up after {attempts} restarts")]
    RestartLimit { attempts: u32 },
    #[error("recognizer could not start: {0}")]
    StartFailed(String),
}

impl RecognitionError {
    /// Maps an engine error code onto the taxonomy. Unrecognised codes are kept verbatim.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "not-allowed" | "service-not-allowed" => RecognitionError::PermissionDenied,
            "audio-capture" => RecognitionError::NoMicrophone,
            "network" => RecognitionError::NetworkError,
            "no-speech" => RecognitionError::NoSpeechTimeout,
            "aborted" => RecognitionError::Aborted,
            other => RecognitionError::Unknown(other.to_string()),
        }
    }

    /// Ends the session until the player explicitly starts again.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RecognitionError::PermissionDenied
                | RecognitionError::NoMicrophone
                | RecognitionError::RestartLimit { .. }
                | RecognitionError::StartFailed(_)
        )
    }

    /// Shown to the player with a manual retry action.
    pub fn is_user_visible(&self) -> bool {
        self.is_fatal() || matches!(self, RecognitionError::NetworkError)
    }

    /// Expected noise during normal operation. Logged, never shown.
    pub fn is_benign(&self) -> bool {
        !self.is_user_visible()
    }
}

impl From<EngineError> for RecognitionError {
    fn from(err: EngineError) -> Self {
        RecognitionError::StartFailed(err.to_string())
    }
}
