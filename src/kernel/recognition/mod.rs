//! Lifecycle of the external streaming recognizer and translation of its
//! raw result batches into interim transcripts and final utterances.

pub mod error;
pub mod session;
pub mod source;

pub use error::{EngineError, RecognitionError};
pub use session::{RecognitionSession, SessionGraph, SessionOutput, SessionSignal, SessionState};
pub use source::SpeechSource;
