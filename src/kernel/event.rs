use serde::{Deserialize, Serialize};

use super::time::Timestamp;
use crate::services::phrase::{Difficulty, Twister};

/// Everything that can enter the kernel. The driver drains these from one
/// channel and hands them to `Reactor::tick_step` in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Signals from the external speech engine.
    Speech(SpeechEvent),
    /// Player-initiated controls.
    Command(RoundCommand),
    /// A phrase requested through `SideEffect::RequestPhrase` is available.
    PhraseReady(Twister),
}

/// Lifecycle and result signals of a continuous streaming recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SpeechEvent {
    Started,
    Ended,
    Result(ResultBatch),
    /// Raw engine error code, e.g. `not-allowed` or `no-speech`.
    Error(String),
}

/// One result callback. `results` is the engine's full result list;
/// only entries from `result_index` onwards changed in this batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBatch {
    pub result_index: usize,
    pub results: Vec<RecognitionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub alternatives: Vec<Alternative>,
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub transcript: String,
    #[serde(default)]
    pub confidence: f32,
}

impl RecognitionResult {
    /// Single-alternative result, the shape most engines deliver.
    pub fn single(transcript: &str, is_final: bool) -> Self {
        Self {
            alternatives: vec![Alternative {
                transcript: transcript.to_string(),
                confidence: 1.0,
            }],
            is_final,
        }
    }

    /// Best alternative's transcript, if any.
    pub fn transcript(&self) -> Option<&str> {
        self.alternatives.first().map(|a| a.transcript.as_str())
    }
}

impl ResultBatch {
    pub fn single(transcript: &str, is_final: bool) -> Self {
        Self {
            result_index: 0,
            results: vec![RecognitionResult::single(transcript, is_final)],
        }
    }
}

/// One chunk of recognized text, ephemeral.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub raw_text: String,
    pub is_final: bool,
    pub arrival: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoundCommand {
    /// Idle -> Playing with the current phrase.
    Start,
    /// Finished round back to Idle, same phrase.
    RetrySame,
    /// Back to Idle and fetch a fresh phrase.
    NextPhrase(Difficulty),
    /// Abandon whatever is running and go Idle.
    Stop,
}
