use crate::kernel::recognition::RecognitionError;
use crate::kernel::round::RoundOutcome;
use crate::services::phrase::{Difficulty, Twister};

/// Work the kernel asks the driver to perform. The kernel never does I/O itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    Log(String),
    /// Interim recognition text for display.
    TranscriptUpdated(String),
    /// A finalized, non-duplicate statement and whether it counted.
    StatementSpoken { text: String, is_match: bool },
    /// Whole seconds left changed while playing.
    TimerUpdated { seconds_left: u64 },
    RoundFinished(RoundOutcome),
    PhraseChanged(Twister),
    /// User-visible recognizer problem; needs a manual retry.
    RecognitionFault(RecognitionError),
    /// Fetch a phrase and send it back as `Event::PhraseReady`.
    RequestPhrase(Difficulty),
}
