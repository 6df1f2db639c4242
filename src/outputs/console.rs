use crate::kernel::effect::SideEffect;
use crate::kernel::round::RoundOutcome;

/// PURE FUNCTION: the line to print for an effect, if it is player-facing.
pub fn render(effect: &SideEffect) -> Option<String> {
    match effect {
        SideEffect::Log(_) | SideEffect::RequestPhrase(_) => None,
        SideEffect::TranscriptUpdated(text) => Some(format!("  ... {}", text)),
        SideEffect::StatementSpoken { text, is_match } => {
            let mark = if *is_match { "+1" } else { "  " };
            Some(format!("[{}] \"{}\"", mark, text))
        }
        SideEffect::TimerUpdated { seconds_left } => {
            if *seconds_left % 10 == 0 || *seconds_left <= 5 {
                Some(format!("  {}s left", seconds_left))
            } else {
                None
            }
        }
        SideEffect::RoundFinished(RoundOutcome::Won { score, .. }) => {
            Some(format!("*** You did it! {} clean repetitions. /retry or /next", score))
        }
        SideEffect::RoundFinished(RoundOutcome::Lost { score, .. }) => {
            Some(format!("*** Time's up with {} points. /retry or /next", score))
        }
        SideEffect::PhraseChanged(twister) => Some(format!(
            "Say it fast: \"{}\"  ({}, {}). Type /start",
            twister.text, twister.difficulty, twister.theme
        )),
        SideEffect::RecognitionFault(err) => Some(format!("!! {} (type /start to retry)", err)),
    }
}
