//! Score, countdown and outcome of one round.

pub mod machine;
pub mod state;

pub use machine::{RoundMachine, RoundOutcome};
pub use state::{RoundDelta, RoundId, RoundState, RoundStatus, SpokenStatement};
