//! Tongue-twister generation. The game never fails for lack of a phrase:
//! every error path degrades to `Twister::fallback()`.

pub mod client;
pub mod types;

pub use client::{PhraseError, PhraseService};
pub use types::{Difficulty, Twister};
