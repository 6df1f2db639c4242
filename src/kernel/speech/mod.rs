//! Text side of the game: canonical form, fuzzy phrase matching and
//! duplicate suppression for finalized utterances.

pub mod dedup;
pub mod matcher;
pub mod normalize;

pub use dedup::{DedupKey, Deduplicator};
pub use matcher::{is_match, PhraseMatcher, StatementVerdict};
pub use normalize::normalize;
