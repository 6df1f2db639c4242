use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const FALLBACK_TEXT: &str = "Six slippery snails slid slowly seaward.";
const FALLBACK_THEME: &str = "Nature";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

impl Difficulty {
    /// Guidance handed to the generator for this level.
    pub fn prompt_hint(&self) -> &'static str {
        match self {
            Difficulty::Easy => "short (5-7 words), simple alliteration, common words",
            Difficulty::Medium => "medium length (7-10 words), repeated consonant clusters",
            Difficulty::Hard => "long (10-15 words), rapid alternation of similar sounds",
        }
    }
}

/// A phrase to play, as delivered by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Twister {
    pub text: String,
    pub difficulty: Difficulty,
    pub theme: String,
}

impl Twister {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            difficulty: Difficulty::Medium,
            theme: FALLBACK_THEME.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}
