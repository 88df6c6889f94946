use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::ValidationError;

/// How much effort a recipe takes.
///
/// Only these three values exist. Anything else is rejected when parsing,
/// there is no fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Fast, low effort.
    Quickie,
    /// Ambitious, for special occasions.
    Gourmet,
    /// Hearty home cooking.
    #[serde(rename = "Comfort Food")]
    ComfortFood,
}

impl Difficulty {
    /// All difficulties, in display order.
    pub const ALL: [Self; 3] = [Self::Quickie, Self::Gourmet, Self::ComfortFood];

    /// The canonical label, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quickie => "Quickie",
            Self::Gourmet => "Gourmet",
            Self::ComfortFood => "Comfort Food",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    /// Parses the canonical label.
    ///
    /// Matching is exact, with surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownDifficulty(s.to_string()))
    }
}
