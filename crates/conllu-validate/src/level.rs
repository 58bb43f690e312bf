//! Definition of conformance levels.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A conformance level.
///
/// Each level assumes the invariants of the lower levels hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
#[repr(u8)]
pub enum Level {
    /// The CoNLL-U backbone: lines, columns and identifiers.
    One = 1,
    /// The UD format: metadata, references and tree structure.
    Two = 2,
    /// UD contents checked with language-neutral rules.
    Three = 3,
    /// Language-specific labels.
    Four = 4,
    /// Language-specific contents.
    Five = 5,
}

impl Level {
    /// The lowest level.
    pub const MIN: Self = Self::One;

    /// The highest level.
    pub const MAX: Self = Self::Five;

    /// Gets the level for a number, clamping it to the range of levels.
    pub fn clamped(value: i64) -> Self {
        match value {
            i64::MIN..=1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            _ => Self::Five,
        }
    }

    /// Gets the number of the level.
    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<i64> for Level {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        i64::from(level.number())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
