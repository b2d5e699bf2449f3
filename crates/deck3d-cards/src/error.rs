use thiserror::Error;

use crate::card::CardId;

/// Rejected pile transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PileError {
    /// Only cards resting in the main pile react to clicks.
    #[error("card {0} is not in the main pile")]
    NotInMain(CardId),
}

/// Failure to parse a `#rrggbb` / `#rgb` color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorParseError {
    pub input: String,
    pub reason: &'static str,
}

/// Failure to parse a rank label such as `"Q"` or `"10"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rank label `{0}`")]
pub struct RankParseError(pub String);
