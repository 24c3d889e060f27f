//! Error types for log parsing.
//!
//! All errors that can stop a parse pass are represented by the
//! `ParseError` enum. Malformed lines only become errors under
//! [`MalformedPolicy::Strict`](crate::config::MalformedPolicy::Strict).

use thiserror::Error;

/// The piece of a recognized event line that failed to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    /// The victim token after `killed` on a `<world>` kill line.
    WorldVictim,
    /// The killer token before ` killed` on a player kill line.
    Killer,
    /// The means-of-death label after `by`.
    DeathCause,
    /// The `n\...\t` name on a user-info line.
    PlayerName,
}

impl std::fmt::Display for LineField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LineField::WorldVictim => "world-kill victim",
            LineField::Killer => "killer",
            LineField::DeathCause => "death cause",
            LineField::PlayerName => "player name",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while parsing a log.
///
/// # Examples
///
/// ```rust
/// use fraglog::error::{LineField, ParseError};
///
/// let err = ParseError::MalformedLine {
///     line: 12,
///     field: LineField::Killer,
///     text: "Kill: 1 2 3:".to_string(),
/// };
/// assert_eq!(err.to_string(), "Line 12: could not extract killer from \"Kill: 1 2 3:\"");
/// ```
#[derive(Debug, Error)]
pub enum ParseError {
    /// The line source failed. Fatal for the whole pass.
    #[error("Failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A recognized event line did not match its sub-pattern.
    ///
    /// Only produced when the parser runs with the strict policy.
    #[error("Line {line}: could not extract {field} from {text:?}")]
    MalformedLine {
        line: usize,
        field: LineField,
        text: String,
    },

    /// An end marker arrived after `u32::MAX` matches were already sealed.
    #[error("Line {line}: no match number left to seal another match")]
    TooManyMatches { line: usize },

    /// The marker configuration could not be loaded or is unusable.
    #[error("Invalid log markers: {0}")]
    InvalidMarkers(String),
}
