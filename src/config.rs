//! Parser configuration.
//!
//! `LogMarkers` holds the literal substrings that identify each event
//! kind. The defaults match a Quake III Arena `games.log`; other mods
//! that reuse the same line layout can override individual markers from
//! JSON. `ParseOptions` adds the policy for lines that are recognized but
//! fail to extract.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// Literal event markers searched for in each line.
///
/// Every check is a plain substring test, in this priority order:
/// ignore words, match start, kill, user info, match end.
///
/// # Examples
///
/// ```rust
/// use fraglog::LogMarkers;
///
/// let markers = LogMarkers::from_json(r#"{ "match_end": "GameOver" }"#).unwrap();
/// assert_eq!(markers.match_end, "GameOver");
/// assert_eq!(markers.match_start, "InitGame");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogMarkers {
    /// A line containing any of these is skipped entirely.
    pub ignore: Vec<String>,
    pub match_start: String,
    pub match_end: String,
    pub kill: String,
    /// Killer token that marks an environmental kill.
    pub world: String,
    pub user_info: String,
}

impl Default for LogMarkers {
    fn default() -> Self {
        Self {
            ignore: ["Exit", "ClientConnect", "ClientBegin", "ClientDisconnect", "Item"]
                .into_iter()
                .map(String::from)
                .collect(),
            match_start: "InitGame".to_string(),
            match_end: "ShutdownGame".to_string(),
            kill: "Kill".to_string(),
            world: "<world>".to_string(),
            user_info: "ClientUserinfoChanged".to_string(),
        }
    }
}

impl LogMarkers {
    /// Load markers from a JSON object. Missing fields keep their defaults.
    ///
    /// The result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let markers: LogMarkers =
            serde_json::from_str(json).map_err(|e| ParseError::InvalidMarkers(e.to_string()))?;
        markers.validate()?;
        Ok(markers)
    }

    /// Reject empty markers, which would match every line.
    pub fn validate(&self) -> Result<(), ParseError> {
        let named = [
            ("match_start", &self.match_start),
            ("match_end", &self.match_end),
            ("kill", &self.kill),
            ("world", &self.world),
            ("user_info", &self.user_info),
        ];
        for (name, marker) in named {
            if marker.is_empty() {
                return Err(ParseError::InvalidMarkers(format!("{} marker is empty", name)));
            }
        }
        if self.ignore.iter().any(String::is_empty) {
            return Err(ParseError::InvalidMarkers(
                "ignore list contains an empty word".to_string(),
            ));
        }
        Ok(())
    }
}

/// What to do when a recognized event line fails to extract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Drop the part that failed, keep what already counted, log a warning.
    ///
    /// A kill line whose cause is missing still increments `total_kills`,
    /// so that match's cause tally will sum to less than its kill count.
    #[default]
    Skip,
    /// Stop the pass with [`ParseError::MalformedLine`].
    Strict,
}

/// Options for a parse pass.
///
/// # Examples
///
/// ```rust
/// use fraglog::{MalformedPolicy, ParseOptions};
///
/// let options = ParseOptions::default().with_policy(MalformedPolicy::Strict);
/// assert_eq!(options.malformed, MalformedPolicy::Strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub markers: LogMarkers,
    pub malformed: MalformedPolicy,
}

impl ParseOptions {
    /// Replace the event markers.
    pub fn with_markers(mut self, markers: LogMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Replace the malformed-line policy.
    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }
}
