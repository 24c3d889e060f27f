//! Line classification.
//!
//! Recognizers test a single line for an event marker; extractors pull
//! an entity out of a recognized line. Nothing here holds state between
//! lines, and no extractor panics: a line that does not fit its pattern
//! yields `None`.

use crate::config::LogMarkers;
use regex::Regex;
use std::sync::LazyLock;

static WORLD_VICTIM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"killed\s*([0-9A-Za-z_]+)").expect("world victim regex is valid"));

static KILLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([^ ]+) killed").expect("killer regex is valid"));

static DEATH_CAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"by\s*([0-9A-Za-z_]+)").expect("death cause regex is valid"));

static PLAYER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"n\\(.*?)\\t").expect("player name regex is valid"));

fn first_capture<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Token following `killed` on a world kill line.
///
/// Only the first word-character run is taken, so a victim named
/// `Dono da Bola` is recorded as `Dono`.
///
/// ```rust
/// use fraglog::classify::extract_world_killer;
///
/// let line = " 0:27 Kill: 1022 3 19: <world> killed Dono da Bola by MOD_FALLING";
/// assert_eq!(extract_world_killer(line), Some("Dono"));
/// ```
pub fn extract_world_killer(line: &str) -> Option<&str> {
    first_capture(&WORLD_VICTIM, line)
}

/// Space-delimited token immediately before ` killed`.
///
/// ```rust
/// use fraglog::classify::extract_killer;
///
/// let line = " 2:04 Kill: 3 2 7: Isgalamido killed Mocinha by MOD_ROCKET_SPLASH";
/// assert_eq!(extract_killer(line), Some("Isgalamido"));
/// assert_eq!(extract_killer(" 2:04 Kill: 3 2 7:"), None);
/// ```
pub fn extract_killer(line: &str) -> Option<&str> {
    first_capture(&KILLER, line)
}

/// Means-of-death label following the first `by`.
pub fn extract_death_cause(line: &str) -> Option<&str> {
    first_capture(&DEATH_CAUSE, line)
}

/// Name between `n\` and the next `\t` on a user-info line.
///
/// ```rust
/// use fraglog::classify::extract_player_name;
///
/// let line = r" 0:25 ClientUserinfoChanged: 2 n\Dono da Bola\t\0\model\sarge";
/// assert_eq!(extract_player_name(line), Some("Dono da Bola"));
/// ```
pub fn extract_player_name(line: &str) -> Option<&str> {
    first_capture(&PLAYER_NAME, line)
}

/// Who gets credit for a kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution<'a> {
    /// The environment killed this token.
    World(&'a str),
    /// This player token made the kill.
    Player(&'a str),
}

/// The structured parts of a kill line. Either part may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillEvent<'a> {
    pub world: bool,
    pub attribution: Option<Attribution<'a>>,
    pub cause: Option<&'a str>,
}

/// Marker-based recognizers for one log format.
///
/// # Examples
///
/// ```rust
/// use fraglog::LineClassifier;
///
/// let classifier = LineClassifier::default();
/// assert!(classifier.is_match_start(r"  0:00 InitGame: \sv_floodProtect\1"));
/// assert!(classifier.is_ignored(" 20:37 ClientBegin: 2"));
/// assert!(classifier.is_match_end(" 20:37 ShutdownGame:"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    markers: LogMarkers,
}

impl LineClassifier {
    pub fn new(markers: LogMarkers) -> Self {
        Self { markers }
    }

    /// True if the line contains any ignore word.
    pub fn is_ignored(&self, line: &str) -> bool {
        self.markers.ignore.iter().any(|word| line.contains(word.as_str()))
    }

    pub fn is_match_start(&self, line: &str) -> bool {
        line.contains(self.markers.match_start.as_str())
    }

    pub fn is_kill_event(&self, line: &str) -> bool {
        line.contains(self.markers.kill.as_str())
    }

    /// True if the environment is the killer on this line.
    pub fn is_world_actor(&self, line: &str) -> bool {
        line.contains(self.markers.world.as_str())
    }

    pub fn is_user_info_event(&self, line: &str) -> bool {
        line.contains(self.markers.user_info.as_str())
    }

    pub fn is_match_end(&self, line: &str) -> bool {
        line.contains(self.markers.match_end.as_str())
    }

    /// Split a kill line into its attribution and cause.
    ///
    /// The caller is expected to have checked [`is_kill_event`](Self::is_kill_event).
    ///
    /// ```rust
    /// use fraglog::LineClassifier;
    /// use fraglog::classify::Attribution;
    ///
    /// let classifier = LineClassifier::default();
    /// let event = classifier.classify_kill(" 1:08 Kill: 3 2 6: Isgalamido killed Mocinha by MOD_ROCKET");
    /// assert_eq!(event.attribution, Some(Attribution::Player("Isgalamido")));
    /// assert_eq!(event.cause, Some("MOD_ROCKET"));
    /// ```
    pub fn classify_kill<'a>(&self, line: &'a str) -> KillEvent<'a> {
        let world = self.is_world_actor(line);
        let attribution = if world {
            extract_world_killer(line).map(Attribution::World)
        } else {
            extract_killer(line).map(Attribution::Player)
        };
        KillEvent {
            world,
            attribution,
            cause: extract_death_cause(line),
        }
    }
}
