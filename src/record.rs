//! Sealed match results.
//!
//! Contains `MatchId` and `MatchRecord`, the immutable output of one
//! match window. Records are only built by
//! [`MatchAccumulator::seal`](crate::accumulator::MatchAccumulator::seal).

use crate::entity::EntityName;
use crate::tally::Tally;
use serde::Serialize;

/// Sequential match number, starting at 1.
///
/// Displays as the `game-<n>` label used as the key in parse output.
///
/// ```rust
/// use fraglog::MatchId;
///
/// assert_eq!(MatchId::FIRST.label(), "game-1");
/// assert_eq!(MatchId::FIRST.next().unwrap().to_string(), "game-2");
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchId(u32);

impl MatchId {
    pub const FIRST: MatchId = MatchId(1);

    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// The following id, or `None` once `u32::MAX` is reached.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game-{}", self.0)
    }
}

/// Statistics for one finished match.
///
/// Serializes to the shape consumed by reporting tools:
///
/// ```json
/// {
///   "total_kills": 15,
///   "players": ["Isgalamido", "Dono da Bola", "Mocinha", "Zeh"],
///   "kills": { "Isgalamido": -8, "Zeh": -2, "Dono": -1 },
///   "kills_by_means": { "MOD_TRIGGER_HURT": 9, "MOD_ROCKET_SPLASH": 3 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    #[serde(skip)]
    pub id: MatchId,

    /// Every kill line in the match, world kills included.
    pub total_kills: u64,

    /// Deduplicated roster in first-seen order.
    ///
    /// The roster is never reset between matches, so this lists every
    /// player seen in the log up to this match's end marker.
    pub players: Vec<EntityName>,

    /// Net score per entity: player-attributed kills minus world kills
    /// suffered under the same name.
    pub kills: Tally<EntityName>,

    /// Occurrences of each means-of-death label.
    pub kills_by_means: Tally<String>,
}

impl MatchRecord {
    pub fn label(&self) -> String {
        self.id.label()
    }

    /// Whether the cause tally accounts for every kill.
    ///
    /// Always true for well-formed logs; a kill line with no `by <cause>`
    /// parsed under the skip policy makes it false.
    pub fn is_consistent(&self) -> bool {
        u64::try_from(self.kills_by_means.total()).map_or(false, |sum| sum == self.total_kills)
    }
}
