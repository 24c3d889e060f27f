//! Parse output.
//!
//! `MatchStore` is the ordered collection of sealed matches produced by
//! one pass of [`LogParser`](crate::parser::LogParser), together with the
//! parse-wide roster and killer set the ranking needs. It only grows
//! while the parser owns it; callers get read-only access.

use crate::entity::EntityName;
use crate::record::{MatchId, MatchRecord};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

/// Sealed matches in log order, keyed by `game-<n>`.
///
/// # Examples
///
/// ```rust
/// use fraglog::parse_lines;
///
/// let log = [
///     "  0:00 InitGame: \\sv_hostname\\Code Miner Server",
///     " 0:10 Kill: 1022 2 22: <world> killed Zeh by MOD_TRIGGER_HURT",
///     " 0:20 ShutdownGame:",
/// ];
/// let store = parse_lines(log).unwrap();
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.get("game-1").unwrap().total_kills, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStore {
    matches: Vec<MatchRecord>,
    roster: Vec<EntityName>,
    killers: HashSet<EntityName>,
}

impl MatchStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert<'a>(
        &mut self,
        record: MatchRecord,
        killers: impl IntoIterator<Item = &'a EntityName>,
    ) {
        self.killers.extend(killers.into_iter().cloned());
        self.matches.push(record);
    }

    pub(crate) fn set_roster(&mut self, roster: Vec<EntityName>) {
        self.roster = roster;
    }

    /// Look up a match by its `game-<n>` label.
    pub fn get(&self, label: &str) -> Option<&MatchRecord> {
        let number = label.strip_prefix("game-")?.parse().ok()?;
        self.get_by_id(MatchId::new(number))
    }

    /// Look up a match by number.
    pub fn get_by_id(&self, id: MatchId) -> Option<&MatchRecord> {
        // Ids are contiguous from 1, so the number doubles as an index.
        let index = usize::try_from(id.number()).ok()?.checked_sub(1)?;
        self.matches.get(index)
    }

    /// Sealed matches in log order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchRecord> + '_ {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Every player name seen in the log, deduplicated in first-seen order.
    ///
    /// Includes players whose user-info line came after the last sealed
    /// match.
    pub fn roster(&self) -> &[EntityName] {
        &self.roster
    }

    /// Whether `name` was credited with a player kill in any sealed match.
    pub fn is_killer(&self, name: &str) -> bool {
        self.killers.contains(name)
    }

    /// Roster names never credited with a player kill, in roster order.
    pub fn non_killers(&self) -> impl Iterator<Item = &EntityName> + '_ {
        self.roster.iter().filter(|name| !self.killers.contains(*name))
    }

    /// Sum of `total_kills` across all sealed matches.
    pub fn total_kills(&self) -> u64 {
        self.matches.iter().map(|record| record.total_kills).sum()
    }
}

impl<'a> IntoIterator for &'a MatchStore {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Serialized as `{"game-1": {...}, "game-2": {...}}` in match order.
impl Serialize for MatchStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.matches.len()))?;
        for record in &self.matches {
            map.serialize_entry(&record.label(), record)?;
        }
        map.end()
    }
}
