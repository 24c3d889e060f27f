//! Per-match accumulation.
//!
//! A `MatchAccumulator` is fed one line at a time and keeps the running
//! counts for the match currently open. Sealing produces an immutable
//! [`MatchRecord`]; resetting prepares for the next match.

use crate::classify::{extract_player_name, Attribution, LineClassifier};
use crate::config::{MalformedPolicy, ParseOptions};
use crate::entity::EntityName;
use crate::error::{LineField, ParseError};
use crate::record::{MatchId, MatchRecord};
use crate::tally::Tally;
use std::collections::HashSet;

/// Mutable state of the match being read.
///
/// Kill credit is kept in two provisional tallies until sealing:
/// player-attributed kills keyed by killer token, and world kills keyed
/// by victim token. The observed-player list is the only state that
/// survives [`reset`](Self::reset), so rosters grow across the whole log.
///
/// # Examples
///
/// ```rust
/// use fraglog::{MatchAccumulator, MatchId, ParseOptions};
///
/// let mut acc = MatchAccumulator::new(ParseOptions::default());
/// acc.observe(1, r" 0:01 ClientUserinfoChanged: 2 n\Zeh\t\0").unwrap();
/// acc.observe(2, " 0:30 Kill: 1022 2 22: <world> killed Zeh by MOD_TRIGGER_HURT").unwrap();
///
/// let record = acc.seal(MatchId::FIRST);
/// assert_eq!(record.total_kills, 1);
/// assert_eq!(record.kills.get("Zeh"), -1);
/// ```
#[derive(Debug, Clone)]
pub struct MatchAccumulator {
    classifier: LineClassifier,
    policy: MalformedPolicy,
    total_kills: u64,
    player_tally: Tally<EntityName>,
    world_tally: Tally<EntityName>,
    cause_tally: Tally<String>,
    observed: Vec<EntityName>,
}

impl MatchAccumulator {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            classifier: LineClassifier::new(options.markers),
            policy: options.malformed,
            total_kills: 0,
            player_tally: Tally::new(),
            world_tally: Tally::new(),
            cause_tally: Tally::new(),
            observed: Vec::new(),
        }
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Feed one line into the open match.
    ///
    /// Ignored lines are a no-op. A kill line always increments the kill
    /// count before its attribution and cause are extracted; a user-info
    /// line appends the player name to the roster.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedLine`] when an extraction fails and
    /// the policy is [`MalformedPolicy::Strict`]. Under the skip policy the
    /// failed part is dropped and a warning is logged.
    pub fn observe(&mut self, line_number: usize, line: &str) -> Result<(), ParseError> {
        if self.classifier.is_ignored(line) {
            return Ok(());
        }

        if self.classifier.is_kill_event(line) {
            self.total_kills += 1;
            let event = self.classifier.classify_kill(line);

            match event.attribution {
                Some(Attribution::World(victim)) => {
                    self.world_tally.increment(victim.into());
                }
                Some(Attribution::Player(killer)) => {
                    self.player_tally.increment(killer.into());
                }
                None => {
                    let field = if event.world {
                        LineField::WorldVictim
                    } else {
                        LineField::Killer
                    };
                    self.malformed(line_number, line, field)?;
                }
            }

            match event.cause {
                Some(cause) => {
                    self.cause_tally.increment(cause.to_string());
                }
                None => self.malformed(line_number, line, LineField::DeathCause)?,
            }
        }

        if self.classifier.is_user_info_event(line) {
            match extract_player_name(line) {
                Some(name) => self.observed.push(name.into()),
                None => self.malformed(line_number, line, LineField::PlayerName)?,
            }
        }

        Ok(())
    }

    fn malformed(&self, line_number: usize, line: &str, field: LineField) -> Result<(), ParseError> {
        match self.policy {
            MalformedPolicy::Skip => {
                log::warn!("line {}: skipping unparsable {} in {:?}", line_number, field, line);
                Ok(())
            }
            MalformedPolicy::Strict => Err(ParseError::MalformedLine {
                line: line_number,
                field,
                text: line.to_string(),
            }),
        }
    }

    /// Build the record for the open match without clearing any state.
    ///
    /// Net kills are computed in two explicit steps over the provisional
    /// tallies:
    ///
    /// 1. every world-kill victim is set to 0 in a copy of the player
    ///    tally, appended if it was not a killer. Frags credited to a name
    ///    that the world also killed in this match are discarded here;
    /// 2. each world-kill count is subtracted from its entry.
    pub fn seal(&self, id: MatchId) -> MatchRecord {
        let mut kills = self.player_tally.clone();
        for victim in self.world_tally.keys() {
            kills.set(victim.clone(), 0);
        }
        for (victim, world_kills) in self.world_tally.iter() {
            kills.add(victim.clone(), -world_kills);
        }

        MatchRecord {
            id,
            total_kills: self.total_kills,
            players: self.roster(),
            kills,
            kills_by_means: self.cause_tally.clone(),
        }
    }

    /// Clear the per-match counts. The observed roster is kept.
    pub fn reset(&mut self) {
        self.total_kills = 0;
        self.player_tally.clear();
        self.world_tally.clear();
        self.cause_tally.clear();
    }

    /// Every player name seen so far, deduplicated in first-seen order.
    pub fn roster(&self) -> Vec<EntityName> {
        let mut seen = HashSet::new();
        self.observed
            .iter()
            .filter(|name| seen.insert(*name))
            .cloned()
            .collect()
    }

    /// Killer tokens credited in the open match.
    pub fn killers(&self) -> impl Iterator<Item = &EntityName> + '_ {
        self.player_tally.keys()
    }

    pub fn total_kills(&self) -> u64 {
        self.total_kills
    }
}

impl Default for MatchAccumulator {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(acc: &mut MatchAccumulator, lines: &[&str]) {
        for (i, line) in lines.iter().enumerate() {
            acc.observe(i + 1, line).unwrap();
        }
    }

    #[test]
    fn test_world_kill_subtracts_from_victim() {
        let mut acc = MatchAccumulator::default();
        feed(
            &mut acc,
            &[
                " 0:10 Kill: 1022 2 22: <world> killed Zeh by MOD_TRIGGER_HURT",
                " 0:20 Kill: 1022 2 22: <world> killed Zeh by MOD_FALLING",
            ],
        );
        let record = acc.seal(MatchId::FIRST);
        assert_eq!(record.total_kills, 2);
        assert_eq!(record.kills.get("Zeh"), -2);
        assert_eq!(record.kills_by_means.get("MOD_FALLING"), 1);
    }

    #[test]
    fn test_player_kills_without_world_deaths() {
        let mut acc = MatchAccumulator::default();
        feed(
            &mut acc,
            &[
                " 0:10 Kill: 3 2 7: Zeh killed Mocinha by MOD_ROCKET_SPLASH",
                " 0:20 Kill: 3 2 7: Zeh killed Mocinha by MOD_ROCKET",
                " 0:30 Kill: 2 3 7: Mocinha killed Zeh by MOD_ROCKET",
            ],
        );
        let record = acc.seal(MatchId::FIRST);
        let pairs: Vec<_> = record.kills.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(pairs, vec![("Zeh", 2), ("Mocinha", 1)]);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_world_victim_discards_player_frags() {
        let mut acc = MatchAccumulator::default();
        feed(
            &mut acc,
            &[
                " 0:10 Kill: 3 2 7: Zeh killed Mocinha by MOD_ROCKET",
                " 0:20 Kill: 3 2 7: Zeh killed Mocinha by MOD_ROCKET",
                " 0:30 Kill: 3 2 7: Mocinha killed Isgalamido by MOD_SHOTGUN",
                " 0:40 Kill: 1022 3 22: <world> killed Zeh by MOD_FALLING",
            ],
        );
        let record = acc.seal(MatchId::FIRST);
        assert_eq!(record.kills.get("Zeh"), -1);
        assert_eq!(record.kills.get("Mocinha"), 1);
    }

    #[test]
    fn test_ignored_kill_line_is_not_counted() {
        let mut acc = MatchAccumulator::default();
        feed(&mut acc, &[" 0:10 Item: Kill: 3 2 7: Zeh killed Mocinha by MOD_ROCKET"]);
        assert_eq!(acc.total_kills(), 0);
        assert!(acc.seal(MatchId::FIRST).kills.is_empty());
    }

    #[test]
    fn test_roster_deduplicates_in_first_seen_order() {
        let mut acc = MatchAccumulator::default();
        feed(
            &mut acc,
            &[
                r" 0:01 ClientUserinfoChanged: 2 n\Isgalamido\t\0",
                r" 0:02 ClientUserinfoChanged: 3 n\Mocinha\t\0",
                r" 0:03 ClientUserinfoChanged: 2 n\Isgalamido\t\0",
            ],
        );
        let roster = acc.roster();
        assert_eq!(roster, vec![EntityName::from("Isgalamido"), EntityName::from("Mocinha")]);
    }

    #[test]
    fn test_reset_keeps_roster() {
        let mut acc = MatchAccumulator::default();
        feed(
            &mut acc,
            &[
                r" 0:01 ClientUserinfoChanged: 2 n\Zeh\t\0",
                " 0:10 Kill: 3 2 7: Zeh killed Mocinha by MOD_ROCKET",
            ],
        );
        acc.reset();
        assert_eq!(acc.total_kills(), 0);
        assert_eq!(acc.killers().count(), 0);

        let record = acc.seal(MatchId::new(2));
        assert_eq!(record.total_kills, 0);
        assert!(record.kills.is_empty());
        assert!(record.kills_by_means.is_empty());
        assert_eq!(record.players, vec![EntityName::from("Zeh")]);
    }

    #[test]
    fn test_skip_policy_keeps_kill_count() {
        let mut acc = MatchAccumulator::default();
        feed(&mut acc, &[" 0:10 Kill: 3 2 7: Zeh killed Mocinha"]);
        let record = acc.seal(MatchId::FIRST);
        assert_eq!(record.total_kills, 1);
        assert_eq!(record.kills.get("Zeh"), 1);
        assert!(record.kills_by_means.is_empty());
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_skip_policy_world_kill_without_victim() {
        let mut acc = MatchAccumulator::default();
        feed(&mut acc, &[" 0:10 Kill: 1022 2 22: <world> killed ^7 by MOD_LAVA"]);
        let record = acc.seal(MatchId::FIRST);
        assert_eq!(record.total_kills, 1);
        assert_eq!(record.kills_by_means.get("MOD_LAVA"), 1);
        assert!(record.kills.is_empty());
        assert!(record.is_consistent());
    }

    #[test]
    fn test_strict_policy_reports_field() {
        let options = ParseOptions::default().with_policy(MalformedPolicy::Strict);
        let mut acc = MatchAccumulator::new(options);
        let err = acc.observe(7, " 0:10 Kill: 1022 2 22: <world> killed").unwrap_err();
        match err {
            ParseError::MalformedLine { line, field, .. } => {
                assert_eq!(line, 7);
                assert_eq!(field, LineField::WorldVictim);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_policy_rejects_nameless_user_info() {
        let options = ParseOptions::default().with_policy(MalformedPolicy::Strict);
        let mut acc = MatchAccumulator::new(options);
        let err = acc.observe(1, " 0:01 ClientUserinfoChanged: 2").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedLine { field: LineField::PlayerName, .. }
        ));
    }
}
