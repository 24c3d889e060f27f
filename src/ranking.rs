//! Cross-match ranking.
//!
//! The ranking is a pure reduction over a finished [`MatchStore`] in two
//! stages:
//!
//! 1. **Zero-fill**: every match with at least one kill entry gains a 0
//!    entry for each roster player who was never credited with a player
//!    kill. Matches with an empty kill map are left out entirely.
//! 2. **Fold**: scores are summed per entity in first-encounter order,
//!    then sorted ascending (stable) and reversed.
//!
//! The reversal means entities with equal scores come out in reverse
//! encounter order.

use crate::entity::EntityName;
use crate::store::MatchStore;
use crate::tally::Tally;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

/// One entity's net score across all matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub entity: EntityName,
    pub score: i64,
}

/// Entities ordered by net score, highest first.
///
/// Serializes as `{"ranking": {"<entity>": <score>, ...}}`.
///
/// # Examples
///
/// ```rust
/// use fraglog::{parse_lines, rank};
///
/// let store = parse_lines([
///     " 0:01 Kill: 2 3 7: Zeh killed Mocinha by MOD_ROCKET",
///     " 0:02 Kill: 1022 2 22: <world> killed Mocinha by MOD_FALLING",
///     " 0:03 ShutdownGame:",
/// ])
/// .unwrap();
///
/// let ranking = rank(&store);
/// assert_eq!(ranking.score("Zeh"), Some(1));
/// assert_eq!(ranking.score("Mocinha"), Some(-1));
/// assert_eq!(ranking.entries()[0].entity.as_str(), "Zeh");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankingEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Net score of `entity`, if it is ranked.
    pub fn score(&self, entity: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.entity.as_str() == entity)
            .map(|entry| entry.score)
    }

    /// Zero-based place of `entity` in the ranking.
    pub fn position(&self, entity: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.entity.as_str() == entity)
    }
}

impl Serialize for Ranking {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Ranking", 1)?;
        state.serialize_field("ranking", &Scores(&self.entries))?;
        state.end()
    }
}

struct Scores<'a>(&'a [RankingEntry]);

impl Serialize for Scores<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.entity, &entry.score)?;
        }
        map.end()
    }
}

/// Stage one: kill maps of every non-empty match, each padded with the
/// store's non-killers at 0.
///
/// Existing entries are never overwritten.
pub fn zero_filled_kills(store: &MatchStore) -> Vec<Tally<EntityName>> {
    let non_killers: Vec<&EntityName> = store.non_killers().collect();
    store
        .iter()
        .filter(|record| !record.kills.is_empty())
        .map(|record| {
            let mut kills = record.kills.clone();
            for name in &non_killers {
                if !kills.contains_key(name.as_str()) {
                    kills.set((*name).clone(), 0);
                }
            }
            kills
        })
        .collect()
}

/// Stage two: sum per entity and order by score.
pub fn fold_scores<'a>(kill_maps: impl IntoIterator<Item = &'a Tally<EntityName>>) -> Ranking {
    let mut totals: Tally<EntityName> = Tally::new();
    for kills in kill_maps {
        for (entity, score) in kills.iter() {
            totals.add(entity.clone(), score);
        }
    }

    let mut entries: Vec<RankingEntry> = totals
        .iter()
        .map(|(entity, score)| RankingEntry {
            entity: entity.clone(),
            score,
        })
        .collect();
    entries.sort_by_key(|entry| entry.score);
    entries.reverse();

    Ranking { entries }
}

/// Rank every entity in `store` by net score.
///
/// Pure: ranking the same store twice gives identical results.
pub fn rank(store: &MatchStore) -> Ranking {
    let filled = zero_filled_kills(store);
    let ranking = fold_scores(&filled);
    log::debug!(
        "ranked {} entities from {} of {} matches",
        ranking.len(),
        filled.len(),
        store.len()
    );
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kills(pairs: &[(&str, i64)]) -> Tally<EntityName> {
        let mut tally = Tally::new();
        for (name, score) in pairs {
            tally.set(EntityName::from(*name), *score);
        }
        tally
    }

    fn names(ranking: &Ranking) -> Vec<&str> {
        ranking.iter().map(|entry| entry.entity.as_str()).collect()
    }

    #[test]
    fn test_fold_sums_across_matches() {
        let maps = [kills(&[("Zeh", 2), ("Mocinha", -1)]), kills(&[("Mocinha", 3)])];
        let ranking = fold_scores(&maps);
        assert_eq!(ranking.score("Zeh"), Some(2));
        assert_eq!(ranking.score("Mocinha"), Some(2));
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn test_fold_orders_descending() {
        let maps = [kills(&[("a", -3), ("b", 5), ("c", 0)])];
        assert_eq!(names(&fold_scores(&maps)), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_come_out_in_reverse_encounter_order() {
        let maps = [kills(&[("first", 0), ("second", 0), ("third", 0)])];
        let ranking = fold_scores(&maps);
        assert_eq!(names(&ranking), vec!["third", "second", "first"]);
        assert_eq!(ranking.position("first"), Some(2));
    }

    #[test]
    fn test_empty_input() {
        let ranking = fold_scores(&[]);
        assert!(ranking.is_empty());
        assert_eq!(ranking.score("anyone"), None);
    }

    #[test]
    fn test_serialization_keeps_rank_order() {
        let maps = [kills(&[("Zeh", -2), ("Mocinha", 0)])];
        let json = serde_json::to_string(&fold_scores(&maps)).unwrap();
        assert_eq!(json, r#"{"ranking":{"Mocinha":0,"Zeh":-2}}"#);
    }
}
