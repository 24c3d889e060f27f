//! Names that kill credit is booked against.
//!
//! Three kinds of token end up as an `EntityName`: the roster name from a
//! `ClientUserinfoChanged` line, the killer token in front of ` killed`,
//! and the victim token after `<world> killed`. They are compared as plain
//! strings, so the same person can show up under more than one entity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::sync::Arc;

/// A name that can hold a kill score.
///
/// Cheap to clone: a name is shared between a match's kill tally, the
/// roster, and the ranking.
///
/// Extraction is token based, which splits multi-word player names:
///
/// ```rust
/// use fraglog::classify::{extract_killer, extract_player_name, extract_world_killer};
/// use fraglog::EntityName;
///
/// let joined = r" 0:27 ClientUserinfoChanged: 3 n\Dono da Bola\t\0";
/// let fragged = " 1:41 Kill: 3 4 6: Dono da Bola killed Zeh by MOD_ROCKET";
/// let fell = " 1:58 Kill: 1022 3 19: <world> killed Dono da Bola by MOD_FALLING";
///
/// let player = EntityName::new(extract_player_name(joined).unwrap());
/// let killer = EntityName::new(extract_killer(fragged).unwrap());
/// let victim = EntityName::new(extract_world_killer(fell).unwrap());
///
/// assert_eq!(player.as_str(), "Dono da Bola");
/// assert_eq!(killer.as_str(), "Bola");
/// assert_eq!(victim.as_str(), "Dono");
/// assert_ne!(player, killer);
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntityName(Arc<str>);

impl EntityName {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EntityName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// Lets tallies and killer sets be queried with a bare `&str`.
impl Borrow<str> for EntityName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bare JSON string, so names work as map keys in match reports.
impl Serialize for EntityName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(EntityName::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::Tally;
    use std::collections::HashSet;

    #[test]
    fn test_roster_name_keeps_spaces() {
        let name: EntityName = "Dono da Bola".into();
        assert_eq!(name.to_string(), "Dono da Bola");
        assert_eq!(name, EntityName::from(String::from("Dono da Bola")));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut killers = HashSet::new();
        killers.insert(EntityName::new("Zeh"));
        assert!(killers.contains("Zeh"));
        assert!(!killers.contains("zeh"));
    }

    #[test]
    fn test_score_lookup_by_str() {
        let mut kills = Tally::new();
        kills.add(EntityName::new("Isgalamido"), -8);
        assert_eq!(kills.get("Isgalamido"), -8);
    }

    #[test]
    fn test_name_as_json_map_key() {
        let mut kills = Tally::new();
        kills.set(EntityName::new("Dono"), -1);
        assert_eq!(serde_json::to_string(&kills).unwrap(), r#"{"Dono":-1}"#);

        let back: EntityName = serde_json::from_str("\"Dono\"").unwrap();
        assert_eq!(back.as_str(), "Dono");
    }
}
