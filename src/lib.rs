//! # fraglog - Match Statistics from Quake III Arena Logs
//!
//! Turns a server `games.log` into per-match kill statistics and a
//! cross-match ranking:
//! - **Per match**: total kills, players, net kills per entity, kills by means of death
//! - **Ranking**: net score per entity summed over all matches, highest first
//!
//! ## Pipeline
//!
//! ```text
//! [lines] → [LineClassifier] → [MatchAccumulator] → [MatchStore] → [rank] → [Ranking]
//! ```
//!
//! 1. **Classifier** recognizes event lines by marker and extracts names
//! 2. **Accumulator** keeps running counts for the open match
//! 3. **Store** collects each match sealed at its end marker as `game-<n>`
//! 4. **Ranking** zero-fills non-killers and folds net scores across matches
//!
//! ## Kill attribution
//!
//! A line like `Isgalamido killed Mocinha by MOD_ROCKET` credits the
//! killer. A line like `<world> killed Zeh by MOD_FALLING` is a world
//! kill: it costs `Zeh` one point instead of crediting anyone, and any
//! player frags under the same name in that match are discarded.
//!
//! ## Example
//!
//! ```rust
//! use fraglog::*;
//!
//! let log = r"
//!   0:00 InitGame: \sv_hostname\Code Miner Server
//!  0:25 ClientUserinfoChanged: 2 n\Isgalamido\t\0\model\uriel/zael
//!  0:27 ClientUserinfoChanged: 3 n\Mocinha\t\0\model\sarge
//!  0:40 Kill: 2 3 7: Isgalamido killed Mocinha by MOD_ROCKET_SPLASH
//!  0:55 Kill: 1022 3 22: <world> killed Mocinha by MOD_TRIGGER_HURT
//!  1:10 ShutdownGame:
//! ";
//!
//! let store = parse_lines(log.lines())?;
//! let game = store.get("game-1").unwrap();
//! assert_eq!(game.total_kills, 2);
//! assert_eq!(game.kills.get("Isgalamido"), 1);
//! assert_eq!(game.kills.get("Mocinha"), -1);
//!
//! let ranking = rank(&store);
//! assert_eq!(ranking.entries()[0].entity.as_str(), "Isgalamido");
//! # Ok::<(), ParseError>(())
//! ```
//!
//! ## Modules
//!
//! - [`classify`] - Line recognizers and extractors
//! - [`accumulator`] - Per-match running state
//! - [`parser`] - Single-pass driver
//! - [`store`] - Sealed matches
//! - [`record`] - Match records
//! - [`ranking`] - Cross-match ranking
//! - [`tally`] - Insertion-ordered counters
//! - [`entity`] - Entity names
//! - [`config`] - Event markers and parse options
//! - [`error`] - Error types

pub mod accumulator;
pub mod classify;
pub mod config;
pub mod entity;
pub mod error;
pub mod parser;
pub mod ranking;
pub mod record;
pub mod store;
pub mod tally;

// Re-export main types for convenience
pub use accumulator::MatchAccumulator;
pub use classify::LineClassifier;
pub use config::{LogMarkers, MalformedPolicy, ParseOptions};
pub use entity::EntityName;
pub use error::ParseError;
pub use parser::{parse_lines, parse_lines_with, parse_reader, LogParser};
pub use ranking::{rank, Ranking, RankingEntry};
pub use record::{MatchId, MatchRecord};
pub use store::MatchStore;
pub use tally::Tally;
