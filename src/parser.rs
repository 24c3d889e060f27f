//! Single-pass log parser.
//!
//! `LogParser` folds lines into a [`MatchStore`]:
//!
//! ```text
//! line ──► ignored? ──► skip
//!      └─► match start? ──► skip
//!      └─► accumulator.observe(line)
//!          └─► match end? ──► seal as game-<n>, n += 1, reset
//! ```
//!
//! A match only exists once its end marker is read. Lines after the last
//! end marker are folded into an accumulator that is never sealed.

use crate::accumulator::MatchAccumulator;
use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::record::MatchId;
use crate::store::MatchStore;
use std::io::BufRead;

/// Incremental parser state for one pass over a log.
///
/// # Examples
///
/// ```rust
/// use fraglog::LogParser;
///
/// let mut parser = LogParser::default();
/// parser.feed(" 0:10 Kill: 2 3 7: Zeh killed Mocinha by MOD_ROCKET").unwrap();
/// parser.feed(" 0:20 ShutdownGame:").unwrap();
/// parser.feed(" 0:30 Kill: 2 3 7: Zeh killed Mocinha by MOD_ROCKET").unwrap();
///
/// let store = parser.finish();
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.get("game-1").unwrap().kills.get("Zeh"), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LogParser {
    accumulator: MatchAccumulator,
    store: MatchStore,
    next_id: Option<MatchId>,
    line_number: usize,
}

impl LogParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            accumulator: MatchAccumulator::new(options),
            store: MatchStore::new(),
            next_id: Some(MatchId::FIRST),
            line_number: 0,
        }
    }

    /// Process the next line of the log.
    ///
    /// # Errors
    ///
    /// Fails on a malformed line under the strict policy, or with
    /// [`ParseError::TooManyMatches`] when match numbers run out.
    pub fn feed(&mut self, line: &str) -> Result<(), ParseError> {
        self.line_number += 1;

        let classifier = self.accumulator.classifier();
        if classifier.is_ignored(line) {
            return Ok(());
        }
        if classifier.is_match_start(line) {
            log::trace!("line {}: match start", self.line_number);
            return Ok(());
        }
        let ends_match = classifier.is_match_end(line);

        self.accumulator.observe(self.line_number, line)?;

        if ends_match {
            self.seal_match()?;
        }
        Ok(())
    }

    fn seal_match(&mut self) -> Result<(), ParseError> {
        let id = self.next_id.ok_or(ParseError::TooManyMatches {
            line: self.line_number,
        })?;
        let record = self.accumulator.seal(id);
        log::debug!(
            "line {}: sealed {} with {} kills",
            self.line_number,
            record.id,
            record.total_kills
        );
        self.store.insert(record, self.accumulator.killers());
        self.next_id = id.next();
        self.accumulator.reset();
        Ok(())
    }

    /// Number of lines fed so far.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// End the pass and hand over the sealed matches.
    ///
    /// An open match is dropped. The roster still includes every player
    /// seen, even those only seen after the last end marker.
    pub fn finish(self) -> MatchStore {
        let LogParser {
            accumulator,
            mut store,
            ..
        } = self;
        if accumulator.total_kills() > 0 {
            log::debug!(
                "dropping unterminated match with {} kills",
                accumulator.total_kills()
            );
        }
        store.set_roster(accumulator.roster());
        store
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

/// Parse a sequence of lines with the default options.
pub fn parse_lines<I, S>(lines: I) -> Result<MatchStore, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines_with(lines, ParseOptions::default())
}

/// Parse a sequence of lines with explicit options.
pub fn parse_lines_with<I, S>(lines: I, options: ParseOptions) -> Result<MatchStore, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = LogParser::new(options);
    for line in lines {
        parser.feed(line.as_ref())?;
    }
    Ok(parser.finish())
}

/// Parse everything a reader yields, line by line.
///
/// # Errors
///
/// A read failure stops the pass with [`ParseError::Io`] carrying the
/// number of the line that could not be read. No partial store is
/// returned.
///
/// Bytes that are not valid UTF-8 are not a read failure: player names
/// often carry Latin-1 characters, so each line is decoded lossily and
/// invalid bytes become `U+FFFD`.
///
/// ```rust
/// use fraglog::{parse_reader, ParseOptions};
/// use std::io::Cursor;
///
/// let log = " 0:10 Kill: 1022 2 22: <world> killed Zeh by MOD_FALLING\n 0:11 ShutdownGame:\n";
/// let store = parse_reader(Cursor::new(log), ParseOptions::default()).unwrap();
/// assert_eq!(store.get("game-1").unwrap().kills_by_means.get("MOD_FALLING"), 1);
/// ```
pub fn parse_reader<R: BufRead>(reader: R, options: ParseOptions) -> Result<MatchStore, ParseError> {
    let mut parser = LogParser::new(options);
    for raw in reader.split(b'\n') {
        let mut raw = raw.map_err(|source| ParseError::Io {
            line: parser.lines_read() + 1,
            source,
        })?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        parser.feed(&String::from_utf8_lossy(&raw))?;
    }
    log::debug!("read {} lines", parser.lines_read());
    Ok(parser.finish())
}
