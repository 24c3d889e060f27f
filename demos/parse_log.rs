//! Parse a games.log and print the match report and ranking as JSON.
//!
//! Usage:
//!
//! ```text
//! cargo run --example parse_log -- path/to/games.log [markers.json]
//! ```
//!
//! The optional second argument is a JSON object overriding event
//! markers, e.g. `{ "match_end": "GameOver" }`.

use fraglog::*;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let log_path = args.next().unwrap_or_else(|| "qgames.log".to_string());

    let mut options = ParseOptions::default();
    if let Some(markers_path) = args.next() {
        let json = std::fs::read_to_string(markers_path)?;
        options = options.with_markers(LogMarkers::from_json(&json)?);
    }

    let file = File::open(&log_path)?;
    let store = parse_reader(BufReader::new(file), options)?;

    println!("{}", serde_json::to_string_pretty(&store)?);
    println!("{}", serde_json::to_string_pretty(&rank(&store))?);

    let unbalanced: Vec<_> = store
        .iter()
        .filter(|record| !record.is_consistent())
        .map(MatchRecord::label)
        .collect();
    if !unbalanced.is_empty() {
        eprintln!("warning: malformed kill lines in {}", unbalanced.join(", "));
    }

    Ok(())
}
