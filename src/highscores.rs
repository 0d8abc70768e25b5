//! High score leaderboard
//!
//! The game only talks to a `Leaderboard`. Transport lives with the host;
//! whatever goes wrong out there comes back as "not saved" or "no data",
//! never as an error inside the simulation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Longest name a record may carry
pub const MAX_NAME_LEN: usize = 3;

/// Placeholder for records that arrive without a name
const UNKNOWN_NAME: &str = "???";

/// Errors at the leaderboard boundary
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    #[error("Invalid player name: {0:?}")]
    InvalidName(String),

    #[error("Malformed leaderboard payload: {0}")]
    Malformed(String),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u64,
}

impl ScoreRecord {
    pub fn new(name: &str, score: u64) -> Self {
        Self {
            name: truncate_name(name),
            score,
        }
    }
}

/// Score storage as seen by the game
pub trait Leaderboard {
    /// Save a finished run; false if it was not saved
    fn submit(&mut self, name: &str, score: u64) -> bool;

    /// Top `n` records, highest score first; empty when unavailable
    fn fetch_top(&self, n: usize) -> Vec<ScoreRecord>;
}

/// Clip a name to `MAX_NAME_LEN` characters
pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}

/// Validate a name for submission
pub fn check_name(name: &str) -> Result<String, LeaderboardError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LeaderboardError::InvalidName(name.to_string()));
    }
    Ok(truncate_name(trimmed))
}

/// In-memory leaderboard, sorted descending by score
#[derive(Debug, Clone)]
pub struct LocalLeaderboard {
    pub entries: Vec<ScoreRecord>,
    capacity: usize,
}

impl Default for LocalLeaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalLeaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::with_capacity(MAX_HIGH_SCORES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Seed from a remote payload (see `parse_records`)
    pub fn from_json(json: &str) -> Self {
        let mut board = Self::new();
        board.entries = parse_records(json);
        board
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < self.capacity {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score; returns the rank achieved (1-indexed).
    ///
    /// Ties rank below existing entries with the same score.
    pub fn try_submit(&mut self, name: &str, score: u64) -> Result<Option<usize>, LeaderboardError> {
        let name = check_name(name)?;
        if !self.qualifies(score) {
            return Ok(None);
        }

        let entry = ScoreRecord { name, score };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(self.capacity);

        Ok(Some(rank))
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

impl Leaderboard for LocalLeaderboard {
    fn submit(&mut self, name: &str, score: u64) -> bool {
        match self.try_submit(name, score) {
            Ok(Some(rank)) => {
                log::info!("Saved {score} for {name} at rank {rank}");
                true
            }
            // Recorded nowhere, but the backend worked
            Ok(None) => {
                log::info!("Score {score} did not make the board");
                true
            }
            Err(e) => {
                log::warn!("Score not saved: {e}");
                false
            }
        }
    }

    fn fetch_top(&self, n: usize) -> Vec<ScoreRecord> {
        self.entries.iter().take(n).cloned().collect()
    }
}

/// Leaderboard whose storage is remote and owned by the host.
///
/// Submissions are queued for the host to send; fetched records are
/// whatever the host last loaded.
#[derive(Debug, Clone, Default)]
pub struct RelayLeaderboard {
    records: Vec<ScoreRecord>,
    outbox: Vec<ScoreRecord>,
}

impl RelayLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace cached records with a remote payload (see `parse_records`)
    pub fn load_json(&mut self, json: &str) {
        self.records = parse_records(json);
        log::info!("Leaderboard refreshed: {} records", self.records.len());
    }

    /// Hand queued submissions to the host
    pub fn take_outbox(&mut self) -> Vec<ScoreRecord> {
        std::mem::take(&mut self.outbox)
    }
}

impl Leaderboard for RelayLeaderboard {
    fn submit(&mut self, name: &str, score: u64) -> bool {
        match check_name(name) {
            Ok(name) => {
                self.outbox.push(ScoreRecord { name, score });
                true
            }
            Err(e) => {
                log::warn!("Score not queued: {e}");
                false
            }
        }
    }

    fn fetch_top(&self, n: usize) -> Vec<ScoreRecord> {
        self.records.iter().take(n).cloned().collect()
    }
}

/// Decode the remote record map `{ "<id>": { "name": .., "score": .. }, .. }`.
///
/// Bad payloads degrade to an empty list; bad individual records are skipped.
/// Negative scores are kept and count as 0.
pub fn parse_records(json: &str) -> Vec<ScoreRecord> {
    match try_parse_records(json) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("{e}");
            Vec::new()
        }
    }
}

/// Strict variant of `parse_records`
pub fn try_parse_records(json: &str) -> Result<Vec<ScoreRecord>, LeaderboardError> {
    let trimmed = json.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut value: Value =
        serde_json::from_str(trimmed).map_err(|e| LeaderboardError::Malformed(e.to_string()))?;

    // Some transports hand back the body JSON-encoded a second time
    if let Value::String(inner) = &value {
        value = serde_json::from_str(inner).map_err(|e| LeaderboardError::Malformed(e.to_string()))?;
    }

    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(LeaderboardError::Malformed(format!(
                "expected an object of records, got {}",
                type_name(&other)
            )));
        }
    };

    let mut records: Vec<ScoreRecord> = map
        .values()
        .filter_map(|record| match decode_record(record) {
            Some(r) => Some(r),
            None => {
                log::debug!("Skipping malformed record {record}");
                None
            }
        })
        .collect();

    // Stable sort keeps payload order among equal scores
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(MAX_HIGH_SCORES);
    Ok(records)
}

fn decode_record(record: &Value) -> Option<ScoreRecord> {
    let fields = record.as_object()?;

    let name = match fields.get("name") {
        None | Some(Value::Null) => UNKNOWN_NAME.to_string(),
        Some(Value::String(s)) => truncate_name(s),
        Some(other) => truncate_name(&other.to_string()),
    };

    let score = match fields.get("score") {
        None => 0,
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => v,
            None => n.as_f64()?.trunc().max(0.0) as u64,
        },
        Some(Value::String(s)) => s.trim().parse::<i64>().ok()?.max(0) as u64,
        Some(_) => return None,
    };

    Some(ScoreRecord { name, score })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ranks_descending() {
        let mut board = LocalLeaderboard::new();
        assert_eq!(board.try_submit("AAA", 10), Ok(Some(1)));
        assert_eq!(board.try_submit("BBB", 30), Ok(Some(1)));
        assert_eq!(board.try_submit("CCC", 20), Ok(Some(2)));
        // Tie goes below the existing entry
        assert_eq!(board.try_submit("DDD", 20), Ok(Some(3)));

        let top = board.fetch_top(10);
        let scores: Vec<u64> = top.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![30, 20, 20, 10]);
        assert_eq!(top[1].name, "CCC");
        assert_eq!(board.top_score(), Some(30));
    }

    #[test]
    fn test_local_capacity() {
        let mut board = LocalLeaderboard::with_capacity(2);
        assert!(board.submit("A", 5));
        assert!(board.submit("B", 6));
        assert_eq!(board.try_submit("C", 1), Ok(None));
        assert_eq!(board.try_submit("D", 7), Ok(Some(1)));
        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.fetch_top(1)[0].name, "D");
    }

    #[test]
    fn test_names_are_clipped_and_required() {
        let mut board = LocalLeaderboard::new();
        assert!(board.submit("ABCDEF", 1));
        assert_eq!(board.entries[0].name, "ABC");
        assert!(!board.submit("   ", 1));
        assert!(matches!(
            board.try_submit("", 1),
            Err(LeaderboardError::InvalidName(_))
        ));
    }

    #[test]
    fn test_parse_remote_records() {
        let json = r#"{
            "-a": { "name": "JOHN", "score": 15 },
            "-b": { "name": "AMY", "score": "40" },
            "-c": { "score": 25 },
            "-d": { "name": "BAD", "score": "lots" },
            "-e": "not a record",
            "-f": { "name": 7, "score": 12.9 },
            "-g": { "name": "NEG", "score": -5 },
            "-h": { "name": "NS", "score": "-3" }
        }"#;
        let records = parse_records(json);
        assert_eq!(
            records,
            vec![
                ScoreRecord::new("AMY", 40),
                ScoreRecord::new("???", 25),
                ScoreRecord::new("JOH", 15),
                ScoreRecord::new("7", 12),
                ScoreRecord::new("NEG", 0),
                ScoreRecord::new("NS", 0),
            ]
        );
    }

    #[test]
    fn test_parse_double_encoded_and_empty() {
        let inner = r#"{"x":{"name":"ZZ","score":3}}"#;
        let outer = serde_json::to_string(inner).unwrap();
        assert_eq!(parse_records(&outer), vec![ScoreRecord::new("ZZ", 3)]);

        assert!(parse_records("").is_empty());
        assert!(parse_records("null").is_empty());
    }

    #[test]
    fn test_parse_malformed_degrades() {
        assert!(parse_records("[1, 2, 3]").is_empty());
        assert!(parse_records("{oops").is_empty());
        assert!(matches!(
            try_parse_records("[1]"),
            Err(LeaderboardError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_keeps_top_ten() {
        let body: serde_json::Map<String, Value> = (0..15)
            .map(|i| (format!("k{i:02}"), serde_json::json!({ "name": "P", "score": i })))
            .collect();
        let json = Value::Object(body).to_string();
        let records = parse_records(&json);
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].score, 14);
        assert_eq!(records[9].score, 5);
    }

    #[test]
    fn test_relay_queues_and_caches() {
        let mut relay = RelayLeaderboard::new();
        assert!(relay.fetch_top(5).is_empty());

        assert!(relay.submit("KATE", 12));
        assert!(!relay.submit("", 3));
        assert_eq!(relay.take_outbox(), vec![ScoreRecord::new("KAT", 12)]);
        assert!(relay.take_outbox().is_empty());

        relay.load_json(r#"{"a":{"name":"X","score":1},"b":{"name":"Y","score":8}}"#);
        assert_eq!(relay.fetch_top(1), vec![ScoreRecord::new("Y", 8)]);

        relay.load_json("garbage");
        assert!(relay.fetch_top(5).is_empty());
    }

    #[test]
    fn test_seed_from_json() {
        let board = LocalLeaderboard::from_json(r#"{"a":{"name":"Q","score":9}}"#);
        assert_eq!(board.top_score(), Some(9));
    }
}
