use crate::domain::{History, Thought, Timestamp, TimestampedThought};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One stored thought: `{ "thought": "...", "time": <millis> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtRecord {
    pub thought: String,
    pub time: Timestamp,
}

impl From<&TimestampedThought> for ThoughtRecord {
    fn from(entry: &TimestampedThought) -> Self {
        Self {
            thought: entry.text().to_string(),
            time: entry.created_at,
        }
    }
}

impl ThoughtRecord {
    /// Blank records are dropped; text is trimmed
    pub fn into_thought(self) -> Option<TimestampedThought> {
        Thought::new(&self.thought).map(|t| TimestampedThought::new(t, self.time))
    }
}

/// Records in history order (newest first)
pub fn to_records(history: &History) -> Vec<ThoughtRecord> {
    history.iter().map(ThoughtRecord::from).collect()
}

/// Build history from newest-first records
pub fn from_records(records: Vec<ThoughtRecord>) -> History {
    let total = records.len();
    let entries: Vec<TimestampedThought> = records
        .into_iter()
        .filter_map(ThoughtRecord::into_thought)
        .collect();
    if entries.len() < total {
        warn!(dropped = total - entries.len(), "skipped blank stored thoughts");
    }
    History::from_newest_first(entries)
}

/// Serialize history as a pretty JSON array, newest first
pub fn serialize_history(history: &History) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_records(history))
}

/// Parse a JSON array of records. Blank content is an empty history.
pub fn parse_history(content: &str) -> serde_json::Result<History> {
    if content.trim().is_empty() {
        return Ok(History::new());
    }
    let records: Vec<ThoughtRecord> = serde_json::from_str(content)?;
    Ok(from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(text: &str, at: Timestamp) -> TimestampedThought {
        TimestampedThought::new(Thought::new(text).unwrap(), at)
    }

    #[test]
    fn test_serialized_record_format() {
        let history = History::from_newest_first(vec![entry("newer", 2_000), entry("older", 1_000)]);
        let json = serialize_history(&history).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!([
                { "thought": "newer", "time": 2000 },
                { "thought": "older", "time": 1000 }
            ])
        );
    }

    #[test]
    fn test_parse_history_keeps_order() {
        let content = r#"[{"thought":"b","time":20},{"thought":"a","time":10}]"#;
        let history = parse_history(content).unwrap();
        let texts: Vec<&str> = history.iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["b", "a"]);
        assert_eq!(history.as_slice()[0].created_at, 20);
    }

    #[test]
    fn test_parse_history_blank_is_empty() {
        assert!(parse_history("").unwrap().is_empty());
        assert!(parse_history("  \n").unwrap().is_empty());
        assert!(parse_history("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_history_drops_blank_records() {
        let content = r#"[{"thought":"   ","time":20},{"thought":" kept ","time":10}]"#;
        let history = parse_history(content).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.as_slice()[0].text(), "kept");
    }

    #[test]
    fn test_parse_history_malformed() {
        assert!(parse_history("{not json").is_err());
        assert!(parse_history(r#"[{"thought":"x"}]"#).is_err());
    }
}
