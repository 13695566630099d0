use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// Source of the current time
pub trait Clock {
    fn now_millis(&self) -> Timestamp;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

/// A committed piece of text. Always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thought(String);

impl Thought {
    /// Trim `raw`; returns `None` when nothing is left
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Thought {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A thought together with the moment its draft was started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedThought {
    pub thought: Thought,
    pub created_at: Timestamp,
}

impl TimestampedThought {
    pub fn new(thought: Thought, created_at: Timestamp) -> Self {
        Self { thought, created_at }
    }

    pub fn text(&self) -> &str {
        self.thought.as_str()
    }
}

/// Work in progress. The text may be empty or whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    /// Becomes the committed thought's `created_at`
    pub started_at: Timestamp,
    /// Refreshed on every edit; drives staleness
    pub last_edited_at: Timestamp,
}

impl Draft {
    pub fn empty(now: Timestamp) -> Self {
        Self {
            text: String::new(),
            started_at: now,
            last_edited_at: now,
        }
    }

    /// True when committing would discard the draft
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Milliseconds since the last edit (never negative)
    pub fn idle_for(&self, now: Timestamp) -> i64 {
        now.saturating_sub(self.last_edited_at).max(0)
    }
}

/// Committed thoughts, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History(Vec<TimestampedThought>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap entries that are already ordered newest first
    pub fn from_newest_first(entries: Vec<TimestampedThought>) -> Self {
        Self(entries)
    }

    pub fn prepend(&mut self, entry: TimestampedThought) {
        self.0.insert(0, entry);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn newest(&self) -> Option<&TimestampedThought> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimestampedThought> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TimestampedThought] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a TimestampedThought;
    type IntoIter = std::slice::Iter<'a, TimestampedThought>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thought_trims() {
        let thought = Thought::new("  hello world \n").unwrap();
        assert_eq!(thought.as_str(), "hello world");
    }

    #[test]
    fn test_thought_rejects_blank() {
        assert!(Thought::new("").is_none());
        assert!(Thought::new("   \t\n ").is_none());
    }

    #[test]
    fn test_draft_blank_and_idle() {
        let mut draft = Draft::empty(1_000);
        assert!(draft.is_blank());
        assert_eq!(draft.idle_for(4_000), 3_000);
        assert_eq!(draft.idle_for(500), 0);

        draft.text = " x ".to_string();
        assert!(!draft.is_blank());
    }

    #[test]
    fn test_draft_idle_for_extreme_times() {
        let draft = Draft::empty(i64::MIN);
        assert_eq!(draft.idle_for(i64::MAX), i64::MAX);

        let draft = Draft::empty(i64::MAX);
        assert_eq!(draft.idle_for(i64::MIN), 0);
    }

    #[test]
    fn test_history_prepend_keeps_newest_first() {
        let mut history = History::new();
        history.prepend(TimestampedThought::new(Thought::new("first").unwrap(), 1));
        history.prepend(TimestampedThought::new(Thought::new("second").unwrap(), 2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.newest().unwrap().text(), "second");
        assert_eq!(history.as_slice()[1].text(), "first");
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
