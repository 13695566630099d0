use super::thought::{Draft, History, Thought, Timestamp, TimestampedThought};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What to do when a new thought is requested while a draft is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewDraftPolicy {
    /// Leave the open draft untouched
    #[default]
    KeepExisting,
    /// Throw the open draft away and start over
    DiscardExisting,
}

/// Result of committing the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new entry was prepended to history
    Committed(TimestampedThought),
    /// The draft was blank after trimming; history is unchanged
    Discarded,
    /// There was no draft to commit
    NoDraft,
}

impl CommitOutcome {
    /// True when history changed and must be persisted
    pub fn changed_history(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Owns the single draft and the committed history
#[derive(Debug, Clone)]
pub struct Lifecycle {
    draft: Option<Draft>,
    history: History,
    current_time: Timestamp,
    stale_threshold_ms: i64,
    policy: NewDraftPolicy,
}

impl Lifecycle {
    pub fn new(history: History, stale_threshold_ms: i64, policy: NewDraftPolicy, now: Timestamp) -> Self {
        Self {
            draft: None,
            history,
            current_time: now,
            stale_threshold_ms,
            policy,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_time(&self) -> Timestamp {
        self.current_time
    }

    pub fn stale_threshold_ms(&self) -> i64 {
        self.stale_threshold_ms
    }

    pub fn policy(&self) -> NewDraftPolicy {
        self.policy
    }

    /// Start a draft. Returns true if a new draft was created.
    pub fn begin_draft(&mut self, now: Timestamp) -> bool {
        match (&self.draft, self.policy) {
            (Some(_), NewDraftPolicy::KeepExisting) => false,
            (Some(existing), NewDraftPolicy::DiscardExisting) => {
                if !existing.is_blank() {
                    info!(chars = existing.text.len(), "discarding open draft for a new one");
                }
                self.draft = Some(Draft::empty(now));
                true
            }
            (None, _) => {
                self.draft = Some(Draft::empty(now));
                true
            }
        }
    }

    /// Replace the draft text. Ignored when no draft is open.
    pub fn edit_draft(&mut self, now: Timestamp, new_text: impl Into<String>) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.text = new_text.into();
                draft.last_edited_at = now;
                true
            }
            None => {
                debug!("edit ignored: no open draft");
                false
            }
        }
    }

    /// Whether the draft has been idle longer than the threshold at `now`
    pub fn is_stale(&self, now: Timestamp) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|d| d.idle_for(now) > self.stale_threshold_ms)
    }

    /// Milliseconds left before the draft becomes stale
    pub fn time_until_stale(&self, now: Timestamp) -> Option<i64> {
        self.draft
            .as_ref()
            .map(|d| (self.stale_threshold_ms - d.idle_for(now)).max(0))
    }

    /// Advance the clock; autosaves a stale draft
    pub fn tick(&mut self, now: Timestamp) -> Option<CommitOutcome> {
        self.current_time = now;
        if self.is_stale(now) {
            debug!(now, "draft is stale, autosaving");
            Some(self.commit(now))
        } else {
            None
        }
    }

    /// Move the trimmed draft into history and reset it
    pub fn commit(&mut self, now: Timestamp) -> CommitOutcome {
        let Some(draft) = self.draft.take() else {
            return CommitOutcome::NoDraft;
        };
        self.draft = Some(Draft::empty(now));

        match Thought::new(&draft.text) {
            Some(thought) => {
                let entry = TimestampedThought::new(thought, draft.started_at);
                self.history.prepend(entry.clone());
                info!(created_at = entry.created_at, total = self.history.len(), "thought committed");
                CommitOutcome::Committed(entry)
            }
            None => {
                debug!("blank draft discarded");
                CommitOutcome::Discarded
            }
        }
    }

    /// Commit, then make sure a fresh draft is open
    pub fn save_and_start_new(&mut self, now: Timestamp) -> CommitOutcome {
        let outcome = self.commit(now);
        self.begin_draft(now);
        outcome
    }

    /// Drop all history and reset the draft. Callers must confirm first.
    pub fn purge(&mut self, now: Timestamp) {
        info!(removed = self.history.len(), "purging history");
        self.history.clear();
        self.draft = Some(Draft::empty(now));
    }
}
