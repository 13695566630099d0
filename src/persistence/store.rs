use super::files::{atomic_write, backup_file, history_file, meta_file, read_optional, remove_if_exists, user_file};
use super::history::{from_records, parse_history, serialize_history, ThoughtRecord};
use super::metadata::{load_metadata, save_metadata, AppMetadata};
use crate::domain::{History, ThemeColor, TimestampedThought};
use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable home for committed thoughts and the theme color
pub trait HistoryStore {
    /// Short label for logs and the status line
    fn describe(&self) -> String;

    /// Prior history, newest first. Missing data is an empty history.
    fn load(&self) -> StoreResult<History>;

    /// Persist after `committed` was prepended to `history`
    fn record_commit(&self, history: &History, committed: &TimestampedThought) -> StoreResult<()>;

    /// Remove all stored thoughts
    fn purge(&self) -> StoreResult<()>;

    fn load_color(&self) -> StoreResult<ThemeColor>;

    fn save_color(&self, color: ThemeColor) -> StoreResult<()>;
}

/// Whole-history JSON file in the data directory
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl HistoryStore for LocalStore {
    fn describe(&self) -> String {
        format!("local {}", self.dir.display())
    }

    fn load(&self) -> StoreResult<History> {
        let path = history_file(&self.dir);
        let Some(content) = read_optional(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?
        else {
            return Ok(History::new());
        };

        match parse_history(&content) {
            Ok(history) => Ok(history),
            Err(e) => {
                // Keep the unreadable file around; the next commit overwrites it
                match backup_file(&path) {
                    Ok(backup) => warn!(backup = %backup.display(), "history file is malformed, backed up"),
                    Err(err) => warn!(error = %err, "history file is malformed and could not be backed up"),
                }
                Err(StoreError::Malformed(e))
            }
        }
    }

    fn record_commit(&self, history: &History, _committed: &TimestampedThought) -> StoreResult<()> {
        let json = serialize_history(history)?;
        atomic_write(history_file(&self.dir), &json)?;
        debug!(entries = history.len(), "history written");
        Ok(())
    }

    fn purge(&self) -> StoreResult<()> {
        remove_if_exists(&history_file(&self.dir))?;
        Ok(())
    }

    fn load_color(&self) -> StoreResult<ThemeColor> {
        Ok(load_metadata(meta_file(&self.dir))?.color)
    }

    fn save_color(&self, color: ThemeColor) -> StoreResult<()> {
        save_metadata(meta_file(&self.dir), &AppMetadata { color })?;
        Ok(())
    }
}

/// Per-user document: `{ "color": ..., "thoughts": [...] }`, thoughts oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(default)]
    pub color: ThemeColor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thoughts: Vec<ThoughtRecord>,
}

impl UserDocument {
    /// Stored order is oldest first; history is newest first
    pub fn history(&self) -> History {
        from_records(self.thoughts.iter().rev().cloned().collect())
    }

    /// Add a record unless an identical one is already present
    pub fn append_unique(&mut self, record: ThoughtRecord) -> bool {
        if self.thoughts.contains(&record) {
            return false;
        }
        self.thoughts.push(record);
        true
    }
}

/// Document store keyed by user id, with append-only writes per thought
#[derive(Debug, Clone)]
pub struct DocumentStore {
    user_id: String,
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(dir: &Path, user_id: &str) -> StoreResult<Self> {
        let valid = !user_id.is_empty()
            && user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidUser(user_id.to_string()));
        }
        Ok(Self {
            user_id: user_id.to_string(),
            path: user_file(dir, user_id),
        })
    }

    fn read_document(&self) -> StoreResult<UserDocument> {
        let content = read_optional(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        match content {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text).map_err(|e| {
                match backup_file(&self.path) {
                    Ok(backup) => warn!(user = %self.user_id, backup = %backup.display(), "user document is malformed, backed up"),
                    Err(err) => warn!(user = %self.user_id, error = %err, "user document is malformed and could not be backed up"),
                }
                StoreError::Malformed(e)
            }),
            _ => Ok(UserDocument::default()),
        }
    }

    /// Document to modify. A malformed one is already backed up, so writes start over.
    fn document_for_update(&self) -> StoreResult<UserDocument> {
        match self.read_document() {
            Err(StoreError::Malformed(e)) => {
                warn!(user = %self.user_id, error = %e, "replacing malformed user document");
                Ok(UserDocument::default())
            }
            other => other,
        }
    }

    fn write_document(&self, document: &UserDocument) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(document)?;
        atomic_write(&self.path, &json)?;
        Ok(())
    }
}

impl HistoryStore for DocumentStore {
    fn describe(&self) -> String {
        format!("user {}", self.user_id)
    }

    fn load(&self) -> StoreResult<History> {
        Ok(self.read_document()?.history())
    }

    fn record_commit(&self, _history: &History, committed: &TimestampedThought) -> StoreResult<()> {
        let mut document = self.document_for_update()?;
        if document.append_unique(ThoughtRecord::from(committed)) {
            self.write_document(&document)?;
            debug!(user = %self.user_id, total = document.thoughts.len(), "thought appended");
        }
        Ok(())
    }

    fn purge(&self) -> StoreResult<()> {
        let mut document = self.document_for_update()?;
        document.thoughts.clear();
        self.write_document(&document)
    }

    fn load_color(&self) -> StoreResult<ThemeColor> {
        Ok(self.read_document()?.color)
    }

    fn save_color(&self, color: ThemeColor) -> StoreResult<()> {
        let mut document = self.document_for_update()?;
        document.color = color;
        self.write_document(&document)
    }
}

/// In-memory store for tests, with switchable write failures
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub history: std::cell::RefCell<History>,
    pub color: std::cell::Cell<ThemeColor>,
    pub writes: std::cell::Cell<usize>,
    pub purges: std::cell::Cell<usize>,
    pub fail_writes: std::cell::Cell<bool>,
    pub malformed: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_history(history: History) -> Self {
        Self {
            history: std::cell::RefCell::new(history),
            ..Self::default()
        }
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Write(anyhow::anyhow!("disk full")));
        }
        Ok(())
    }
}

#[cfg(test)]
impl HistoryStore for MemoryStore {
    fn describe(&self) -> String {
        String::from("memory")
    }

    fn load(&self) -> StoreResult<History> {
        if self.malformed {
            return Err(StoreError::Malformed(
                serde_json::from_str::<ThoughtRecord>("{").unwrap_err(),
            ));
        }
        Ok(self.history.borrow().clone())
    }

    fn record_commit(&self, history: &History, _committed: &TimestampedThought) -> StoreResult<()> {
        self.check_writable()?;
        *self.history.borrow_mut() = history.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn purge(&self) -> StoreResult<()> {
        self.check_writable()?;
        self.history.borrow_mut().clear();
        self.purges.set(self.purges.get() + 1);
        Ok(())
    }

    fn load_color(&self) -> StoreResult<ThemeColor> {
        Ok(self.color.get())
    }

    fn save_color(&self, color: ThemeColor) -> StoreResult<()> {
        self.check_writable()?;
        self.color.set(color);
        Ok(())
    }
}

#[cfg(test)]
impl<S: HistoryStore + ?Sized> HistoryStore for std::rc::Rc<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn load(&self) -> StoreResult<History> {
        (**self).load()
    }

    fn record_commit(&self, history: &History, committed: &TimestampedThought) -> StoreResult<()> {
        (**self).record_commit(history, committed)
    }

    fn purge(&self) -> StoreResult<()> {
        (**self).purge()
    }

    fn load_color(&self) -> StoreResult<ThemeColor> {
        (**self).load_color()
    }

    fn save_color(&self, color: ThemeColor) -> StoreResult<()> {
        (**self).save_color(color)
    }
}
