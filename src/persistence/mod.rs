pub mod files;
pub mod history;
pub mod metadata;
pub mod store;

pub use files::{config_file, ensure_data_dir, get_data_dir, init_local_data_dir, log_file};
pub use history::serialize_history;
pub use store::{DocumentStore, HistoryStore, LocalStore};
