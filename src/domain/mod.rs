pub mod enums;
pub mod lifecycle;
pub mod mode;
pub mod thought;
pub mod views;

pub use enums::ThemeColor;
pub use lifecycle::{CommitOutcome, Lifecycle, NewDraftPolicy};
pub use mode::{FocusSink, FocusTarget, LayoutClass, MenuAction, Mode, ModeController};
pub use thought::{Clock, Draft, History, SystemClock, Thought, Timestamp, TimestampedThought};
pub use views::{filter_history, format_age, format_countdown, format_timestamp};
