//! Core logic for the stint time tracker.
//!
//! This crate contains:
//! - Timer session: the idle/running/stopped state machine, anchored to the wall clock
//! - Entry log: the append-only list of saved time entries
//! - Tracker: the widget model combining both behind an intent/view interface
//! - Formatting helpers for durations and timestamps

pub mod clock;
mod entry;
pub mod format;
mod session;
mod tracker;

pub use clock::{Clock, ManualClock, ManualTicks, Scheduler, SystemClock};
pub use entry::{EntryLog, NewEntry, TimeEntry};
pub use format::{format_duration, format_timestamp};
pub use session::{CommitError, Status, TimerSession};
pub use tracker::{Intent, Outcome, Tracker, TrackerView};
