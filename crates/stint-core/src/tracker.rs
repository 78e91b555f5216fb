//! The widget model: one timer session plus the log it saves into.
//!
//! A presentation layer feeds [`Intent`]s into [`Tracker::dispatch`] and
//! renders [`Tracker::view`] after each one.

use serde::Serialize;

use crate::clock::{Clock, Scheduler};
use crate::entry::{EntryLog, TimeEntry};
use crate::session::{CommitError, Status, TimerSession};

/// A user action (or the recurring tick) applied to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetTaskName(String),
    ToggleStart,
    Save,
    Tick,
}

/// What a successful dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    TaskNameSet,
    Toggled(Status),
    Saved(TimeEntry),
    Ticked { elapsed: u64 },
}

/// Read-only snapshot for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerView<'a> {
    pub status: Status,
    pub task_name: &'a str,
    pub elapsed_seconds: u64,
    pub can_save: bool,
    /// Label for the start/stop control.
    pub toggle_label: &'static str,
    pub entries: &'a [TimeEntry],
}

/// Owns the session and its entry log for the lifetime of the widget.
#[derive(Debug)]
pub struct Tracker<C: Clock, S: Scheduler> {
    session: TimerSession<C, S>,
    log: EntryLog,
}

impl<C: Clock, S: Scheduler> Tracker<C, S> {
    pub fn new(clock: C, scheduler: S) -> Self {
        Self {
            session: TimerSession::new(clock, scheduler),
            log: EntryLog::new(),
        }
    }

    /// Applies an intent.
    ///
    /// Only [`Intent::Save`] can fail, and a failed save leaves both the
    /// session and the log untouched.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, CommitError> {
        match intent {
            Intent::SetTaskName(name) => {
                self.session.set_task_name(name);
                Ok(Outcome::TaskNameSet)
            }
            Intent::ToggleStart => Ok(Outcome::Toggled(self.session.toggle_start())),
            Intent::Save => {
                let entry = self.session.commit()?;
                let saved = self.log.append(entry).clone();
                tracing::info!(id = saved.id(), task = saved.task(), "time entry saved");
                Ok(Outcome::Saved(saved))
            }
            Intent::Tick => Ok(Outcome::Ticked {
                elapsed: self.session.tick(),
            }),
        }
    }

    pub fn view(&self) -> TrackerView<'_> {
        TrackerView {
            status: self.session.status(),
            task_name: self.session.task_name(),
            elapsed_seconds: self.session.elapsed(),
            can_save: self.session.can_commit(),
            toggle_label: if self.session.is_running() {
                "Stop"
            } else {
                "Start"
            },
            entries: self.log.all(),
        }
    }

    pub const fn session(&self) -> &TimerSession<C, S> {
        &self.session
    }

    pub const fn log(&self) -> &EntryLog {
        &self.log
    }

    pub fn entries(&self) -> &[TimeEntry] {
        self.log.all()
    }
}
