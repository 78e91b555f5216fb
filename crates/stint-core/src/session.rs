//! The timer session state machine.
//!
//! ```text
//! Idle    --toggle_start()--> Running
//! Running --toggle_start()--> Stopped
//! Stopped --toggle_start()--> Running   (resumes, keeps elapsed)
//! Stopped --commit()------->  Idle
//! ```
//!
//! While running, elapsed time is derived from a wall-clock anchor
//! (`anchor = start - previously elapsed`), never accumulated tick by tick,
//! so late or dropped ticks cannot make the counter drift.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{Clock, Scheduler};
use crate::entry::NewEntry;

/// Errors returned by [`TimerSession::commit`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommitError {
    /// The task name is empty or whitespace-only.
    #[error("task name cannot be empty")]
    EmptyTaskName,

    /// The timer must be stopped before its time can be saved.
    #[error("the timer is still running")]
    SessionStillRunning,
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal phase. The running variant owns the anchor and the tick handle,
/// so "running" and "exactly one live tick" cannot disagree.
enum Phase<H> {
    Idle,
    Running { anchor_ms: i64, tick: H },
    Stopped,
}

/// A single in-progress timing session.
pub struct TimerSession<C: Clock, S: Scheduler> {
    clock: C,
    scheduler: S,
    task_name: String,
    /// Last derived value while running, frozen otherwise.
    elapsed_seconds: u64,
    phase: Phase<S::Handle>,
}

impl<C: Clock, S: Scheduler> TimerSession<C, S> {
    /// Creates an idle session with no task name.
    pub fn new(clock: C, scheduler: S) -> Self {
        Self {
            clock,
            scheduler,
            task_name: String::new(),
            elapsed_seconds: 0,
            phase: Phase::Idle,
        }
    }

    // ========== Queries ==========

    pub const fn status(&self) -> Status {
        match self.phase {
            Phase::Idle => Status::Idle,
            Phase::Running { .. } => Status::Running,
            Phase::Stopped => Status::Stopped,
        }
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// The task name exactly as last set (untrimmed).
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Elapsed whole seconds as of the last tick or transition.
    ///
    /// This is a pure read: two calls with no tick in between return the
    /// same value even if the wall clock has moved on.
    pub const fn elapsed(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whether a recurring tick is currently scheduled.
    ///
    /// Always equal to [`is_running`](Self::is_running): the running phase
    /// owns the tick handle, so there is no separate state to inspect.
    pub const fn has_live_tick(&self) -> bool {
        self.is_running()
    }

    /// Whether the save action should be offered: stopped or idle with time
    /// on the counter.
    ///
    /// This only gates the UI. [`commit`](Self::commit) validates on its own.
    pub const fn can_commit(&self) -> bool {
        !self.is_running() && self.elapsed_seconds > 0
    }

    // ========== Intents ==========

    /// Overwrites the task name verbatim. Trimming happens at commit.
    pub fn set_task_name(&mut self, name: impl Into<String>) {
        self.task_name = name.into();
    }

    /// Starts (or resumes) a stopped/idle timer, or stops a running one.
    ///
    /// Returns the new status.
    pub fn toggle_start(&mut self) -> Status {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running { anchor_ms, tick } => {
                // Cancel before freezing so no tick can observe the stopped state.
                drop(tick);
                self.elapsed_seconds = self.derive_elapsed(anchor_ms);
                tracing::debug!(elapsed = self.elapsed_seconds, "timer stopped");
            }
            Phase::Idle | Phase::Stopped => {
                let carried_ms = i64::try_from(self.elapsed_seconds)
                    .unwrap_or(i64::MAX)
                    .saturating_mul(1000);
                let anchor_ms = self.now_ms().saturating_sub(carried_ms);
                let tick = self.scheduler.start();
                self.phase = Phase::Running { anchor_ms, tick };
                tracing::debug!(elapsed = self.elapsed_seconds, "timer started");
            }
        }
        self.status()
    }

    /// Recomputes elapsed time from the anchor.
    ///
    /// Ticks that arrive after the session left the running state are
    /// ignored. Returns the (possibly unchanged) elapsed value.
    pub fn tick(&mut self) -> u64 {
        if let Phase::Running { anchor_ms, .. } = self.phase {
            self.elapsed_seconds = self.derive_elapsed(anchor_ms);
        } else {
            tracing::trace!(status = %self.status(), "ignoring stray tick");
        }
        self.elapsed_seconds
    }

    /// Converts the session into a new entry and resets to idle.
    ///
    /// The empty-name check comes first, so a blank task is rejected
    /// whatever the elapsed time or status. On error nothing changes.
    pub fn commit(&mut self) -> Result<NewEntry, CommitError> {
        let task = self.task_name.trim();
        if task.is_empty() {
            return Err(CommitError::EmptyTaskName);
        }
        if self.is_running() {
            return Err(CommitError::SessionStillRunning);
        }

        let entry = NewEntry {
            task: task.to_string(),
            duration_seconds: self.elapsed_seconds,
            created_at: self.clock.now(),
        };
        self.reset();
        tracing::debug!(task = %entry.task, duration = entry.duration_seconds, "session committed");
        Ok(entry)
    }

    // ========== Internals ==========

    /// Back to idle with no time and no task name. Drops any live tick.
    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.elapsed_seconds = 0;
        self.task_name.clear();
    }

    fn now_ms(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    /// `floor((now - anchor) / 1000)`, clamped at zero if the clock stepped back.
    fn derive_elapsed(&self, anchor_ms: i64) -> u64 {
        let secs = self.now_ms().saturating_sub(anchor_ms).div_euclid(1000);
        u64::try_from(secs).unwrap_or(0)
    }
}

impl<C: Clock, S: Scheduler> fmt::Debug for TimerSession<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerSession")
            .field("task_name", &self.task_name)
            .field("status", &self.status())
            .field("elapsed_seconds", &self.elapsed_seconds)
            .finish_non_exhaustive()
    }
}
