//! The interactive tracker: the event loop that feeds user input and ticks
//! into a [`Tracker`] and renders the result.

use std::fmt;
use std::io::Write;
use std::ops::ControlFlow;

use anyhow::{Context, Result};
use chrono::TimeZone;
use stint_core::{
    Clock, CommitError, Intent, Outcome, TimeEntry, Tracker, format_duration,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::render::{Renderer, time_line};
use crate::repl::{Command, HELP, parse_line};
use crate::ticker::{Tick, TokioScheduler};

/// User-facing text for a rejected save.
pub const fn commit_notice(err: CommitError) -> &'static str {
    match err {
        CommitError::EmptyTaskName => "Please enter a task name before saving!",
        CommitError::SessionStillRunning => "Stop the timer before saving.",
    }
}

/// Terminal front end for one tracking session.
///
/// Must be created and driven inside a tokio runtime, since starting the
/// timer spawns the tick task.
pub struct Widget<C: Clock, Tz: TimeZone> {
    tracker: Tracker<C, TokioScheduler>,
    ticks: mpsc::UnboundedReceiver<Tick>,
    renderer: Renderer<Tz>,
    live_display: bool,
}

impl<C, Tz> Widget<C, Tz>
where
    C: Clock,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn new(clock: C, renderer: Renderer<Tz>, live_display: bool) -> Self {
        let (scheduler, ticks) = TokioScheduler::channel();
        Self {
            tracker: Tracker::new(clock, scheduler),
            ticks,
            renderer,
            live_display,
        }
    }

    pub const fn tracker(&self) -> &Tracker<C, TokioScheduler> {
        &self.tracker
    }

    /// Sets the task name without printing anything.
    pub fn preset_task(&mut self, name: impl Into<String>) {
        // Setting the name cannot fail.
        let _ = self.tracker.dispatch(Intent::SetTaskName(name.into()));
    }

    /// Runs until `quit` or end of input, then prints a summary.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        write!(out, "{}", self.renderer.render(&self.tracker.view()))?;
        writeln!(out, "Type 'help' for commands.")?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        tracing::debug!("end of input");
                        break;
                    };
                    if self.handle_command(parse_line(&line), out)?.is_break() {
                        break;
                    }
                }
                Some(Tick) = self.ticks.recv() => self.handle_tick(out)?,
            }
            out.flush().context("failed to flush output")?;
        }

        self.finish(out)?;
        out.flush().context("failed to flush output")?;
        Ok(())
    }

    // ========== Input ==========

    /// Applies one parsed command. Breaks on `quit`.
    pub fn handle_command<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<ControlFlow<()>> {
        let running = self.tracker.session().is_running();

        match command {
            Command::SetTask(name) => self.apply(Intent::SetTaskName(name), out)?,
            Command::Toggle => self.apply(Intent::ToggleStart, out)?,
            Command::Start if running => writeln!(out, "The timer is already running.")?,
            Command::Stop if !running => writeln!(out, "The timer is not running.")?,
            Command::Start | Command::Stop => self.apply(Intent::ToggleStart, out)?,
            Command::Save => {
                // Mirrors the disabled Save control; commit validates again.
                if running {
                    writeln!(out, "{}", commit_notice(CommitError::SessionStillRunning))?;
                } else if !self.tracker.view().can_save {
                    writeln!(out, "Nothing to save yet. Track some time first.")?;
                } else {
                    self.apply(Intent::Save, out)?;
                }
            }
            Command::List => write!(out, "{}", self.renderer.entries(self.tracker.entries()))?,
            Command::Json => {
                let json = serde_json::to_string_pretty(self.tracker.log())
                    .context("failed to serialize entries")?;
                writeln!(out, "{json}")?;
            }
            Command::Show => write!(out, "{}", self.renderer.render(&self.tracker.view()))?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(ControlFlow::Break(())),
            Command::Empty => {}
            Command::Unknown(word) => {
                writeln!(out, "Unknown command '{word}'. Type 'help' for commands.")?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn apply<W: Write>(&mut self, intent: Intent, out: &mut W) -> Result<()> {
        match self.tracker.dispatch(intent) {
            Ok(Outcome::Saved(entry)) => {
                writeln!(
                    out,
                    "Saved entry #{}: {} ({})",
                    entry.id(),
                    entry.task(),
                    format_duration(entry.duration_seconds())
                )?;
                write!(out, "{}", self.renderer.render(&self.tracker.view()))?;
            }
            Ok(outcome) => {
                tracing::debug!(?outcome, "intent applied");
                write!(out, "{}", self.renderer.header(&self.tracker.view()))?;
            }
            Err(err) => {
                tracing::debug!(%err, "save rejected");
                writeln!(out, "{}", commit_notice(err))?;
            }
        }
        Ok(())
    }

    // ========== Ticks ==========

    /// Recomputes elapsed time; prints the time line when it changed and
    /// live display is on.
    pub fn handle_tick<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let before = self.tracker.session().elapsed();
        if let Ok(Outcome::Ticked { elapsed }) = self.tracker.dispatch(Intent::Tick) {
            if self.live_display && self.tracker.session().is_running() && elapsed != before {
                writeln!(out, "{}", time_line(elapsed))?;
            }
        }
        Ok(())
    }

    // ========== Exit ==========

    /// Stops a running timer and reports unsaved time and saved totals.
    fn finish<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.tracker.session().is_running() {
            let _ = self.tracker.dispatch(Intent::ToggleStart);
        }
        let unsaved = self.tracker.session().elapsed();
        if unsaved > 0 {
            writeln!(out, "Discarding unsaved time: {}", format_duration(unsaved))?;
        }

        let log = self.tracker.log();
        if log.is_empty() {
            writeln!(out, "No time entries recorded.")?;
        } else {
            writeln!(
                out,
                "Session summary: {} {}, {} total",
                log.len(),
                if log.len() == 1 { "entry" } else { "entries" },
                format_duration(log.total_seconds())
            )?;
        }
        Ok(())
    }

    pub fn entries(&self) -> &[TimeEntry] {
        self.tracker.entries()
    }
}
