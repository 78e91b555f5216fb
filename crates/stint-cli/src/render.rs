//! Text rendering of the tracker widget.

use std::fmt::{self, Write};

use chrono::TimeZone;
use stint_core::{TimeEntry, TrackerView, format_duration, format_timestamp};

/// Shown in place of the table when nothing has been saved.
pub const EMPTY_STATE: &str = "No time entries yet. Start tracking!";

/// Renders tracker views as plain text.
#[derive(Debug, Clone)]
pub struct Renderer<Tz: TimeZone> {
    date_format: String,
    tz: Tz,
}

impl<Tz> Renderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    /// `date_format` must already be validated.
    pub fn new(date_format: impl Into<String>, tz: Tz) -> Self {
        Self {
            date_format: date_format.into(),
            tz,
        }
    }

    /// The whole widget: controls followed by the entries table.
    pub fn render(&self, view: &TrackerView<'_>) -> String {
        let mut output = self.header(view);
        output.push('\n');
        output.push_str(&self.entries(view.entries));
        output
    }

    /// Title, current task, time and control states.
    pub fn header(&self, view: &TrackerView<'_>) -> String {
        let mut output = String::new();
        let task = if view.task_name.is_empty() {
            "N/A"
        } else {
            view.task_name
        };
        let save = if view.can_save {
            "[Save]"
        } else {
            "[Save (disabled)]"
        };

        writeln!(output, "Time Tracker").unwrap();
        writeln!(output, "Current Task: {task}").unwrap();
        writeln!(output, "{}", time_line(view.elapsed_seconds)).unwrap();
        writeln!(output, "Status: {}  [{}]  {save}", view.status, view.toggle_label).unwrap();
        output
    }

    /// The entries table, or the empty-state message.
    pub fn entries(&self, entries: &[TimeEntry]) -> String {
        let mut output = String::new();
        writeln!(output, "Time Entries").unwrap();

        if entries.is_empty() {
            writeln!(output, "{EMPTY_STATE}").unwrap();
            return output;
        }

        let rows: Vec<[String; 4]> = entries
            .iter()
            .map(|e| {
                [
                    e.id().to_string(),
                    e.task().to_string(),
                    format_duration(e.duration_seconds()),
                    format_timestamp(e.created_at(), &self.tz, &self.date_format),
                ]
            })
            .collect();

        let header = ["#", "Task", "Duration", "Date"].map(String::from);
        let mut widths = header.each_ref().map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for row in std::iter::once(&header).chain(&rows) {
            writeln!(
                output,
                "{:<w0$}  {:<w1$}  {:<w2$}  {}",
                row[0],
                row[1],
                row[2],
                row[3],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
            )
            .unwrap();
        }

        let total: u64 = entries.iter().map(TimeEntry::duration_seconds).sum();
        writeln!(output, "Total: {}", format_duration(total)).unwrap();
        output
    }
}

/// The single line that changes on every tick.
pub fn time_line(elapsed_seconds: u64) -> String {
    format!("Time: {}", format_duration(elapsed_seconds))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use insta::assert_snapshot;
    use stint_core::{EntryLog, NewEntry, Status};

    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn renderer() -> Renderer<Utc> {
        Renderer::new("%Y-%m-%d %H:%M:%S", Utc)
    }

    fn sample_log() -> EntryLog {
        let mut log = EntryLog::new();
        log.append(NewEntry {
            task: "Write report".into(),
            duration_seconds: 125,
            created_at: at("2025-03-01T09:02:05Z"),
        });
        log.append(NewEntry {
            task: "Review".into(),
            duration_seconds: 30,
            created_at: at("2025-03-01T09:10:00Z"),
        });
        log
    }

    #[test]
    fn test_idle_widget_with_no_entries() {
        let view = TrackerView {
            status: Status::Idle,
            task_name: "",
            elapsed_seconds: 0,
            can_save: false,
            toggle_label: "Start",
            entries: &[],
        };

        assert_snapshot!(renderer().render(&view), @r"
        Time Tracker
        Current Task: N/A
        Time: 0 min 0 sec
        Status: idle  [Start]  [Save (disabled)]

        Time Entries
        No time entries yet. Start tracking!
        ");
    }

    #[test]
    fn test_stopped_widget_with_entries() {
        let log = sample_log();
        let view = TrackerView {
            status: Status::Stopped,
            task_name: "Plan sprint",
            elapsed_seconds: 61,
            can_save: true,
            toggle_label: "Start",
            entries: log.all(),
        };

        assert_snapshot!(renderer().render(&view), @r"
        Time Tracker
        Current Task: Plan sprint
        Time: 1 min 1 sec
        Status: stopped  [Start]  [Save]

        Time Entries
        #  Task          Duration      Date
        1  Write report  2 min 5 sec   2025-03-01 09:02:05
        2  Review        0 min 30 sec  2025-03-01 09:10:00
        Total: 2 min 35 sec
        ");
    }

    #[test]
    fn test_entries_use_configured_timezone_and_format() {
        let log = sample_log();
        let plus_one = chrono::FixedOffset::east_opt(3600).unwrap();
        let output = Renderer::new("%H:%M", plus_one).entries(log.all());

        assert!(output.contains("10:02"));
        assert!(output.contains("10:10"));
    }

    #[test]
    fn test_time_line() {
        assert_eq!(time_line(125), "Time: 2 min 5 sec");
    }
}
