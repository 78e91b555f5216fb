//! Display formatting for durations and timestamps.

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};

/// Default pattern for rendering entry timestamps.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats whole seconds as `"<minutes> min <seconds> sec"`.
///
/// There is no hours unit: 3725 seconds renders as `"62 min 5 sec"`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{mins} min {secs} sec")
}

/// Renders a stored UTC timestamp in the given timezone.
///
/// Falls back to [`DEFAULT_DATE_FORMAT`] if `pattern` cannot be formatted;
/// see [`is_valid_date_format`].
pub fn format_timestamp<Tz>(timestamp: DateTime<Utc>, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let local = timestamp.with_timezone(tz);
    let mut output = String::new();
    if write!(output, "{}", local.format(pattern)).is_ok() {
        return output;
    }
    tracing::warn!(pattern, "unformattable date pattern, using default");
    local.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Returns true if `pattern` can be used to format a timestamp.
///
/// `to_string()` on a chrono format panics when an item fails, and some
/// items parse fine but only work for parsing (`%#z`). Patterns from user
/// configuration are therefore checked by formatting a sample instant.
#[must_use]
pub fn is_valid_date_format(pattern: &str) -> bool {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let sample = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();
    let mut output = String::new();
    write!(output, "{}", sample.format(pattern)).is_ok()
}
