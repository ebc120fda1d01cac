use chrono::Duration;

/// Elapsed times below this many seconds are shown as plain seconds.
pub const MINUTES_THRESHOLD_SECS: i64 = 120;

/// Formats a session timer: `"45s"` below two minutes, `"2m 5s"` from there on.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    if secs < MINUTES_THRESHOLD_SECS {
        return format!("{secs}s");
    }
    format!("{}m {}s", secs / 60, secs % 60)
}
