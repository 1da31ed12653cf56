//! Display helpers for rendering pipeline results in the CLI.

use chrono::{DateTime, Utc};

/// Compact human formatting for view/like/comment counts.
///
/// `1_234_567` → `"1.2M"`, `45_600` → `"45.6K"`, `999` → `"999"`.
#[must_use]
pub fn format_count(value: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let v = value as f64;
    if value >= 1_000_000 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Clock-style duration rendering: `"1h 2m"`, `"3m 05s"`, `"45s"`.
#[must_use]
pub fn seconds_to_clock(duration_seconds: u64) -> String {
    let hours = duration_seconds / 3600;
    let minutes = (duration_seconds % 3600) / 60;
    let seconds = duration_seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

/// Relative age of a publish timestamp, e.g. `"3 days ago"`.
#[must_use]
pub fn relative_age(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_days = (now - published_at).num_days();

    if diff_days <= 0 {
        return "today".to_string();
    }
    if diff_days == 1 {
        return "yesterday".to_string();
    }
    if diff_days < 7 {
        return format!("{diff_days} days ago");
    }
    if diff_days < 30 {
        return format!("{} weeks ago", diff_days / 7);
    }
    if diff_days < 365 {
        return format!("{} months ago", diff_days / 30);
    }
    format!("{} years ago", diff_days / 365)
}
