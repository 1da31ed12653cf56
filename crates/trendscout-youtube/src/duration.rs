//! ISO 8601 duration handling for `/videos` content details.
//!
//! The API encodes durations as `PT#H#M#S` with zero-value fields omitted
//! (`PT45S`, `PT1H2M3S`, bare `PT` for zero-length streams).

/// Decodes a compact ISO 8601 duration into total seconds.
///
/// Unrecognised input and the empty `PT` form decode to 0, matching how
/// missing content details are treated upstream.
#[must_use]
pub fn iso_duration_to_seconds(iso_duration: &str) -> u64 {
    let Some(start) = iso_duration.find("PT") else {
        return 0;
    };

    let mut total: u64 = 0;
    let mut value: u64 = 0;
    for ch in iso_duration[start + 2..].chars() {
        if let Some(digit) = ch.to_digit(10) {
            value = value.saturating_mul(10).saturating_add(u64::from(digit));
            continue;
        }
        match ch {
            'H' => total = total.saturating_add(value.saturating_mul(3600)),
            'M' => total = total.saturating_add(value.saturating_mul(60)),
            'S' => total = total.saturating_add(value),
            _ => break,
        }
        value = 0;
    }
    total
}

/// Human-readable duration used on the video record: `"1h 2m"`, `"3m 5s"`, `"45s"`.
#[must_use]
pub fn seconds_to_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        return format!("{hours}h {minutes}m");
    }
    if minutes > 0 {
        return format!("{minutes}m {secs}s");
    }
    format!("{secs}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_duration() {
        assert_eq!(iso_duration_to_seconds("PT1H2M3S"), 3723);
    }

    #[test]
    fn decodes_seconds_only() {
        assert_eq!(iso_duration_to_seconds("PT45S"), 45);
    }

    #[test]
    fn decodes_minutes_only() {
        assert_eq!(iso_duration_to_seconds("PT4M"), 240);
    }

    #[test]
    fn decodes_hours_without_seconds() {
        assert_eq!(iso_duration_to_seconds("PT2H30M"), 9000);
    }

    #[test]
    fn empty_pt_decodes_to_zero() {
        assert_eq!(iso_duration_to_seconds("PT"), 0);
    }

    #[test]
    fn garbage_decodes_to_zero() {
        assert_eq!(iso_duration_to_seconds(""), 0);
        assert_eq!(iso_duration_to_seconds("not-a-duration"), 0);
    }

    #[test]
    fn renders_human_durations() {
        assert_eq!(seconds_to_duration(0), "0s");
        assert_eq!(seconds_to_duration(45), "45s");
        assert_eq!(seconds_to_duration(185), "3m 5s");
        assert_eq!(seconds_to_duration(3723), "1h 2m");
    }
}
