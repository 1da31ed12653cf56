//! Lenient normalization of the shooting-guide payload.
//!
//! The guide stage returns the loosest JSON of the four operations: list
//! fields arrive as strings, objects, scalars, or nothing. Normalization
//! coerces everything into the typed guide record instead of failing the
//! whole run on a sloppy field.

use serde_json::Value;
use trendscout_core::{ShootingGuide, ShootingTip};

/// Strips a leading `role:` artefact and collapses whitespace.
fn sanitize_text(value: &str) -> String {
    let trimmed = value.trim_start();
    let rest = match trimmed.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("role:") => &trimmed[5..],
        _ => trimmed,
    };
    rest.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitizes an optional string, mapping blank results to `None`.
fn sanitize_optional(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?;
    let sanitized = sanitize_text(text);
    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Coerces a free-form list into display strings: strings pass through
/// sanitized, objects fall back to their `title`/`name`/`summary`, anything
/// else is rendered as raw JSON. Empty results are dropped.
fn to_text_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(sanitize_text(text)),
            Value::Object(map) => {
                let label = ["title", "name", "summary"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_str));
                match label {
                    Some(text) => Some(sanitize_text(text)),
                    None => Some(item.to_string()),
                }
            }
            Value::Null => None,
            other => Some(sanitize_text(&other.to_string())),
        })
        .filter(|text| !text.is_empty())
        .collect()
}

/// Like [`to_text_list`] but accepts a scalar and wraps it into a one-item
/// list, matching how tip `tips`/`equipment` fields often arrive.
fn to_wrapped_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(_)) => to_text_list(value),
        Some(Value::Null) | None => Vec::new(),
        Some(scalar) => {
            let text = match scalar {
                Value::String(s) => sanitize_text(s),
                other => sanitize_text(&other.to_string()),
            };
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text]
            }
        }
    }
}

/// Normalizes the raw guide payload into the typed record.
#[must_use]
pub fn normalize_guide(raw: &Value) -> ShootingGuide {
    let tips = raw
        .get("tips")
        .and_then(Value::as_array)
        .map(|tips| {
            tips.iter()
                .enumerate()
                .map(|(index, tip)| normalize_tip(tip, index))
                .collect()
        })
        .unwrap_or_default();

    ShootingGuide {
        key_moments: to_text_list(raw.get("keyMoments")),
        production_calendar: to_text_list(raw.get("productionCalendar")),
        tips,
    }
}

fn normalize_tip(tip: &Value, index: usize) -> ShootingTip {
    ShootingTip {
        id: sanitize_optional(tip.get("id")).unwrap_or_else(|| format!("tip-{}", index + 1)),
        category: sanitize_optional(tip.get("category")).unwrap_or_else(|| "Советы".to_owned()),
        headline: sanitize_optional(tip.get("headline")).unwrap_or_else(|| "Шаги".to_owned()),
        summary: sanitize_optional(tip.get("summary")).unwrap_or_default(),
        tips: to_wrapped_list(tip.get("tips")),
        equipment: to_wrapped_list(tip.get("equipment")),
        backup_plan: tip.get("backupPlan").and_then(|value| {
            let text = match value {
                Value::String(s) => sanitize_text(s),
                Value::Null => String::new(),
                other => sanitize_text(&other.to_string()),
            };
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }),
    }
}
