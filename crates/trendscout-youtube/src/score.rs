//! Composite ranking score for discovery output.
//!
//! Distinct from the raw trend score computed at fetch time: the ranking
//! score folds in engagement ratio, recency, short-form and virality
//! bonuses, and a logarithmic view boost, and is what the final sort uses.

use chrono::{DateTime, Utc};
use trendscout_core::Video;

use crate::filter::{is_short_form, is_viral, is_viral_short};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Composite ranking score. Higher ranks earlier.
///
/// `now` is the single run timestamp so that scoring — and therefore the
/// final ordering — is stable across the whole sort.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn ranking_score(video: &Video, now: DateTime<Utc>) -> i64 {
    let views = video.view_count as f64;
    let engagement =
        (video.like_count as f64 + video.comment_count as f64 * 2.0) / views.max(1.0);

    let age_days = (now - video.published_at).num_seconds() as f64 / SECONDS_PER_DAY;
    let recency_boost = if age_days <= 30.0 {
        25.0
    } else if age_days <= 90.0 {
        12.0
    } else if age_days <= 180.0 {
        6.0
    } else {
        0.0
    };

    let short_boost = if is_short_form(video) {
        18.0
    } else if video.duration_seconds <= 240 {
        6.0
    } else {
        0.0
    };

    let viral_boost = if is_viral_short(video) {
        30.0
    } else if is_viral(video) {
        10.0
    } else {
        0.0
    };

    let view_boost = (views + 1.0).log10() * 30.0;

    (f64::from(video.trend_score) + engagement * 420.0
        + recency_boost
        + short_boost
        + viral_boost
        + view_boost)
        .round() as i64
}
