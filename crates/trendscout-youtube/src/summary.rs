//! Trend-threshold partition of a ranked result set.

use trendscout_core::Video;

/// Trend score at which a video counts as a strong performer.
pub const TREND_THRESHOLD: u32 = 72;

/// Result-set split used by the CLI report.
#[derive(Debug, Clone)]
pub struct TrendSummary {
    pub total: usize,
    pub strong_performers: Vec<Video>,
    pub needs_improvement: Vec<Video>,
}

/// Partitions videos at [`TREND_THRESHOLD`] on the raw trend score.
#[must_use]
pub fn summarize_trends(videos: &[Video]) -> TrendSummary {
    let (strong_performers, needs_improvement): (Vec<Video>, Vec<Video>) = videos
        .iter()
        .cloned()
        .partition(|video| video.trend_score >= TREND_THRESHOLD);

    TrendSummary {
        total: videos.len(),
        strong_performers,
        needs_improvement,
    }
}
