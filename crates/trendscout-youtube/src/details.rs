//! Batched detail fetching and conversion into video records.

use std::collections::HashMap;

use futures::stream::{self, StreamExt, TryStreamExt};
use trendscout_core::Video;

use crate::client::{YoutubeClient, MAX_PAGE_SIZE};
use crate::duration::{iso_duration_to_seconds, seconds_to_duration};
use crate::error::YoutubeError;
use crate::types::{Thumbnail, VideoItem};

/// Detail batches are independent of the pool budget, so they run with
/// bounded concurrency. `buffered` (not `buffer_unordered`) keeps output in
/// batch order, which keeps discovery output deterministic.
const DETAIL_BATCH_CONCURRENCY: usize = 4;

/// Thumbnail resolutions in preference order.
const THUMBNAIL_PRIORITY: [&str; 3] = ["maxres", "high", "default"];

/// Fetches full metadata for `ids` in page-sized batches and converts each
/// item into a [`Video`], preserving the input id order batch-wise.
///
/// # Errors
///
/// Returns [`YoutubeError`] if any batch request fails.
pub(crate) async fn fetch_details(
    client: &YoutubeClient,
    ids: &[String],
) -> Result<Vec<Video>, YoutubeError> {
    let batches: Vec<Vec<VideoItem>> = stream::iter(ids.chunks(MAX_PAGE_SIZE))
        .map(|batch| client.video_details(batch))
        .buffered(DETAIL_BATCH_CONCURRENCY)
        .try_collect()
        .await?;

    Ok(batches
        .into_iter()
        .flatten()
        .map(into_video)
        .collect())
}

fn into_video(item: VideoItem) -> Video {
    let (view_count, like_count, comment_count) = match &item.statistics {
        Some(stats) => (
            parse_count(stats.view_count.as_deref()),
            parse_count(stats.like_count.as_deref()),
            parse_count(stats.comment_count.as_deref()),
        ),
        None => (0, 0, 0),
    };

    let duration_seconds = item
        .content_details
        .as_ref()
        .and_then(|details| details.duration.as_deref())
        .map_or(0, iso_duration_to_seconds);

    let url = format!("https://www.youtube.com/watch?v={}", item.id);

    Video {
        id: item.id,
        title: item.snippet.title,
        description: item.snippet.description,
        channel_title: item.snippet.channel_title,
        published_at: item.snippet.published_at,
        thumbnail_url: pick_thumbnail(&item.snippet.thumbnails),
        tags: item.snippet.tags,
        view_count,
        like_count,
        comment_count,
        duration: seconds_to_duration(duration_seconds),
        duration_seconds,
        trend_score: trend_score(view_count, like_count, comment_count),
        url,
    }
}

/// Counters come over the wire as decimal strings; anything unparsable
/// (including absence) counts as 0.
fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok()).unwrap_or(0)
}

/// Highest-resolution thumbnail available, empty string when none.
fn pick_thumbnail(thumbnails: &HashMap<String, Thumbnail>) -> String {
    THUMBNAIL_PRIORITY
        .iter()
        .find_map(|key| thumbnails.get(*key).map(|t| t.url.clone()))
        .unwrap_or_default()
}

/// Raw popularity score at fetch time, clamped to 0–100.
///
/// `round(min(100, log10(views+1)*22 + log10(likes*2 + comments*3 + 10)*16))`
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn trend_score(view_count: u64, like_count: u64, comment_count: u64) -> u32 {
    let engagement = like_count.saturating_mul(2) + comment_count.saturating_mul(3);
    let base = ((view_count + 1) as f64).log10() * 22.0 + ((engagement + 10) as f64).log10() * 16.0;
    base.min(100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stats_floor_the_trend_score() {
        // log10(1)*22 + log10(10)*16 = 16
        assert_eq!(trend_score(0, 0, 0), 16);
    }

    #[test]
    fn trend_score_is_clamped_to_one_hundred() {
        assert_eq!(trend_score(u64::MAX / 4, u64::MAX / 4, u64::MAX / 8), 100);
    }

    #[test]
    fn trend_score_grows_with_engagement() {
        let quiet = trend_score(1_000_000, 0, 0);
        let engaged = trend_score(1_000_000, 50_000, 10_000);
        assert!(engaged > quiet, "engaged {engaged} vs quiet {quiet}");
    }

    #[test]
    fn parse_count_handles_missing_and_garbage() {
        assert_eq!(parse_count(Some("1234")), 1234);
        assert_eq!(parse_count(Some("not-a-number")), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn thumbnail_priority_prefers_maxres() {
        let mut thumbs = HashMap::new();
        thumbs.insert(
            "default".to_owned(),
            Thumbnail {
                url: "https://img/default.jpg".to_owned(),
            },
        );
        thumbs.insert(
            "maxres".to_owned(),
            Thumbnail {
                url: "https://img/maxres.jpg".to_owned(),
            },
        );
        assert_eq!(pick_thumbnail(&thumbs), "https://img/maxres.jpg");
        assert_eq!(pick_thumbnail(&HashMap::new()), "");
    }
}
