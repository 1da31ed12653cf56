//! Classification predicates and the quality filter.

use regex::Regex;
use trendscout_core::Video;

use crate::keywords::SeedKeywords;
use crate::profiles::DiscoveryConfig;

/// Views at which a video counts as viral.
pub const VIRAL_VIEW_THRESHOLD: u64 = 750_000;
/// Fallback threshold: shorts above this still carry momentum signal.
pub const MOMENTUM_VIEW_THRESHOLD: u64 = 200_000;
/// Maximum duration of a short-form video.
pub const SHORT_DURATION_LIMIT_SECS: u64 = 90;

fn content_haystack(video: &Video) -> String {
    format!(
        "{} {} {}",
        video.title,
        video.description,
        video.tags.join(" ")
    )
    .to_lowercase()
}

/// Short-form: at most 90 seconds, or tagged with a `#shorts`-style marker
/// anywhere in title/description/tags ("short", "shorts", "#shorts").
#[must_use]
pub fn is_short_form(video: &Video) -> bool {
    video.duration_seconds <= SHORT_DURATION_LIMIT_SECS
        || content_haystack(video).contains("short")
}

#[must_use]
pub fn is_viral(video: &Video) -> bool {
    video.view_count >= VIRAL_VIEW_THRESHOLD
}

#[must_use]
pub fn is_viral_short(video: &Video) -> bool {
    is_short_form(video) && is_viral(video)
}

/// Shorts below the viral bar that still clear the momentum threshold.
#[must_use]
pub fn is_momentum_short(video: &Video) -> bool {
    is_short_form(video) && video.view_count >= MOMENTUM_VIEW_THRESHOLD
}

/// Disqualifies children's content, memes, certain game franchises, and
/// videos with neither viral nor short-form signal below the momentum bar.
#[must_use]
pub fn is_low_quality(video: &Video, config: &DiscoveryConfig) -> bool {
    let haystack = format!(
        "{} {} {}",
        video.title, video.description, video.channel_title
    )
    .to_lowercase();
    if config
        .low_quality_patterns
        .iter()
        .any(|pattern| pattern.is_match(&haystack))
    {
        return true;
    }
    if video.tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        config
            .low_quality_tag_hints
            .iter()
            .any(|hint| tag.contains(hint.as_str()))
    }) {
        return true;
    }
    !is_viral(video) && !is_short_form(video) && video.view_count < MOMENTUM_VIEW_THRESHOLD
}

/// Relevance gate applied before a video is admitted to the pool.
///
/// Passes when the seed set is empty, when any seed keyword appears as a
/// substring of the case-folded title/description/tags, or when the text
/// matches a technology marker.
#[must_use]
pub fn matches_keywords(
    video: &Video,
    keywords: &SeedKeywords,
    tech_markers: &[Regex],
) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let haystack = content_haystack(video);
    let matches_lexical = keywords
        .matching_pool()
        .iter()
        .any(|keyword| haystack.contains(keyword.as_str()));
    matches_lexical || tech_markers.iter().any(|marker| marker.is_match(&haystack))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn video(id: &str) -> Video {
        Video {
            id: id.to_owned(),
            title: "Разбор трендов".to_owned(),
            description: String::new(),
            channel_title: "Канал".to_owned(),
            published_at: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
            thumbnail_url: String::new(),
            tags: Vec::new(),
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            duration: "45s".to_owned(),
            duration_seconds: 45,
            trend_score: 0,
            url: format!("https://www.youtube.com/watch?v={id}"),
        }
    }

    #[test]
    fn short_duration_is_short_form() {
        let mut v = video("a");
        v.duration_seconds = 90;
        assert!(is_short_form(&v));
        v.duration_seconds = 91;
        assert!(!is_short_form(&v));
    }

    #[test]
    fn shorts_tag_marks_long_video_as_short_form() {
        let mut v = video("a");
        v.duration_seconds = 600;
        v.tags = vec!["#Shorts".to_owned()];
        assert!(is_short_form(&v));
    }

    #[test]
    fn viral_short_classification() {
        let mut v = video("a");
        v.duration_seconds = 30;
        v.tags = vec!["#shorts".to_owned()];
        v.view_count = 1_000_000;
        assert!(is_viral_short(&v));
        assert!(is_momentum_short(&v));
    }

    #[test]
    fn momentum_short_below_viral_bar() {
        let mut v = video("a");
        v.view_count = 250_000;
        assert!(is_momentum_short(&v));
        assert!(!is_viral(&v));
    }

    #[test]
    fn kids_pattern_is_low_quality() {
        let config = DiscoveryConfig::default();
        let mut v = video("a");
        v.title = "Мультики для детской аудитории".to_owned();
        assert!(is_low_quality(&v, &config));
    }

    #[test]
    fn tag_hint_is_low_quality() {
        let config = DiscoveryConfig::default();
        let mut v = video("a");
        v.view_count = 900_000;
        v.tags = vec!["Roblox let's play".to_owned()];
        assert!(is_low_quality(&v, &config));
    }

    #[test]
    fn long_tail_video_without_signal_is_low_quality() {
        let config = DiscoveryConfig::default();
        let mut v = video("a");
        v.duration_seconds = 1200;
        v.view_count = 150_000;
        assert!(is_low_quality(&v, &config));
    }

    #[test]
    fn viral_long_video_survives_the_filter() {
        let config = DiscoveryConfig::default();
        let mut v = video("a");
        v.duration_seconds = 1200;
        v.view_count = 800_000;
        assert!(!is_low_quality(&v, &config));
    }

    #[test]
    fn empty_seed_matches_everything() {
        let config = DiscoveryConfig::default();
        let keywords = SeedKeywords::default();
        assert!(matches_keywords(&video("a"), &keywords, &config.tech_markers));
    }

    #[test]
    fn lexical_keyword_matches_substring_of_text() {
        let config = DiscoveryConfig::default();
        let keywords = SeedKeywords::from_seed("кулинарные рецепты");
        let mut v = video("a");
        v.title = "Лучшие РЕЦЕПТЫ недели".to_owned();
        assert!(matches_keywords(&v, &keywords, &config.tech_markers));

        v.title = "Городские новости".to_owned();
        assert!(!matches_keywords(&v, &keywords, &config.tech_markers));
    }

    #[test]
    fn tech_marker_matches_without_lexical_hit() {
        let config = DiscoveryConfig::default();
        let keywords = SeedKeywords::from_seed("кулинарные рецепты");
        let mut v = video("a");
        v.description = "Генеративные модели в кулинарии".to_owned();
        assert!(matches_keywords(&v, &keywords, &config.tech_markers));
    }
}
