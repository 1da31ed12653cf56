//! Search profiles and the injectable discovery configuration.
//!
//! The profile set, quality modifiers, and content-quality patterns are
//! process-wide constants in production, but they are carried on
//! [`DiscoveryConfig`] and injected into the discovery orchestrator so tests
//! can substitute smaller tables.

use regex::Regex;

/// Result ordering requested from the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Relevance,
    Date,
    ViewCount,
}

impl Order {
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Order::Relevance => "relevance",
            Order::Date => "date",
            Order::ViewCount => "viewCount",
        }
    }
}

/// Coarse duration bucket understood by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    /// Under 4 minutes.
    Short,
    /// 4–20 minutes.
    Medium,
    /// Over 20 minutes.
    Long,
}

impl DurationBucket {
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            DurationBucket::Short => "short",
            DurationBucket::Medium => "medium",
            DurationBucket::Long => "long",
        }
    }
}

/// One (ordering, duration bucket, recency window) combination used to
/// diversify candidate collection.
#[derive(Debug, Clone)]
pub struct SearchProfile {
    pub order: Order,
    pub video_duration: Option<DurationBucket>,
    /// Recency window: only videos published within this many days match.
    pub published_after_days: i64,
    pub video_category_id: Option<String>,
}

/// Lookup tables and profile set consumed by the discovery orchestrator.
#[derive(Debug)]
pub struct DiscoveryConfig {
    /// Fixed profile set iterated per query, in priority order.
    pub profiles: Vec<SearchProfile>,
    /// Modifiers appended to a base query to broaden coverage.
    pub quality_modifiers: Vec<String>,
    /// Prefix for the freshness variant, skipped when already present.
    pub freshness_prefix: String,
    /// Patterns that disqualify a video by title/description/channel.
    pub low_quality_patterns: Vec<Regex>,
    /// Substrings that disqualify a video by tag.
    pub low_quality_tag_hints: Vec<String>,
    /// Technology markers used by the relevance gate and for forcing the
    /// Science & Technology search category.
    pub tech_markers: Vec<Regex>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        let profile = |order, video_duration, published_after_days| SearchProfile {
            order,
            video_duration,
            published_after_days,
            video_category_id: None,
        };

        Self {
            profiles: vec![
                profile(Order::ViewCount, Some(DurationBucket::Short), 45),
                profile(Order::Relevance, Some(DurationBucket::Short), 90),
                profile(Order::Date, Some(DurationBucket::Short), 30),
                profile(Order::ViewCount, Some(DurationBucket::Medium), 180),
                profile(Order::Relevance, Some(DurationBucket::Medium), 120),
                profile(Order::ViewCount, None, 365),
            ],
            quality_modifiers: [
                "аналитика",
                "обзор",
                "разбор трендов",
                "viral shorts",
                "короткое видео",
                "best cases",
                "case study",
                "explain",
                "podcast",
            ]
            .map(str::to_owned)
            .to_vec(),
            freshness_prefix: "новости".to_owned(),
            low_quality_patterns: ["детск", "kids?", "мульт", "мем", "roblox", "minecraft"]
                .iter()
                .map(|p| Regex::new(&format!("(?i){p}")).expect("valid low-quality regex"))
                .collect(),
            low_quality_tag_hints: ["kids", "детям", "мем", "мульт", "roblox", "игрушки"]
                .map(str::to_owned)
                .to_vec(),
            tech_markers: [
                "нейросет",
                "искусствен",
                "ai",
                "ml",
                "machine learning",
                "technology",
                "генератив",
            ]
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).expect("valid tech marker regex"))
            .collect(),
        }
    }
}

impl DiscoveryConfig {
    /// True when the query itself reads as technology content, in which case
    /// collection pins the Science & Technology category.
    #[must_use]
    pub fn is_tech_query(&self, query: &str) -> bool {
        self.tech_markers.iter().any(|m| m.is_match(query))
    }
}
