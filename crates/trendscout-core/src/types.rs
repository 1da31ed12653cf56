use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A video candidate fetched from the search transport.
///
/// Immutable once fetched; statistics reflect the values at fetch time.
/// Serialized with camelCase field names — the same shape the analysis
/// stage sends to the text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: String,
    pub tags: Vec<String>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// Human-readable duration, e.g. `"1h 2m"` or `"45s"`.
    pub duration: String,
    pub duration_seconds: u64,
    /// Raw popularity score computed at fetch time, clamped to 0–100.
    /// Distinct from the ranking score used to order discovery output.
    pub trend_score: u32,
    pub url: String,
}

/// Sentiment classification returned by the popularity analysis stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Risk classification returned by the popularity analysis stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One weighted driver behind a video's popularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularityFactor {
    pub factor: String,
    pub weight: f32,
    pub insight: String,
}

/// Per-video analysis produced by the text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityAnalysis {
    pub video_id: String,
    pub summary: String,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub factors: Vec<PopularityFactor>,
}

/// A single beat inside a scenario's narrative arc.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioBeat {
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
}

/// A narrative scenario built from the popularity analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub hook: String,
    pub target_audience: String,
    pub call_to_action: String,
    pub visual_style: String,
    pub narrative: String,
    #[serde(default)]
    pub beats: Vec<ScenarioBeat>,
}

/// One production tip block inside the shooting guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootingTip {
    pub id: String,
    pub category: String,
    pub headline: String,
    pub summary: String,
    pub tips: Vec<String>,
    pub equipment: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_plan: Option<String>,
}

/// Production guide assembled from the accepted scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootingGuide {
    pub key_moments: Vec<String>,
    pub production_calendar: Vec<String>,
    pub tips: Vec<ShootingTip>,
}

/// Accumulated output of a full pipeline run.
///
/// Built incrementally by the orchestrator; owned by the caller once the
/// run completes or fails.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub queries: Vec<String>,
    pub videos: Vec<Video>,
    pub analysis: Vec<PopularityAnalysis>,
    pub scenarios: Vec<Scenario>,
    pub guide: Option<ShootingGuide>,
}

const MIN_QUERY_CHARS: usize = 3;
const MAX_QUERY_CHARS: usize = 120;
const MIN_REQUEST_COUNT: usize = 10;
const MAX_REQUEST_COUNT: usize = 1000;

/// Validated pipeline input: a topic seed and a target result count.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    search_query: String,
    request_count: usize,
}

impl PipelineRequest {
    /// Validate and construct a pipeline request.
    ///
    /// The query is trimmed before its length is checked.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the trimmed query is outside 3–120
    /// characters or the count is outside 10–1000.
    pub fn new(search_query: &str, request_count: usize) -> Result<Self, ValidationError> {
        let trimmed = search_query.trim();
        let chars = trimmed.chars().count();
        if chars < MIN_QUERY_CHARS {
            return Err(ValidationError::QueryTooShort);
        }
        if chars > MAX_QUERY_CHARS {
            return Err(ValidationError::QueryTooLong);
        }
        if !(MIN_REQUEST_COUNT..=MAX_REQUEST_COUNT).contains(&request_count) {
            return Err(ValidationError::CountOutOfRange(request_count));
        }
        Ok(Self {
            search_query: trimmed.to_string(),
            request_count,
        })
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_query_before_validating() {
        let req = PipelineRequest::new("  нейросети  ", 100).expect("valid request");
        assert_eq!(req.search_query(), "нейросети");
        assert_eq!(req.request_count(), 100);
    }

    #[test]
    fn request_rejects_short_query() {
        let result = PipelineRequest::new("  ai ", 100);
        assert!(matches!(result, Err(ValidationError::QueryTooShort)));
    }

    #[test]
    fn request_counts_characters_not_bytes() {
        // Three Cyrillic characters are six bytes but still a valid query.
        let result = PipelineRequest::new("ИИИ", 100);
        assert!(result.is_ok(), "got: {result:?}");
    }

    #[test]
    fn request_rejects_long_query() {
        let long = "a".repeat(121);
        let result = PipelineRequest::new(&long, 100);
        assert!(matches!(result, Err(ValidationError::QueryTooLong)));
    }

    #[test]
    fn request_accepts_boundary_counts() {
        assert!(PipelineRequest::new("нейросети", 10).is_ok());
        assert!(PipelineRequest::new("нейросети", 1000).is_ok());
    }

    #[test]
    fn request_rejects_out_of_range_counts() {
        assert!(matches!(
            PipelineRequest::new("нейросети", 9),
            Err(ValidationError::CountOutOfRange(9))
        ));
        assert!(matches!(
            PipelineRequest::new("нейросети", 1001),
            Err(ValidationError::CountOutOfRange(1001))
        ));
    }

    #[test]
    fn analysis_round_trips_camel_case_wire_names() {
        let json = serde_json::json!({
            "videoId": "abc",
            "summary": "короткий разбор",
            "sentiment": "positive",
            "opportunities": ["серия шортсов"],
            "riskLevel": "low",
            "factors": [{ "factor": "хук", "weight": 0.8, "insight": "сильное начало" }]
        });
        let analysis: PopularityAnalysis = serde_json::from_value(json).expect("deserialize");
        assert_eq!(analysis.video_id, "abc");
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.factors.len(), 1);
    }

    #[test]
    fn analysis_defaults_missing_lists_to_empty() {
        let json = serde_json::json!({
            "videoId": "abc",
            "summary": "s",
            "sentiment": "neutral",
            "riskLevel": "medium"
        });
        let analysis: PopularityAnalysis = serde_json::from_value(json).expect("deserialize");
        assert!(analysis.opportunities.is_empty());
        assert!(analysis.factors.is_empty());
    }
}
