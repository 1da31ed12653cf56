//! HTTP client for the chat-completions API and the four pipeline
//! operations built on it.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use trendscout_core::{PopularityAnalysis, Scenario, ShootingGuide, Video};

use crate::error::OpenAiError;
use crate::json::extract_json;
use crate::normalize::normalize_guide;
use crate::queries::clean_queries;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
const MODEL: &str = "gpt-4.1-mini";
const TEMPERATURE: f64 = 0.4;

/// At most this many videos are condensed into the analysis prompt.
const MAX_ANALYSIS_VIDEOS: usize = 20;
/// Description excerpt length inside the condensed payload.
const MAX_DESCRIPTION_CHARS: usize = 300;
/// At most this many tags per condensed video.
const MAX_ANALYSIS_TAGS: usize = 10;
/// At most this many analyses feed scenario creation.
const MAX_SCENARIO_ANALYSES: usize = 10;

const GENERATE_QUERIES_PROMPT: &str = "Ты — эксперт по росту YouTube-каналов на русском языке. \
На основе исходного запроса верни JSON вида { \"queries\": string[] } с релевантными поисковыми \
фразами (только по теме пользователя, без политики, астрологии, автомобилей и т.п.). Уточняй, \
что искать именно про технологии/ИИ, избегай развлекательных подсказок. Добавляй короткие и \
длинные ключи, но не более 12 штук.";

const ANALYZE_POPULARITY_PROMPT: &str = "Ты аналитик контента на русском языке. Верни JSON \
{ \"analyses\": Analysis[] }, где каждый элемент содержит videoId, summary, sentiment, \
opportunities[], riskLevel, factors[]. Пиши кратко по-русски, используй sentiment только из \
positive|neutral|negative и riskLevel из low|medium|high. Сосредоточься на экспертных выводах.";

const CREATE_SCENARIOS_PROMPT: &str = "Ты креативный директор. Верни JSON \
{ \"scenarios\": Scenario[] } (на русском языке). Каждый сценарий: id, title, hook, \
targetAudience, callToAction, visualStyle, narrative, beats[] с title, description, \
durationSeconds. Держись исходной тематики и избегай эзотерики/политики.";

const GENERATE_GUIDE_PROMPT: &str = "Ты производственный консультант. Верни JSON с keyMoments[], \
productionCalendar[], tips[] (id, category, headline, summary, tips[], equipment[], optional \
backupPlan). Все текстовые поля — на русском и по теме исходного запроса.";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueriesEnvelope {
    #[serde(default)]
    queries: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AnalysesEnvelope {
    analyses: Vec<PopularityAnalysis>,
}

#[derive(Debug, Deserialize)]
struct ScenariosEnvelope {
    scenarios: Vec<Scenario>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Credentials are injected at construction; rotating a key means building a
/// fresh client. Use [`OpenAiClient::with_base_url`] to point at a mock
/// server in tests.
pub struct OpenAiClient {
    client: Client,
    base_url: Url,
}

impl OpenAiClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OpenAiError::Api`] if the credentials do
    /// not form valid header values.
    pub fn new(
        api_key: &str,
        project_id: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, OpenAiError> {
        Self::with_base_url(api_key, project_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`OpenAiClient::new`], plus [`OpenAiError::Api`] when
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        project_id: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, OpenAiError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| OpenAiError::Api(format!("invalid API key header: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        if let Some(project) = project_id {
            let value = HeaderValue::from_str(project)
                .map_err(|e| OpenAiError::Api(format!("invalid project header: {e}")))?;
            headers.insert("OpenAI-Project", value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trendscout/0.1 (content-discovery)")
            .default_headers(headers)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| OpenAiError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Generates cleaned search queries for a topic seed.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError`] on transport failure, API error, or a
    /// malformed completion.
    pub async fn generate_queries(
        &self,
        seed: &str,
        request_count: usize,
    ) -> Result<Vec<String>, OpenAiError> {
        let payload = json!({
            "searchQuery": seed,
            "targetVideoCount": request_count,
        });
        let envelope: QueriesEnvelope = self
            .chat_json("generate_queries", GENERATE_QUERIES_PROMPT, &payload)
            .await?;

        let cleaned = clean_queries(seed, envelope.queries);
        tracing::debug!(count = cleaned.len(), "generated search queries");
        Ok(cleaned)
    }

    /// Analyzes why the strongest videos perform, one entry per video id.
    ///
    /// Only the top [`MAX_ANALYSIS_VIDEOS`] are condensed into the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError`] on transport failure, API error, or a
    /// malformed completion.
    pub async fn analyze_popularity(
        &self,
        videos: &[Video],
    ) -> Result<Vec<PopularityAnalysis>, OpenAiError> {
        let condensed: Vec<Value> = videos
            .iter()
            .take(MAX_ANALYSIS_VIDEOS)
            .map(|video| {
                json!({
                    "id": video.id,
                    "title": video.title,
                    "description": video.description.chars().take(MAX_DESCRIPTION_CHARS).collect::<String>(),
                    "stats": {
                        "viewCount": video.view_count,
                        "likeCount": video.like_count,
                        "commentCount": video.comment_count,
                    },
                    "tags": video.tags.iter().take(MAX_ANALYSIS_TAGS).collect::<Vec<_>>(),
                    "publishedAt": video.published_at,
                })
            })
            .collect();

        let envelope: AnalysesEnvelope = self
            .chat_json(
                "analyze_popularity",
                ANALYZE_POPULARITY_PROMPT,
                &json!({ "videos": condensed }),
            )
            .await?;
        tracing::debug!(count = envelope.analyses.len(), "analyzed popularity");
        Ok(envelope.analyses)
    }

    /// Builds narrative scenarios from the first [`MAX_SCENARIO_ANALYSES`]
    /// analyses.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError`] on transport failure, API error, or a
    /// malformed completion.
    pub async fn create_scenarios(
        &self,
        analyses: &[PopularityAnalysis],
    ) -> Result<Vec<Scenario>, OpenAiError> {
        let capped = &analyses[..analyses.len().min(MAX_SCENARIO_ANALYSES)];
        let envelope: ScenariosEnvelope = self
            .chat_json(
                "create_scenarios",
                CREATE_SCENARIOS_PROMPT,
                &json!({ "analyses": capped }),
            )
            .await?;
        tracing::debug!(count = envelope.scenarios.len(), "created scenarios");
        Ok(envelope.scenarios)
    }

    /// Produces the production guide for the accepted scenarios.
    ///
    /// The payload is normalized leniently — see [`normalize_guide`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenAiError`] on transport failure, API error, or a
    /// malformed completion.
    pub async fn generate_shooting_guide(
        &self,
        scenarios: &[Scenario],
    ) -> Result<ShootingGuide, OpenAiError> {
        let raw: Value = self
            .chat_json(
                "generate_shooting_guide",
                GENERATE_GUIDE_PROMPT,
                &json!({ "scenarios": scenarios }),
            )
            .await?;
        let guide = normalize_guide(&raw);
        tracing::debug!(tips = guide.tips.len(), "generated shooting guide");
        Ok(guide)
    }

    /// Sends one chat-completions request and deserializes the JSON span of
    /// the completion text into `T`.
    async fn chat_json<T: serde::de::DeserializeOwned>(
        &self,
        context: &str,
        system_prompt: &str,
        user_payload: &Value,
    ) -> Result<T, OpenAiError> {
        let url = self
            .base_url
            .join("chat/completions")
            .map_err(|e| OpenAiError::Api(format!("invalid endpoint: {e}")))?;

        let body = json!({
            "model": MODEL,
            "temperature": TEMPERATURE,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_payload.to_string() },
            ],
        });

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(OpenAiError::Api(extract_api_error(&text, status)));
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| OpenAiError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .ok_or(OpenAiError::EmptyCompletion)?;

        let span = extract_json(&content)?;
        serde_json::from_str(span).map_err(|e| OpenAiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Pulls `error.message` out of an API error payload, falling back to the
/// HTTP status line.
fn extract_api_error(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_api_error_prefers_payload_message() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "auth"}}"#;
        assert_eq!(
            extract_api_error(body, reqwest::StatusCode::UNAUTHORIZED),
            "Invalid API key"
        );
    }

    #[test]
    fn extract_api_error_falls_back_to_status() {
        assert_eq!(
            extract_api_error("<html>", reqwest::StatusCode::BAD_GATEWAY),
            "HTTP 502 Bad Gateway"
        );
    }
}
