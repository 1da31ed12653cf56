use thiserror::Error;
use trendscout_openai::OpenAiError;
use trendscout_youtube::YoutubeError;

use crate::stage::StageKey;

/// A stage-tagged pipeline failure.
///
/// Wraps whatever the stage's collaborator raised, names the failing stage,
/// and carries an optional corrective hint for the operator. The orchestrator
/// re-throws these without downgrading; retry is a caller-initiated full
/// re-run.
#[derive(Debug, Error)]
#[error("stage {stage} failed: {message}")]
pub struct PipelineError {
    pub stage: StageKey,
    pub message: String,
    pub hint: Option<String>,
}

impl PipelineError {
    /// Wraps a video-transport failure for the fetch stage with the
    /// retrieval-configuration hint.
    #[must_use]
    pub fn from_youtube(err: &YoutubeError) -> Self {
        tracing::error!(error = %err, "video search transport failed");
        Self {
            stage: StageKey::FetchVideos,
            message: "Ошибка запроса к YouTube API. Проверьте квоты и параметры поиска."
                .to_owned(),
            hint: Some(
                "Убедитесь, что ключ YouTube Data API активирован для методов search и videos."
                    .to_owned(),
            ),
        }
    }

    /// Wraps a text-generation failure for `stage`.
    ///
    /// Format errors are data problems, not quota problems, so they carry no
    /// hint; transport and API errors point at credentials and quota.
    #[must_use]
    pub fn from_openai(stage: StageKey, err: &OpenAiError) -> Self {
        let hint = if err.is_format_error() {
            None
        } else {
            Some("Verify OpenAI API credentials and quota.".to_owned())
        };
        Self {
            stage,
            message: err.to_string(),
            hint,
        }
    }
}
