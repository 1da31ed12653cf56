//! Stage keys, statuses, and the stage-update event contract.

use serde::Serialize;

/// The five pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageKey {
    GenerateQueries,
    FetchVideos,
    AnalyzePopularity,
    CreateScenarios,
    GenerateTips,
}

impl StageKey {
    /// Execution order; also the order progress snapshots list stages in.
    pub const ORDER: [StageKey; 5] = [
        StageKey::GenerateQueries,
        StageKey::FetchVideos,
        StageKey::AnalyzePopularity,
        StageKey::CreateScenarios,
        StageKey::GenerateTips,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StageKey::GenerateQueries => "generateQueries",
            StageKey::FetchVideos => "fetchVideos",
            StageKey::AnalyzePopularity => "analyzePopularity",
            StageKey::CreateScenarios => "createScenarios",
            StageKey::GenerateTips => "generateTips",
        }
    }

    /// Display label shown to the operator.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StageKey::GenerateQueries => "Генерация запросов ИИ",
            StageKey::FetchVideos => "Поиск видео на YouTube",
            StageKey::AnalyzePopularity => "Анализ популярности",
            StageKey::CreateScenarios => "Создание сценариев",
            StageKey::GenerateTips => "Гид по съёмке",
        }
    }
}

impl std::fmt::Display for StageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Idle,
    Running,
    Success,
    Error,
}

/// The sole notification contract between the orchestrator and observers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageUpdate {
    pub stage: StageKey,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl StageUpdate {
    #[must_use]
    pub fn running(stage: StageKey) -> Self {
        Self {
            stage,
            status: StageStatus::Running,
            error_message: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn success(stage: StageKey) -> Self {
        Self {
            stage,
            status: StageStatus::Success,
            error_message: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn error(stage: StageKey, message: String, hint: Option<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Error,
            error_message: Some(message),
            hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_lists_all_five_stages_once() {
        assert_eq!(StageKey::ORDER.len(), 5);
        assert_eq!(StageKey::ORDER[0], StageKey::GenerateQueries);
        assert_eq!(StageKey::ORDER[4], StageKey::GenerateTips);
    }

    #[test]
    fn wire_names_are_camel_case() {
        assert_eq!(StageKey::FetchVideos.as_str(), "fetchVideos");
        let json = serde_json::to_string(&StageKey::AnalyzePopularity).unwrap();
        assert_eq!(json, "\"analyzePopularity\"");
    }
}
