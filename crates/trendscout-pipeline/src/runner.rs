//! The 5-stage sequential pipeline runner.

use std::future::Future;

use trendscout_core::{PipelineRequest, PipelineResult};
use trendscout_openai::OpenAiClient;
use trendscout_youtube::{fetch_trending_videos, DiscoveryConfig, YoutubeClient};

use crate::error::PipelineError;
use crate::stage::{StageKey, StageUpdate};

/// Emits the running event, awaits the stage task, then emits success or
/// error. A failed stage aborts the caller via `?` — downstream stages never
/// observe a running event after an upstream failure.
async fn run_stage<T, Fut>(
    stage: StageKey,
    on_update: &mut impl FnMut(StageUpdate),
    task: Fut,
) -> Result<T, PipelineError>
where
    Fut: Future<Output = Result<T, PipelineError>>,
{
    on_update(StageUpdate::running(stage));
    tracing::info!(stage = %stage, "stage started");
    match task.await {
        Ok(value) => {
            on_update(StageUpdate::success(stage));
            tracing::info!(stage = %stage, "stage finished");
            Ok(value)
        }
        Err(err) => {
            on_update(StageUpdate::error(
                stage,
                err.message.clone(),
                err.hint.clone(),
            ));
            tracing::error!(stage = %stage, error = %err.message, "stage failed");
            Err(err)
        }
    }
}

/// Runs the full pipeline: generate queries → fetch videos → analyze
/// popularity → create scenarios → generate the shooting guide.
///
/// `on_update` receives a [`StageUpdate`] before and after every stage.
/// Re-invoking with the same request re-runs all five stages from the
/// beginning; each stage's output is the next stage's required input, so
/// there is no partial resumption.
///
/// # Errors
///
/// Returns the first [`PipelineError`], tagged with the failing stage. The
/// remaining stages are not run.
pub async fn run_pipeline(
    youtube: &YoutubeClient,
    openai: &OpenAiClient,
    discovery: &DiscoveryConfig,
    request: &PipelineRequest,
    mut on_update: impl FnMut(StageUpdate),
) -> Result<PipelineResult, PipelineError> {
    let mut result = PipelineResult::default();
    let seed = request.search_query();

    let generated = run_stage(StageKey::GenerateQueries, &mut on_update, async {
        openai
            .generate_queries(seed, request.request_count())
            .await
            .map_err(|e| PipelineError::from_openai(StageKey::GenerateQueries, &e))
    })
    .await?;
    result.queries = merge_queries(seed, generated);

    let videos = run_stage(StageKey::FetchVideos, &mut on_update, async {
        fetch_trending_videos(youtube, discovery, &result.queries, request.request_count())
            .await
            .map_err(|e| PipelineError::from_youtube(&e))
    })
    .await?;
    result.videos = videos;

    let analysis = run_stage(StageKey::AnalyzePopularity, &mut on_update, async {
        openai
            .analyze_popularity(&result.videos)
            .await
            .map_err(|e| PipelineError::from_openai(StageKey::AnalyzePopularity, &e))
    })
    .await?;
    result.analysis = analysis;

    let scenarios = run_stage(StageKey::CreateScenarios, &mut on_update, async {
        openai
            .create_scenarios(&result.analysis)
            .await
            .map_err(|e| PipelineError::from_openai(StageKey::CreateScenarios, &e))
    })
    .await?;
    result.scenarios = scenarios;

    let guide = run_stage(StageKey::GenerateTips, &mut on_update, async {
        openai
            .generate_shooting_guide(&result.scenarios)
            .await
            .map_err(|e| PipelineError::from_openai(StageKey::GenerateTips, &e))
    })
    .await?;
    result.guide = Some(guide);

    Ok(result)
}

/// The seed leads the query list; generated queries follow in order, minus
/// exact duplicates.
fn merge_queries(seed: &str, generated: Vec<String>) -> Vec<String> {
    let mut queries = vec![seed.to_owned()];
    for query in generated {
        if !queries.contains(&query) {
            queries.push(query);
        }
    }
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_seed_first_and_deduplicates() {
        let merged = merge_queries(
            "нейросети",
            vec![
                "нейросети обзор".to_owned(),
                "нейросети".to_owned(),
                "нейросети кейсы".to_owned(),
            ],
        );
        assert_eq!(
            merged,
            vec!["нейросети", "нейросети обзор", "нейросети кейсы"]
        );
    }
}
