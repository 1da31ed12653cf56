//! trendscout command line interface.
//!
//! Runs the full discovery pipeline for a topic seed and prints the ranked
//! videos, analyses, scenarios, and shooting guide. Stage progress is logged
//! to stderr as it happens.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trendscout_core::format::{format_count, relative_age, seconds_to_clock};
use trendscout_core::{PipelineRequest, PipelineResult};
use trendscout_openai::OpenAiClient;
use trendscout_pipeline::{apply_stage_update, initial_progress, run_pipeline, StageStatus};
use trendscout_youtube::{summarize_trends, DiscoveryConfig, YoutubeClient};

#[derive(Debug, Parser)]
#[command(name = "trendscout")]
#[command(about = "Discover viral short-form videos for a topic and draft a content plan")]
struct Cli {
    /// Topic seed to research (3–120 characters).
    #[arg(long, short = 'q')]
    query: String,

    /// How many ranked videos to return (10–1000).
    #[arg(long, short = 'c', default_value_t = 100)]
    count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = trendscout_core::load_app_config().context("configuration error")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let request =
        PipelineRequest::new(&cli.query, cli.count).context("invalid pipeline input")?;

    let youtube = YoutubeClient::new(&config.youtube_api_key, config.youtube_timeout_secs)
        .context("failed to construct the YouTube client")?;
    let openai = OpenAiClient::new(
        &config.openai_api_key,
        config.openai_project_id.as_deref(),
        config.openai_timeout_secs,
    )
    .context("failed to construct the OpenAI client")?;
    let discovery = DiscoveryConfig::default();

    let mut progress = initial_progress();
    let outcome = run_pipeline(&youtube, &openai, &discovery, &request, |update| {
        let next = apply_stage_update(&progress, &update, Utc::now());
        progress = next;
        match update.status {
            StageStatus::Running => {
                tracing::info!(stage = update.stage.label(), "стадия запущена");
            }
            StageStatus::Success => {
                tracing::info!(
                    stage = update.stage.label(),
                    percent = progress.percent,
                    "стадия завершена"
                );
            }
            StageStatus::Error => {
                tracing::error!(
                    stage = update.stage.label(),
                    error = update.error_message.as_deref().unwrap_or(""),
                    hint = update.hint.as_deref().unwrap_or(""),
                    "стадия завершилась ошибкой"
                );
            }
            StageStatus::Idle => {}
        }
    })
    .await;

    match outcome {
        Ok(result) => {
            render_result(&result);
            Ok(())
        }
        Err(err) => {
            if let Some(hint) = &err.hint {
                eprintln!("Подсказка: {hint}");
            }
            Err(anyhow::Error::new(err).context("pipeline failed"))
        }
    }
}

fn render_result(result: &PipelineResult) {
    let now = Utc::now();

    println!("Поисковые запросы ({}):", result.queries.len());
    for query in &result.queries {
        println!("  - {query}");
    }

    let summary = summarize_trends(&result.videos);
    println!();
    println!(
        "Видео: {} (сильных: {}, слабых: {})",
        summary.total,
        summary.strong_performers.len(),
        summary.needs_improvement.len()
    );
    for (index, video) in result.videos.iter().enumerate() {
        println!(
            "{:>3}. [{}] {} — {}",
            index + 1,
            video.trend_score,
            video.title,
            video.channel_title
        );
        println!(
            "     {} просмотров · {} лайков · {} · {} · {}",
            format_count(video.view_count),
            format_count(video.like_count),
            seconds_to_clock(video.duration_seconds),
            relative_age(video.published_at, now),
            video.url
        );
    }

    if !result.analysis.is_empty() {
        println!();
        println!("Анализ популярности:");
        for analysis in &result.analysis {
            println!(
                "  {} [{:?}/{:?}] {}",
                analysis.video_id, analysis.sentiment, analysis.risk_level, analysis.summary
            );
        }
    }

    if !result.scenarios.is_empty() {
        println!();
        println!("Сценарии:");
        for scenario in &result.scenarios {
            println!("  {} — {}", scenario.title, scenario.hook);
            for beat in &scenario.beats {
                println!("      {}s: {}", beat.duration_seconds, beat.title);
            }
        }
    }

    if let Some(guide) = &result.guide {
        println!();
        println!("Гид по съёмке:");
        for moment in &guide.key_moments {
            println!("  ключевой момент: {moment}");
        }
        for entry in &guide.production_calendar {
            println!("  календарь: {entry}");
        }
        for tip in &guide.tips {
            println!("  [{}] {} — {}", tip.category, tip.headline, tip.summary);
            for item in &tip.tips {
                println!("      - {item}");
            }
        }
    }
}
