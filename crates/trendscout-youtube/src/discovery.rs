//! The discovery orchestrator: query fan-out, budgeted collection,
//! relevance gating, tiering, and ranking.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use trendscout_core::Video;

use crate::client::YoutubeClient;
use crate::collector::collect_search_ids;
use crate::details::fetch_details;
use crate::error::YoutubeError;
use crate::filter::{is_low_quality, is_momentum_short, is_viral, is_viral_short, matches_keywords};
use crate::keywords::SeedKeywords;
use crate::profiles::DiscoveryConfig;
use crate::queries::build_query_variants;
use crate::score::ranking_score;

/// Upper bound on expanded queries executed in one run.
pub const MAX_QUERIES_PER_RUN: usize = 30;
/// Hard cap on the working candidate pool.
pub const MAX_TARGET_POOL: usize = 800;

/// Working pool budget for a requested result count:
/// `min(max(count*2, count+10), 800)`.
#[must_use]
pub fn target_pool_size(request_count: usize) -> usize {
    (request_count * 2)
        .max(request_count + 10)
        .min(MAX_TARGET_POOL)
}

/// Runs the full discovery stage and returns at most `request_count` ranked
/// videos.
///
/// Seed keywords come from the first query; every query is expanded into
/// modifier variants (capped at [`MAX_QUERIES_PER_RUN`]); queries × profiles
/// are walked under the shared pool budget with relevance-gated, idempotent
/// insertion; the surviving pool is quality-filtered, tier-prioritized,
/// score-sorted, and truncated.
///
/// # Errors
///
/// Any transport error aborts the whole stage — no partial result is
/// returned.
pub async fn fetch_trending_videos(
    client: &YoutubeClient,
    config: &DiscoveryConfig,
    queries: &[String],
    request_count: usize,
) -> Result<Vec<Video>, YoutubeError> {
    let now = Utc::now();
    let seed = SeedKeywords::from_seed(queries.first().map_or("", String::as_str));

    let expanded: Vec<String> = queries
        .iter()
        .flat_map(|query| {
            build_query_variants(query, &config.quality_modifiers, &config.freshness_prefix)
        })
        .collect();
    let run_queries: Vec<String> = if expanded.is_empty() {
        queries.to_vec()
    } else {
        expanded
    };
    let target_pool = target_pool_size(request_count);

    let mut pool: Vec<Video> = Vec::new();
    let mut pool_ids: HashSet<String> = HashSet::new();

    for query in run_queries.iter().take(MAX_QUERIES_PER_RUN) {
        if pool.len() >= target_pool {
            break;
        }
        let force_tech_category = config.is_tech_query(query);

        for profile in &config.profiles {
            let remaining = target_pool.saturating_sub(pool.len());
            if remaining == 0 {
                break;
            }

            let ids =
                collect_search_ids(client, query, remaining, profile, force_tech_category, now)
                    .await?;
            if ids.is_empty() {
                continue;
            }

            let videos = fetch_details(client, &ids).await?;
            for video in videos {
                if pool_ids.contains(&video.id) {
                    continue;
                }
                if !matches_keywords(&video, &seed, &config.tech_markers) {
                    continue;
                }
                pool_ids.insert(video.id.clone());
                pool.push(video);
            }
        }
    }

    tracing::info!(
        pool = pool.len(),
        target_pool,
        request_count,
        "discovery pool collected"
    );

    Ok(rank_pool(pool, request_count, config, now))
}

/// Quality-filters the pool, concatenates it in tier order, deduplicates by
/// id (first occurrence wins), sorts by ranking score, and truncates.
///
/// Tiering happens before the stable sort: within a score tie, stronger
/// tiers keep their earlier positions; across the pool the score is
/// authoritative.
fn rank_pool(
    pool: Vec<Video>,
    request_count: usize,
    config: &DiscoveryConfig,
    now: DateTime<Utc>,
) -> Vec<Video> {
    let cleaned: Vec<Video> = pool
        .into_iter()
        .filter(|video| !is_low_quality(video, config))
        .collect();

    let viral_shorts = cleaned.iter().filter(|v| is_viral_short(v));
    let viral_longs = cleaned
        .iter()
        .filter(|v| is_viral(v) && !is_viral_short(v));
    let momentum_shorts = cleaned.iter().filter(|v| is_momentum_short(v));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut ranked: Vec<Video> = Vec::new();
    for video in viral_shorts
        .chain(viral_longs)
        .chain(momentum_shorts)
        .chain(cleaned.iter())
    {
        if seen.insert(video.id.as_str()) {
            ranked.push(video.clone());
        }
    }

    ranked.sort_by_cached_key(|video| std::cmp::Reverse(ranking_score(video, now)));
    ranked.truncate(request_count);
    ranked
}
