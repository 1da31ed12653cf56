//! Budgeted, paginated id collection for one (query, profile) pair.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::client::{SearchPageParams, YoutubeClient, MAX_PAGE_SIZE};
use crate::error::YoutubeError;
use crate::profiles::SearchProfile;

/// Science & Technology category, pinned for tech-flavoured queries.
const TECH_CATEGORY_ID: &str = "28";

/// Pages through `/search` until `limit` unique ids are collected or the
/// transport reports no further pages. Ids keep discovery order, first seen
/// wins.
///
/// # Errors
///
/// Returns [`YoutubeError`] on the first failed page request; the caller
/// aborts the whole discovery stage on any error here.
pub(crate) async fn collect_search_ids(
    client: &YoutubeClient,
    query: &str,
    limit: usize,
    profile: &SearchProfile,
    force_tech_category: bool,
    now: DateTime<Utc>,
) -> Result<Vec<String>, YoutubeError> {
    let published_after = now - Duration::days(profile.published_after_days);
    let video_category_id = if force_tech_category {
        Some(TECH_CATEGORY_ID)
    } else {
        profile.video_category_id.as_deref()
    };

    let mut ids: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut page_token: Option<String> = None;

    while ids.len() < limit {
        let page = client
            .search_page(&SearchPageParams {
                query,
                order: profile.order,
                max_results: MAX_PAGE_SIZE.min(limit - ids.len()),
                page_token: page_token.as_deref(),
                published_after,
                video_duration: profile.video_duration,
                video_category_id,
            })
            .await?;

        for id in page.ids {
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    tracing::debug!(
        query,
        order = profile.order.as_param(),
        collected = ids.len(),
        limit,
        "collected search ids"
    );

    Ok(ids)
}
