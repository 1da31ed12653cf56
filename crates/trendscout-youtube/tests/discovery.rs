//! Integration tests for the discovery stage using wiremock HTTP mocks.

use serde_json::json;
use trendscout_youtube::{
    fetch_trending_videos, DiscoveryConfig, DurationBucket, Order, SearchProfile, YoutubeClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn search_body(ids: &[&str], next_page_token: Option<&str>) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| json!({ "id": { "videoId": id } }))
        .collect();
    match next_page_token {
        Some(token) => json!({ "items": items, "nextPageToken": token }),
        None => json!({ "items": items }),
    }
}

fn video_item(id: &str, title: &str, views: u64, duration: &str) -> serde_json::Value {
    json!({
        "id": id,
        "snippet": {
            "title": title,
            "description": "",
            "channelTitle": "Канал",
            "publishedAt": "2025-05-01T00:00:00Z",
            "tags": [],
            "thumbnails": {
                "high": { "url": format!("https://img/{id}.jpg") }
            }
        },
        "statistics": {
            "viewCount": views.to_string(),
            "likeCount": "1200",
            "commentCount": "80"
        },
        "contentDetails": { "duration": duration }
    })
}

/// One permissive profile so tests control exactly how many requests run.
fn single_profile_config() -> DiscoveryConfig {
    DiscoveryConfig {
        profiles: vec![SearchProfile {
            order: Order::ViewCount,
            video_duration: Some(DurationBucket::Short),
            published_after_days: 45,
            video_category_id: None,
        }],
        quality_modifiers: Vec::new(),
        ..DiscoveryConfig::default()
    }
}

#[tokio::test]
async fn discovery_returns_ranked_unique_relevant_results() {
    let server = MockServer::start().await;

    // 25 relevant videos, 5 irrelevant ones, plus a duplicated id.
    let mut ids: Vec<String> = (0..30).map(|i| format!("vid{i}")).collect();
    ids.push("vid0".to_owned());
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let mut items: Vec<serde_json::Value> = (0..25)
        .map(|i| {
            video_item(
                &format!("vid{i}"),
                &format!("нейросети кейс {i}"),
                300_000 + i * 1_000,
                "PT30S",
            )
        })
        .collect();
    items.extend((25..30).map(|i| {
        video_item(
            &format!("vid{i}"),
            &format!("рецепты борща {i}"),
            900_000,
            "PT30S",
        )
    }));

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&id_refs, None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let config = DiscoveryConfig::default();
    let queries = vec!["аналитика рынка ИИ".to_owned()];

    let videos = fetch_trending_videos(&client, &config, &queries, 10)
        .await
        .expect("discovery should succeed");

    assert_eq!(videos.len(), 10, "output is truncated to the request count");

    let unique: std::collections::HashSet<&str> = videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(unique.len(), videos.len(), "output ids are unique");

    for video in &videos {
        assert!(
            video.title.contains("нейросети"),
            "irrelevant video leaked through the relevance gate: {}",
            video.title
        );
    }
}

#[tokio::test]
async fn discovery_follows_pagination_tokens() {
    let server = MockServer::start().await;

    // Page 2 is matched first because it is the more specific mock.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&["second"], None)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_body(&["first"], Some("page-2"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                video_item("first", "нейросети утром", 400_000, "PT40S"),
                video_item("second", "нейросети вечером", 500_000, "PT50S"),
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let config = single_profile_config();
    // The query already carries the freshness prefix, so exactly one variant runs.
    let queries = vec!["новости нейросети".to_owned()];

    let videos = fetch_trending_videos(&client, &config, &queries, 10)
        .await
        .expect("discovery should succeed");

    let mut ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["first", "second"]);
}

#[tokio::test]
async fn transport_error_aborts_the_whole_stage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "quotaExceeded" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let config = single_profile_config();
    let queries = vec!["новости нейросети".to_owned()];

    let result = fetch_trending_videos(&client, &config, &queries, 10).await;
    let err = result.expect_err("discovery must fail on transport error");
    assert!(
        err.to_string().contains("quotaExceeded"),
        "error should surface the API message, got: {err}"
    );
}

#[tokio::test]
async fn discovery_is_deterministic_for_identical_inputs() {
    let server = MockServer::start().await;

    let ids: Vec<String> = (0..12).map(|i| format!("vid{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let items: Vec<serde_json::Value> = (0..12)
        .map(|i| {
            video_item(
                &format!("vid{i}"),
                &format!("нейросети разбор {i}"),
                200_000 + (i % 5) * 50_000,
                "PT35S",
            )
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(&id_refs, None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let config = single_profile_config();
    let queries = vec!["новости нейросети".to_owned()];

    let first = fetch_trending_videos(&client, &config, &queries, 10)
        .await
        .expect("first run should succeed");
    let second = fetch_trending_videos(&client, &config, &queries, 10)
        .await
        .expect("second run should succeed");

    let first_ids: Vec<&str> = first.iter().map(|v| v.id.as_str()).collect();
    let second_ids: Vec<&str> = second.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(first_ids, second_ids, "identical inputs must rank identically");
}
