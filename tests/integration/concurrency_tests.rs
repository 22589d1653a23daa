//! Latency and concurrency tests.
//!
//! These run on tokio's paused clock: sleeps complete as soon as every task
//! is idle, so delays of several seconds cost no wall-clock time while
//! `tokio::time::Instant` still measures them.

use std::collections::HashSet;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tower::ServiceExt;

use horizons_backend::generation::{DelayProfile, AVATAR_ID_PREFIX};

use super::test_utils::{
    body_json, generation_delay, json_request, matches_id_pattern, router_with_delays,
};

const TOLERANCE: Duration = Duration::from_millis(50);

fn assert_about(elapsed: Duration, expected: Duration) {
    assert!(
        elapsed >= expected && elapsed < expected + TOLERANCE,
        "expected ~{:?}, got {:?}",
        expected,
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn test_image_waits_configured_delay() {
    let router = router_with_delays(generation_delay(Duration::from_secs(5)));

    let start = Instant::now();
    let response = router
        .oneshot(json_request("/api/generate/image", &json!({"prompt": "fox"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_about(start.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_image_requests_complete_together() {
    const REQUESTS: usize = 16;
    let delay = Duration::from_secs(5);
    let router = router_with_delays(generation_delay(delay));

    let start = Instant::now();
    let mut tasks = JoinSet::new();
    for i in 0..REQUESTS {
        let router = router.clone();
        tasks.spawn(async move {
            let request = json_request("/api/generate/image", &json!({"prompt": i.to_string()}));
            let response = router.oneshot(request).await.unwrap();
            let status = response.status();
            (status, start.elapsed(), body_json(response).await)
        });
    }

    let mut urls = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let (status, elapsed, json) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_about(elapsed, delay);
        assert!(urls.insert(json["resultUrl"].as_str().unwrap().to_string()));
    }

    assert_eq!(urls.len(), REQUESTS);
    assert_about(start.elapsed(), delay);
}

#[tokio::test(start_paused = true)]
async fn test_delayed_request_does_not_block_others() {
    let router = router_with_delays(generation_delay(Duration::from_secs(5)));

    let start = Instant::now();
    let slow = tokio::spawn({
        let router = router.clone();
        async move {
            router
                .oneshot(json_request("/api/generate/short-video", &json!({})))
                .await
                .unwrap()
        }
    });

    // Let the slow request start and park on its delay
    tokio::task::yield_now().await;

    let response = router
        .oneshot(json_request("/api/settings/update", &json!({"autoSound": true})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(start.elapsed() < Duration::from_secs(1));
    assert!(!slow.is_finished());

    let slow_response = slow.await.unwrap();
    assert_eq!(slow_response.status(), StatusCode::OK);
    assert_about(start.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_long_video_latency_independent_of_job_time() {
    for job_time in [Duration::from_secs(20), Duration::from_secs(3600)] {
        let router = router_with_delays(DelayProfile {
            long_video: job_time,
            ..DelayProfile::none()
        });

        let start = Instant::now();
        let response = router
            .oneshot(json_request("/api/generate/long-video", &json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(
            start.elapsed() < TOLERANCE,
            "long video response waited {:?}",
            start.elapsed()
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_long_video_jobs_get_distinct_ids() {
    let router = router_with_delays(DelayProfile::default());

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let router = router.clone();
        tasks.spawn(async move {
            let response = router
                .oneshot(json_request("/api/generate/long-video", &json!({})))
                .await
                .unwrap();
            body_json(response).await["jobId"]
                .as_str()
                .unwrap()
                .to_string()
        });
    }

    let mut ids = HashSet::new();
    while let Some(id) = tasks.join_next().await {
        assert!(ids.insert(id.unwrap()));
    }
    assert_eq!(ids.len(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_avatars_never_share_ids() {
    let delay = Duration::from_secs(3);
    let router = router_with_delays(DelayProfile {
        avatar: delay,
        ..DelayProfile::none()
    });

    let start = Instant::now();
    let request = || json_request("/api/generate/avatar", &json!({"name": "Zed", "fileName": "zed.png"}));
    let (first, second) = tokio::join!(
        router.clone().oneshot(request()),
        router.clone().oneshot(request())
    );
    assert_about(start.elapsed(), delay);

    let first = body_json(first.unwrap()).await;
    let second = body_json(second.unwrap()).await;

    let first_id = first["avatarId"].as_str().unwrap();
    let second_id = second["avatarId"].as_str().unwrap();
    assert!(matches_id_pattern(first_id, AVATAR_ID_PREFIX));
    assert!(matches_id_pattern(second_id, AVATAR_ID_PREFIX));
    assert_ne!(first_id, second_id);
    assert_ne!(first["avatarUrl"], second["avatarUrl"]);
}
