// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{desktop_page, gunzip, html, mount_desktop, test_settings, FailingStorage};
use serp_crawlrs::application::use_cases::run_crawl::RunCrawlUseCase;
use serp_crawlrs::infrastructure::search::NaverSearchEngine;
use serp_crawlrs::infrastructure::storage::InMemoryStorage;
use serp_crawlrs::queue::job_queue::InMemoryJobQueue;
use serp_crawlrs::utils::errors::RunError;
use std::sync::Arc;
use wiremock::{MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    queue: Arc<InMemoryJobQueue>,
    storage: Arc<InMemoryStorage>,
}

impl Harness {
    async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            queue: Arc::new(InMemoryJobQueue::new()),
            storage: Arc::new(InMemoryStorage::new()),
        }
    }

    async fn enqueue(&self, keyword: &str) {
        self.queue
            .push(serde_json::json!({ "keyword": keyword }).to_string())
            .await;
    }

    fn use_case(&self) -> RunCrawlUseCase {
        let settings = test_settings(&self.server.uri());
        let engine = Arc::new(NaverSearchEngine::new(&settings.scraper).unwrap());
        RunCrawlUseCase::new(self.queue.clone(), engine, self.storage.clone(), &settings).unwrap()
    }

    async fn fetches(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

#[tokio::test]
async fn test_three_jobs_are_uploaded() {
    let harness = Harness::start().await;
    for keyword in ["러닝화", "캠핑 의자", "무선 이어폰"] {
        mount_desktop(&harness.server, keyword, html(desktop_page(keyword, 3))).await;
        harness.enqueue(keyword).await;
    }

    let summary = harness.use_case().execute().await.unwrap();

    assert_eq!(summary.total_processed, 3);
    assert_eq!(summary.rounds_executed, 2);
    assert_eq!(
        summary.to_string(),
        "Run completed. Total rounds: 2, Total keywords processed: 3"
    );
    assert_eq!(harness.queue.deleted().await.len(), 3);
    assert!(harness.queue.in_flight().await.is_empty());

    let keys = harness.storage.keys().await;
    assert_eq!(keys.len(), 3);

    let mut queries = Vec::new();
    for key in &keys {
        assert!(key.starts_with("data/basic_date="), "{}", key);
        assert!(key.ends_with(".csv.gz"));

        let object = harness.storage.get(key).await.unwrap();
        assert_eq!(object.content_type, "application/gzip");

        let csv = gunzip(&object.data);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("query,device,rank,site_name,display_url,title,description")
        );
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.contains(",PC,")));
        queries.push(rows[0].split(',').next().unwrap().to_string());
    }
    queries.sort();
    assert_eq!(queries, vec!["러닝화", "무선 이어폰", "캠핑 의자"]);
}

#[tokio::test]
async fn test_empty_queue_stops_after_first_round() {
    let harness = Harness::start().await;

    let summary = harness.use_case().execute().await.unwrap();

    assert_eq!(summary.rounds_executed, 1);
    assert_eq!(summary.total_processed, 0);
    assert_eq!(harness.queue.receive_calls().await, 1);
    assert_eq!(harness.fetches().await, 0);
    assert_eq!(harness.storage.len().await, 0);
}

#[tokio::test]
async fn test_failed_fetch_is_not_acknowledged() {
    let harness = Harness::start().await;
    mount_desktop(&harness.server, "ok-1", html(desktop_page("ok-1", 2))).await;
    mount_desktop(&harness.server, "down", ResponseTemplate::new(503)).await;
    mount_desktop(&harness.server, "ok-2", html(desktop_page("ok-2", 1))).await;
    for keyword in ["ok-1", "down", "ok-2"] {
        harness.enqueue(keyword).await;
    }

    let summary = harness.use_case().execute().await.unwrap();

    assert_eq!(summary.total_processed, 3);
    assert_eq!(harness.storage.len().await, 2);
    assert_eq!(harness.queue.deleted().await.len(), 2);
    // the 503 job stays in flight for redelivery
    assert_eq!(harness.queue.in_flight().await, vec!["msg-2".to_string()]);
}

#[tokio::test]
async fn test_malformed_and_empty_jobs() {
    let harness = Harness::start().await;
    mount_desktop(&harness.server, "no-ads", html(desktop_page("no-ads", 0))).await;
    harness.queue.push("{\"kw\": 1}").await;
    harness.enqueue("no-ads").await;

    let summary = harness.use_case().execute().await.unwrap();

    assert_eq!(summary.total_processed, 2);
    // the empty page is acknowledged but never uploaded
    assert_eq!(harness.queue.deleted().await, vec!["msg-2".to_string()]);
    assert_eq!(harness.queue.in_flight().await, vec!["msg-1".to_string()]);
    assert_eq!(harness.storage.len().await, 0);
    assert_eq!(harness.fetches().await, 1);
}

#[tokio::test]
async fn test_large_backlog_is_capped_at_five_rounds() {
    let harness = Harness::start().await;
    mount_desktop(&harness.server, "same", html(desktop_page("same", 1))).await;
    for _ in 0..60 {
        harness.enqueue("same").await;
    }

    let summary = harness.use_case().execute().await.unwrap();

    assert_eq!(summary.rounds_executed, 5);
    assert_eq!(summary.total_processed, 50);
    assert_eq!(harness.queue.pending_len().await, 10);
    assert_eq!(harness.storage.len().await, 50);
}

#[tokio::test]
async fn test_upload_failure_does_not_stop_the_run() {
    let harness = Harness::start().await;
    mount_desktop(&harness.server, "lost", html(desktop_page("lost", 2))).await;
    harness.enqueue("lost").await;

    let settings = test_settings(&harness.server.uri());
    let engine = Arc::new(NaverSearchEngine::new(&settings.scraper).unwrap());
    let storage = Arc::new(FailingStorage::default());
    let use_case =
        RunCrawlUseCase::new(harness.queue.clone(), engine, storage.clone(), &settings).unwrap();

    let summary = use_case.execute().await.unwrap();

    assert_eq!(summary.total_processed, 1);
    assert_eq!(storage.attempts(), 1);
    // acknowledged before the upload was attempted
    assert_eq!(harness.queue.deleted().await.len(), 1);
}

#[tokio::test]
async fn test_queue_outage_is_fatal() {
    let harness = Harness::start().await;
    harness.enqueue("never").await;
    harness.queue.fail_receives().await;

    let err = harness.use_case().execute().await.unwrap_err();

    assert!(matches!(err, RunError::Round(ref e) if e.round == 1));
    assert!(err.to_string().starts_with("Error in round 1"));
    assert_eq!(harness.fetches().await, 0);
}
