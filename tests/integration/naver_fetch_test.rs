// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    desktop_page, html, mobile_page, mount_desktop, scraper_settings, MOBILE_PATH,
};
use serp_crawlrs::domain::models::search_result::Device;
use serp_crawlrs::domain::search::engine::{FetchError, SearchEngine};
use serp_crawlrs::infrastructure::search::headers::MANDATORY_HEADERS;
use serp_crawlrs::infrastructure::search::NaverSearchEngine;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetches_and_extracts_desktop_page() {
    let server = MockServer::start().await;
    mount_desktop(&server, "캠핑 의자", html(desktop_page("캠핑 의자", 4))).await;

    let engine = NaverSearchEngine::new(&scraper_settings(&server.uri())).unwrap();
    let batch = engine
        .fetch_and_extract("캠핑 의자", Device::Desktop)
        .await
        .unwrap();

    assert_eq!(batch.len(), 4);
    assert_eq!(batch.query(), "캠핑 의자");
    let first = &batch.records()[0];
    assert_eq!(first.rank, 1);
    assert_eq!(first.site_name, "캠핑 의자 몰 1");
    assert_eq!(first.display_url, "www.shop1.co.kr");
    assert_eq!(first.title, "캠핑 의자 특가 · 1위");
    assert_eq!(first.description, "설명, \"따옴표\" 1");
    assert_eq!(batch.records()[3].rank, 4);
}

#[tokio::test]
async fn test_mobile_variant_uses_mobile_template() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MOBILE_PATH))
        .and(query_param("query", "폰케이스"))
        .respond_with(html(mobile_page("폰케이스", 2)))
        .expect(1)
        .mount(&server)
        .await;

    let engine = NaverSearchEngine::new(&scraper_settings(&server.uri())).unwrap();
    let batch = engine
        .fetch_and_extract("폰케이스", Device::Mobile)
        .await
        .unwrap();

    assert_eq!(batch.device(), Device::Mobile);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.records()[1].display_url, "m.shop2.kr");
    assert_eq!(batch.records()[1].title, "폰케이스 앱 특가");
}

#[tokio::test]
async fn test_non_200_status_is_reported() {
    let server = MockServer::start().await;
    mount_desktop(&server, "busy", ResponseTemplate::new(503)).await;
    mount_desktop(&server, "moved", ResponseTemplate::new(204)).await;

    let engine = NaverSearchEngine::new(&scraper_settings(&server.uri())).unwrap();

    let err = engine
        .fetch_and_extract("busy", Device::Desktop)
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::UnexpectedStatus(503));

    let err = engine
        .fetch_and_extract("moved", Device::Desktop)
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::UnexpectedStatus(204));
}

#[tokio::test]
async fn test_page_without_markup_is_parse_failure() {
    let server = MockServer::start().await;
    mount_desktop(
        &server,
        "text",
        ResponseTemplate::new(200).set_body_string("service temporarily unavailable"),
    )
    .await;

    let engine = NaverSearchEngine::new(&scraper_settings(&server.uri())).unwrap();
    let err = engine
        .fetch_and_extract("text", Device::Desktop)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::ParseFailure(_)));
}

#[tokio::test]
async fn test_page_without_ads_is_empty_batch() {
    let server = MockServer::start().await;
    mount_desktop(&server, "rare", html(desktop_page("rare", 0))).await;

    let engine = NaverSearchEngine::new(&scraper_settings(&server.uri())).unwrap();
    let batch = engine
        .fetch_and_extract("rare", Device::Desktop)
        .await
        .unwrap();

    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // bind and release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let engine = NaverSearchEngine::new(&scraper_settings(&uri)).unwrap();
    let err = engine
        .fetch_and_extract("anything", Device::Desktop)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network(_)), "{:?}", err);
}

#[tokio::test]
async fn test_requests_carry_generated_headers() {
    let server = MockServer::start().await;
    mount_desktop(&server, "headers", html(desktop_page("headers", 1))).await;

    let engine = NaverSearchEngine::new(&scraper_settings(&server.uri())).unwrap();
    for _ in 0..5 {
        engine
            .fetch_and_extract("headers", Device::Desktop)
            .await
            .unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
    for request in &requests {
        // connection is hop-by-hop and may be consumed by the server
        for (name, candidates) in MANDATORY_HEADERS.iter().filter(|(n, _)| *n != "Connection") {
            // the mock server splits values on commas and trims each fragment
            let fragments: Vec<String> = request
                .headers
                .iter()
                .find(|(key, _)| key.as_str().eq_ignore_ascii_case(name))
                .map(|(_, values)| values.iter().map(|v| v.as_str().to_string()).collect())
                .unwrap_or_else(|| panic!("missing {}", name));
            assert!(
                candidates
                    .iter()
                    .any(|candidate| comma_fragments(candidate) == fragments),
                "{} = {:?}",
                name,
                fragments
            );
        }
    }
}

fn comma_fragments(value: &str) -> Vec<String> {
    value.split(',').map(|part| part.trim().to_string()).collect()
}
