// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use serp_crawlrs::config::settings::{
    QueueSettings, SchedulerSettings, ScraperSettings, Settings, StorageSettings,
    TelemetrySettings,
};
use serp_crawlrs::domain::repositories::storage_repository::{StorageError, StorageRepository};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DESKTOP_PATH: &str = "/search.naver";
pub const MOBILE_PATH: &str = "/m/search.naver";

/// 带有 `count` 个结果区块的桌面端结果页
pub fn desktop_page(keyword: &str, count: usize) -> String {
    let items: String = (1..=count)
        .map(|i| {
            format!(
                r#"<li>
                  <a class="site">{keyword} 몰 {i}</a>
                  <span class="lnk_url_area"><a class="lnk_url">www.shop{i}.co.kr/</a></span>
                  <a class="lnk_head"><span class="lnk_tit">{keyword} 특가</span><span class="lnk_tit">{i}위</span></a>
                  <a class="link_desc">설명, "따옴표" {i}</a>
                </li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><div class="nad_area"><ul class="lst_type">{}</ul></div></body></html>"#,
        items
    )
}

/// 带有 `count` 个结果区块的移动端结果页
pub fn mobile_page(keyword: &str, count: usize) -> String {
    let items: String = (1..=count)
        .map(|i| {
            format!(
                r#"<li>
                  <span class="site">{keyword} 모바일 {i}</span>
                  <span class="url">m.shop{i}.kr</span>
                  <div class="tit_area"><span class="tit">{keyword} 앱 특가</span></div>
                  <a class="desc">모바일 설명 {i}</a>
                </li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><div class="api_subject_bx"><ul class="lst_total">{}</ul></div></body></html>"#,
        items
    )
}

/// 为某个关键词挂载桌面端结果页
pub async fn mount_desktop(server: &MockServer, keyword: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(DESKTOP_PATH))
        .and(query_param("query", keyword))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

pub fn scraper_settings(base_url: &str) -> ScraperSettings {
    ScraperSettings {
        desktop_url_template: format!("{}{}?where=nexearch&query={{query}}", base_url, DESKTOP_PATH),
        mobile_url_template: format!("{}{}?where=m&query={{query}}", base_url, MOBILE_PATH),
        request_timeout_seconds: 2,
        ..ScraperSettings::default()
    }
}

pub fn test_settings(base_url: &str) -> Settings {
    Settings {
        queue: QueueSettings {
            queue_url: "memory://jobs".to_string(),
            region: None,
            endpoint: None,
            max_messages: 10,
            wait_time_seconds: 0,
            visibility_timeout_seconds: 5,
        },
        storage: StorageSettings {
            storage_type: "local".to_string(),
            local_path: None,
            region: None,
            bucket: None,
            access_key: None,
            secret_key: None,
            endpoint: None,
            key_prefix: "data".to_string(),
            time_zone: "Asia/Seoul".to_string(),
            object_id_length: 18,
        },
        scraper: scraper_settings(base_url),
        scheduler: SchedulerSettings::default(),
        telemetry: TelemetrySettings::default(),
    }
}

pub fn gunzip(bytes: &[u8]) -> String {
    let mut csv = String::new();
    GzDecoder::new(bytes).read_to_string(&mut csv).unwrap();
    csv
}

/// 总是失败并记录调用次数的存储
#[derive(Default)]
pub struct FailingStorage {
    pub attempts: AtomicUsize,
}

impl FailingStorage {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageRepository for FailingStorage {
    async fn put_object(&self, _: &str, _: Vec<u8>, _: &str) -> Result<(), StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Other("simulated outage".to_string()))
    }
}
