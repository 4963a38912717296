// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ScraperSettings;
use crate::domain::models::search_result::{Device, ResultBatch, ResultRecord};
use crate::domain::search::engine::{FetchError, SearchEngine};
use crate::infrastructure::search::headers::HeaderGenerator;
use crate::infrastructure::search::selectors::{CompiledSelectors, SelectorError, SelectorTable};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

/// 标题片段之间的分隔符
pub const TITLE_SEPARATOR: &str = " · ";

#[derive(Debug, Error)]
pub enum ScraperBuildError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// 单个设备的抓取配置：独立的连接池、地址模板和选择器
struct DeviceProfile {
    client: reqwest::Client,
    url_template: String,
    selectors: CompiledSelectors,
}

impl DeviceProfile {
    fn build(
        settings: &ScraperSettings,
        url_template: &str,
        table: &SelectorTable,
    ) -> Result<Self, ScraperBuildError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .pool_idle_timeout(settings.pool_idle_timeout())
            .build()?;

        Ok(Self {
            client,
            url_template: url_template.to_string(),
            selectors: CompiledSelectors::compile(table)?,
        })
    }

    fn search_url(&self, keyword: &str) -> String {
        self.url_template
            .replace("{query}", &urlencoding::encode(keyword))
    }
}

/// Naver 搜索结果页抓取器
///
/// 桌面端和移动端各自持有一个连接池，请求头每次随机生成。
/// 失败不在这里重试，由队列的重新投递兜底。
pub struct NaverSearchEngine {
    desktop: DeviceProfile,
    mobile: DeviceProfile,
    headers: HeaderGenerator,
}

impl NaverSearchEngine {
    pub fn new(settings: &ScraperSettings) -> Result<Self, ScraperBuildError> {
        Ok(Self {
            desktop: DeviceProfile::build(
                settings,
                &settings.desktop_url_template,
                SelectorTable::for_device(Device::Desktop),
            )?,
            mobile: DeviceProfile::build(
                settings,
                &settings.mobile_url_template,
                SelectorTable::for_device(Device::Mobile),
            )?,
            headers: HeaderGenerator::new(),
        })
    }

    fn profile(&self, device: Device) -> &DeviceProfile {
        match device {
            Device::Desktop => &self.desktop,
            Device::Mobile => &self.mobile,
        }
    }

    /// 生成本次请求的随机请求头
    fn request_headers(&self) -> HeaderMap {
        let generated = {
            let mut rng = rand::rng();
            self.headers.generate(&mut rng)
        };

        let mut map = HeaderMap::with_capacity(generated.len());
        for (name, value) in generated {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => warn!(header = name, "Skipping invalid generated header"),
            }
        }
        map
    }

    /// 解析结果页并抽取记录（同步执行，文档不会跨越 await 存活）
    pub fn parse_page(
        &self,
        body: &[u8],
        keyword: &str,
        device: Device,
    ) -> Result<ResultBatch, FetchError> {
        parse_page(body, keyword, device, &self.profile(device).selectors)
    }
}

#[async_trait]
impl SearchEngine for NaverSearchEngine {
    async fn fetch_and_extract(
        &self,
        keyword: &str,
        device: Device,
    ) -> Result<ResultBatch, FetchError> {
        let profile = self.profile(device);
        let url = profile.search_url(keyword);
        debug!(%url, %device, "Fetching search page");

        let response = profile
            .client
            .get(&url)
            .headers(self.request_headers())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        parse_page(&body, keyword, device, &profile.selectors)
    }

    fn name(&self) -> &'static str {
        "naver"
    }
}

/// 解析响应体并按文档顺序抽取结果
///
/// 非法 UTF-8 字节按替换字符解码；响应体为空或不包含任何标记时视为解析失败，
/// 页面合法但没有匹配的结果区块时返回空结果集。
pub fn parse_page(
    body: &[u8],
    keyword: &str,
    device: Device,
    selectors: &CompiledSelectors,
) -> Result<ResultBatch, FetchError> {
    let html = String::from_utf8_lossy(body);

    if html.trim().is_empty() {
        return Err(FetchError::ParseFailure("empty body".to_string()));
    }
    if !html.contains('<') {
        return Err(FetchError::ParseFailure(
            "body contains no markup".to_string(),
        ));
    }

    let records = extract_records(&html, keyword, device, selectors);
    Ok(ResultBatch::new(keyword, device, records))
}

/// 从 HTML 中抽取结果记录，排名从 1 开始连续编号
pub fn extract_records(
    html: &str,
    keyword: &str,
    device: Device,
    selectors: &CompiledSelectors,
) -> Vec<ResultRecord> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.container)
        .enumerate()
        .map(|(index, item)| ResultRecord {
            query: keyword.to_string(),
            device,
            rank: index as u32 + 1,
            site_name: joined_text(item, &selectors.site_name),
            display_url: strip_trailing_slash(joined_text(item, &selectors.display_url)),
            title: title_text(item, &selectors.title),
            description: joined_text(item, &selectors.description),
        })
        .collect()
}

fn joined_text(item: ElementRef<'_>, selector: &Selector) -> String {
    item.select(selector)
        .flat_map(|node| node.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn title_text(item: ElementRef<'_>, selector: &Selector) -> String {
    item.select(selector)
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR)
}

fn strip_trailing_slash(mut url: String) -> String {
    if url.ends_with('/') {
        url.pop();
    }
    url
}
