// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 默认桌面端搜索地址模板，`{query}` 会被替换为编码后的关键词
pub const DEFAULT_DESKTOP_URL_TEMPLATE: &str =
    "https://search.naver.com/search.naver?where=nexearch&sm=top_hty&fbm=0&ie=utf8&query={query}";

/// 默认移动端搜索地址模板
pub const DEFAULT_MOBILE_URL_TEMPLATE: &str =
    "https://m.search.naver.com/search.naver?sm=mtp_hty.top&where=m&query={query}";

/// 应用程序配置设置
///
/// 包含队列、存储、抓取、调度和日志等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 任务队列配置
    pub queue: QueueSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 抓取配置
    pub scraper: ScraperSettings,
    /// 轮次调度配置
    pub scheduler: SchedulerSettings,
    /// 日志配置
    pub telemetry: TelemetrySettings,
}

/// 任务队列配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSettings {
    /// 队列地址
    pub queue_url: String,
    /// 队列所在区域
    pub region: Option<String>,
    /// 自定义端点 (可选，用于 LocalStack 等兼容服务)
    pub endpoint: Option<String>,
    /// 单次拉取的最大消息数
    pub max_messages: i32,
    /// 长轮询等待时间（秒）
    pub wait_time_seconds: i32,
    /// 消息可见性超时（秒）
    pub visibility_timeout_seconds: i32,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储类型 (s3, local)
    pub storage_type: String,
    /// 本地存储路径 (当 type=local 时使用)
    pub local_path: Option<String>,
    /// S3 区域
    pub region: Option<String>,
    /// S3 存储桶名称
    pub bucket: Option<String>,
    /// S3 访问密钥
    pub access_key: Option<String>,
    /// S3 密钥
    pub secret_key: Option<String>,
    /// S3 端点 (可选，用于 MinIO 等兼容服务)
    pub endpoint: Option<String>,
    /// 对象键前缀
    pub key_prefix: String,
    /// 分区日期使用的时区名称
    pub time_zone: String,
    /// 对象文件名中随机标识的长度
    pub object_id_length: usize,
}

impl StorageSettings {
    /// 解析配置的时区名称
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.time_zone.parse::<Tz>().map_err(|_| {
            ConfigError::Message(format!("unknown time zone: {}", self.time_zone))
        })
    }
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 桌面端搜索地址模板
    pub desktop_url_template: String,
    /// 移动端搜索地址模板
    pub mobile_url_template: String,
    /// 请求超时时间（秒）
    pub request_timeout_seconds: u64,
    /// 每个主机保留的最大空闲连接数
    pub pool_max_idle_per_host: usize,
    /// 空闲连接超时时间（秒）
    pub pool_idle_timeout_seconds: u64,
    /// 是否根据任务中的设备提示选择移动端
    pub honor_device_hint: bool,
}

impl ScraperSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_seconds)
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            desktop_url_template: DEFAULT_DESKTOP_URL_TEMPLATE.to_string(),
            mobile_url_template: DEFAULT_MOBILE_URL_TEMPLATE.to_string(),
            request_timeout_seconds: 5,
            pool_max_idle_per_host: 20,
            pool_idle_timeout_seconds: 90,
            honor_device_hint: false,
        }
    }
}

/// 轮次调度配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    /// 单次运行的最大轮数
    pub max_rounds: u32,
    /// 同时运行的工作器上限
    pub max_concurrency: usize,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            max_concurrency: 10,
        }
    }
}

/// 日志配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetrySettings {
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、配置文件和环境变量加载配置
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SERP_CRAWLRS").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Default queue settings
            .set_default("queue.queue_url", "")?
            .set_default("queue.max_messages", 10)?
            .set_default("queue.wait_time_seconds", 2)?
            .set_default("queue.visibility_timeout_seconds", 5)?
            // Default storage settings
            .set_default("storage.storage_type", "s3")?
            .set_default("storage.local_path", "./storage")?
            .set_default("storage.key_prefix", "data")?
            .set_default("storage.time_zone", "Asia/Seoul")?
            .set_default("storage.object_id_length", 18)?
            // Default scraper settings
            .set_default("scraper.desktop_url_template", DEFAULT_DESKTOP_URL_TEMPLATE)?
            .set_default("scraper.mobile_url_template", DEFAULT_MOBILE_URL_TEMPLATE)?
            .set_default("scraper.request_timeout_seconds", 5)?
            .set_default("scraper.pool_max_idle_per_host", 20)?
            .set_default("scraper.pool_idle_timeout_seconds", 90)?
            .set_default("scraper.honor_device_hint", false)?
            // Default scheduler settings
            .set_default("scheduler.max_rounds", 5)?
            .set_default("scheduler.max_concurrency", 10)?
            // Default telemetry settings
            .set_default("telemetry.json", false)
    }

    /// 校验配置中无法由类型系统保证的约束
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.tz()?;

        if self.queue.queue_url.trim().is_empty() {
            return Err(ConfigError::Message("queue.queue_url must be set".to_string()));
        }
        if !(1..=10).contains(&self.queue.max_messages) {
            return Err(ConfigError::Message(format!(
                "queue.max_messages must be between 1 and 10, got {}",
                self.queue.max_messages
            )));
        }
        if !(0..=20).contains(&self.queue.wait_time_seconds) {
            return Err(ConfigError::Message(format!(
                "queue.wait_time_seconds must be between 0 and 20, got {}",
                self.queue.wait_time_seconds
            )));
        }

        if self.scheduler.max_concurrency == 0 {
            return Err(ConfigError::Message(
                "scheduler.max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.storage.object_id_length == 0 {
            return Err(ConfigError::Message(
                "storage.object_id_length must be at least 1".to_string(),
            ));
        }
        for template in [
            &self.scraper.desktop_url_template,
            &self.scraper.mobile_url_template,
        ] {
            if !template.contains("{query}") {
                return Err(ConfigError::Message(format!(
                    "search url template is missing the {{query}} placeholder: {}",
                    template
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;
