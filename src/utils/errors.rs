// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::storage_repository::StorageError;
use crate::infrastructure::search::naver::ScraperBuildError;
use crate::queue::scheduler::RoundError;
use config::ConfigError;
use thiserror::Error;

/// 一次运行的致命错误
///
/// 单个任务的失败只记录日志，不会出现在这里
#[derive(Error, Debug)]
pub enum RunError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("存储初始化失败: {0}")]
    Storage(#[from] StorageError),

    #[error("抓取器初始化失败: {0}")]
    Scraper(#[from] ScraperBuildError),

    #[error(transparent)]
    Round(#[from] RoundError),
}
