// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索结果页抓取模块
///
/// 包括随机请求头生成、设备选择器表以及 Naver 结果页抓取器
pub mod headers;
pub mod naver;
pub mod selectors;

pub use headers::HeaderGenerator;
pub use naver::{NaverSearchEngine, ScraperBuildError};
