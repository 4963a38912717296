// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::{Device, ResultBatch};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),
    #[error("Failed to parse document: {0}")]
    ParseFailure(String),
}

impl FetchError {
    /// 用于指标标签的简短类别名
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::UnexpectedStatus(_) => "status",
            FetchError::ParseFailure(_) => "parse",
        }
    }
}

#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Fetch the result page for one keyword and extract its records in document order.
    ///
    /// An empty page yields an empty batch, not an error. Failures are never retried here.
    async fn fetch_and_extract(
        &self,
        keyword: &str,
        device: Device,
    ) -> Result<ResultBatch, FetchError>;

    /// Get the name of the search engine
    fn name(&self) -> &'static str;
}
