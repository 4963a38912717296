// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::QueueMessage;
use crate::queue::job_queue::{JobQueue, QueueError, ReceiveOptions};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// 拉取失败，终止本次运行
#[derive(Debug, Error)]
#[error("Failed to poll job queue: {0}")]
pub struct PollError(#[from] pub QueueError);

/// 任务拉取器
pub struct JobPoller {
    queue: Arc<dyn JobQueue>,
    options: ReceiveOptions,
}

impl JobPoller {
    pub fn new(queue: Arc<dyn JobQueue>, options: ReceiveOptions) -> Self {
        Self { queue, options }
    }

    /// 拉取一批消息，没有消息时返回空列表
    pub async fn poll(&self) -> Result<Vec<QueueMessage>, PollError> {
        let messages = self.queue.receive(&self.options).await?;
        debug!(count = messages.len(), "Polled job queue");
        Ok(messages)
    }
}
