// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::domain::models::job::QueueMessage;
use crate::workers::scrape_worker::ScrapeWorker;
use crate::workers::worker_pool::BoundedTaskGroup;

/// 一轮消息的派发方式
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// 处理一批消息，全部结束后返回已完成的任务数（成功或失败）
    async fn dispatch(&self, messages: Vec<QueueMessage>) -> usize;
}

/// 工作者派发器
///
/// 每条消息一个工作任务，同时运行的任务不超过 `max_concurrency`
pub struct WorkerDispatcher {
    worker: Arc<ScrapeWorker>,
    max_concurrency: usize,
}

impl WorkerDispatcher {
    pub fn new(worker: Arc<ScrapeWorker>, max_concurrency: usize) -> Self {
        Self {
            worker,
            max_concurrency,
        }
    }
}

#[async_trait]
impl Dispatch for WorkerDispatcher {
    #[instrument(skip(self, messages), fields(jobs = messages.len()))]
    async fn dispatch(&self, messages: Vec<QueueMessage>) -> usize {
        let mut group = BoundedTaskGroup::new(self.max_concurrency);

        for message in messages {
            let worker = self.worker.clone();
            if let Err(e) = group.spawn(async move { worker.run(message).await }).await {
                error!("Failed to admit job: {}", e);
            }
        }

        let results = group.join_all().await;
        for result in &results {
            if let Err(e) = result {
                error!("Worker task aborted: {}", e);
            }
        }

        info!(completed = results.len(), "All workers joined");
        results.len()
    }
}
