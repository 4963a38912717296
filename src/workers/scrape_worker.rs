// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::models::job::{Job, JobError, QueueMessage};
use crate::domain::models::search_result::Device;
use crate::domain::search::engine::{FetchError, SearchEngine};
use crate::domain::services::result_uploader::{ResultUploader, UploadAck, UploadError};
use crate::queue::job_queue::JobQueue;

/// 单个任务的失败原因
#[derive(Debug, Error)]
pub enum WorkerError {
    /// 消息体无法解析，未确认，等待重新投递
    #[error("Job rejected: {0}")]
    Job(#[from] JobError),

    /// 抓取失败，未确认，等待重新投递
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// 已确认但上传失败，结果丢失
    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}

impl WorkerError {
    /// 用于指标标签的失败阶段
    pub fn stage(&self) -> &'static str {
        match self {
            WorkerError::Job(_) => "deserialize",
            WorkerError::Fetch(_) => "fetch",
            WorkerError::Upload(_) => "upload",
        }
    }
}

/// 单个任务的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerOutcome {
    pub keyword: String,
    pub device: Device,
    /// 删除消息是否成功
    pub acknowledged: bool,
    pub upload: UploadAck,
}

/// 抓取工作者
///
/// 处理一条队列消息：解析、抓取、确认、上传。
/// 确认发生在上传之前，上传失败不会导致重新投递。
pub struct ScrapeWorker {
    queue: Arc<dyn JobQueue>,
    engine: Arc<dyn SearchEngine>,
    uploader: Arc<ResultUploader>,
    honor_device_hint: bool,
}

impl ScrapeWorker {
    pub fn new(
        queue: Arc<dyn JobQueue>,
        engine: Arc<dyn SearchEngine>,
        uploader: Arc<ResultUploader>,
        honor_device_hint: bool,
    ) -> Self {
        Self {
            queue,
            engine,
            uploader,
            honor_device_hint,
        }
    }

    /// 选择本次抓取的设备，默认只抓桌面端
    fn select_device(&self, job: &Job) -> Device {
        if !self.honor_device_hint {
            return Device::Desktop;
        }

        match job.device_hint.as_deref() {
            Some(hint) => Device::from_hint(hint).unwrap_or_else(|| {
                warn!(hint, "Unknown device hint, using desktop");
                Device::Desktop
            }),
            None => Device::Desktop,
        }
    }

    /// 处理一条消息，记录日志和指标，不向外传播错误
    pub async fn run(&self, message: QueueMessage) {
        match self.process(message).await {
            Ok(outcome) => {
                metrics::counter!("serp_jobs_processed_total").increment(1);
                debug!(keyword = %outcome.keyword, upload = ?outcome.upload, "Job finished");
            }
            Err(e) => {
                metrics::counter!("serp_jobs_failed_total", "stage" => e.stage()).increment(1);
                if let WorkerError::Fetch(fetch) = &e {
                    metrics::counter!(
                        "serp_fetch_failures_total",
                        "engine" => self.engine.name(),
                        "kind" => fetch.kind()
                    )
                    .increment(1);
                }
                error!(stage = e.stage(), "Job failed: {}", e);
            }
        }
    }

    #[instrument(skip(self, message), fields(message_id = ?message.message_id))]
    pub async fn process(&self, message: QueueMessage) -> Result<WorkerOutcome, WorkerError> {
        let job = Job::from_message(message)?;
        let device = self.select_device(&job);

        let batch = self
            .engine
            .fetch_and_extract(&job.keyword, device)
            .await
            .map_err(|e| {
                warn!(keyword = %job.keyword, %device, "Crawling failed: {}", e);
                e
            })?;

        let Job {
            keyword, receipt, ..
        } = job;

        let acknowledged = match self.queue.delete(receipt).await {
            Ok(()) => true,
            Err(e) => {
                metrics::counter!("serp_jobs_failed_total", "stage" => "ack").increment(1);
                error!(%keyword, "Failed to delete message: {}", e);
                false
            }
        };

        let upload = self.uploader.upload(batch).await?;
        if let UploadAck::Stored { records, .. } = &upload {
            info!(%keyword, %device, records, "Crawling completed");
        }

        Ok(WorkerOutcome {
            keyword,
            device,
            acknowledged,
            upload,
        })
    }
}

#[cfg(test)]
#[path = "scrape_worker_test.rs"]
mod scrape_worker_test;
