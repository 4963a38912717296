// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::{
    config::settings::Settings,
    domain::{
        models::round::RunSummary,
        repositories::storage_repository::StorageRepository,
        search::engine::SearchEngine,
        services::result_uploader::ResultUploader,
    },
    infrastructure::{search::naver::NaverSearchEngine, storage::create_storage_repository},
    queue::{
        job_queue::{JobQueue, ReceiveOptions},
        poller::JobPoller,
        scheduler::RoundScheduler,
        sqs_queue::SqsJobQueue,
    },
    utils::errors::RunError,
    workers::{dispatcher::WorkerDispatcher, scrape_worker::ScrapeWorker},
};
use std::sync::Arc;
use tracing::info;

/// 一次完整的抓取运行
///
/// 队列、存储和 HTTP 客户端在构造时创建一次，所有工作者共享
pub struct RunCrawlUseCase {
    scheduler: RoundScheduler,
}

impl RunCrawlUseCase {
    /// 使用给定的队列、抓取器和存储组装运行
    pub fn new(
        queue: Arc<dyn JobQueue>,
        engine: Arc<dyn SearchEngine>,
        storage: Arc<dyn StorageRepository>,
        settings: &Settings,
    ) -> Result<Self, RunError> {
        let uploader = Arc::new(ResultUploader::new(storage, &settings.storage)?);
        let worker = Arc::new(ScrapeWorker::new(
            queue.clone(),
            engine,
            uploader,
            settings.scraper.honor_device_hint,
        ));
        let dispatcher = Arc::new(WorkerDispatcher::new(
            worker,
            settings.scheduler.max_concurrency,
        ));
        let poller = JobPoller::new(queue, ReceiveOptions::from(&settings.queue));

        Ok(Self {
            scheduler: RoundScheduler::new(poller, dispatcher, settings.scheduler.max_rounds),
        })
    }

    /// 根据配置创建 SQS 队列、Naver 抓取器和存储后端
    pub async fn from_settings(settings: &Settings) -> Result<Self, RunError> {
        let queue = Arc::new(SqsJobQueue::from_settings(&settings.queue).await);
        let engine = Arc::new(NaverSearchEngine::new(&settings.scraper)?);
        let storage = create_storage_repository(&settings.storage).await?;
        info!(
            storage = %settings.storage.storage_type,
            max_concurrency = settings.scheduler.max_concurrency,
            "Crawl run assembled"
        );

        Self::new(queue, engine, storage, settings)
    }

    pub async fn execute(&self) -> Result<RunSummary, RunError> {
        Ok(self.scheduler.run().await?)
    }
}
