// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 有界任务组、单任务抓取工作者以及每轮的派发器
pub mod dispatcher;
pub mod scrape_worker;
pub mod worker_pool;

pub use dispatcher::{Dispatch, WorkerDispatcher};
pub use scrape_worker::ScrapeWorker;
pub use worker_pool::BoundedTaskGroup;
