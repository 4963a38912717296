// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::{JoinError, JoinSet};

/// 有界任务组
///
/// 同时运行的任务数不超过 `limit`。`spawn` 在没有空闲许可时等待，
/// 许可随任务结束（无论成功、失败还是 panic）自动归还。
pub struct BoundedTaskGroup<T> {
    semaphore: Arc<Semaphore>,
    tasks: JoinSet<T>,
    limit: usize,
}

impl<T: Send + 'static> BoundedTaskGroup<T> {
    /// 创建任务组，`limit` 至少为 1
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            tasks: JoinSet::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 当前占用的许可数
    pub fn active(&self) -> usize {
        self.limit - self.semaphore.available_permits()
    }

    /// 已派发且尚未被回收的任务数
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 等待一个许可后派发任务
    pub async fn spawn<F>(&mut self, task: F) -> Result<(), AcquireError>
    where
        F: Future<Output = T> + Send + 'static,
    {
        let permit = self.semaphore.clone().acquire_owned().await?;
        self.tasks.spawn(async move {
            let _permit = permit;
            task.await
        });
        Ok(())
    }

    /// 等待所有任务结束，按完成顺序返回结果
    pub async fn join_all(&mut self) -> Vec<Result<T, JoinError>> {
        let mut results = Vec::with_capacity(self.tasks.len());
        while let Some(result) = self.tasks.join_next().await {
            results.push(result);
        }
        results
    }
}
