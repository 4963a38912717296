// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::QueueSettings;
use crate::domain::models::job::{QueueMessage, ReceiptHandle};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 拉取消息失败
    #[error("Receive failed: {0}")]
    Receive(String),

    /// 删除消息失败
    #[error("Delete failed: {0}")]
    Delete(String),
}

/// 单次拉取的参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveOptions {
    pub max_messages: i32,
    pub wait_time_seconds: i32,
    pub visibility_timeout_seconds: i32,
}

impl Default for ReceiveOptions {
    fn default() -> Self {
        Self {
            max_messages: 10,
            wait_time_seconds: 2,
            visibility_timeout_seconds: 5,
        }
    }
}

impl From<&QueueSettings> for ReceiveOptions {
    fn from(settings: &QueueSettings) -> Self {
        Self {
            max_messages: settings.max_messages,
            wait_time_seconds: settings.wait_time_seconds,
            visibility_timeout_seconds: settings.visibility_timeout_seconds,
        }
    }
}

/// 任务队列特质
///
/// 未删除的消息在可见性超时后由队列重新投递
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// 拉取一批消息，没有消息时返回空列表
    async fn receive(&self, options: &ReceiveOptions) -> Result<Vec<QueueMessage>, QueueError>;

    /// 按凭据删除（确认）一条消息
    async fn delete(&self, receipt: ReceiptHandle) -> Result<(), QueueError>;
}

#[async_trait]
impl<T: JobQueue + ?Sized> JobQueue for Arc<T> {
    async fn receive(&self, options: &ReceiveOptions) -> Result<Vec<QueueMessage>, QueueError> {
        (**self).receive(options).await
    }

    async fn delete(&self, receipt: ReceiptHandle) -> Result<(), QueueError> {
        (**self).delete(receipt).await
    }
}

#[derive(Default)]
struct InMemoryState {
    pending: VecDeque<(String, String)>,
    in_flight: HashMap<String, String>,
    deleted: Vec<String>,
    receive_calls: usize,
    next_id: u64,
    fail_receive: bool,
}

/// 内存任务队列实现
///
/// 用于测试和本地运行。拉取的消息进入在途状态，不会自动重新投递；
/// 删除记录按调用顺序保留，便于断言确认行为。
#[derive(Default)]
pub struct InMemoryJobQueue {
    state: Mutex<InMemoryState>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入队一条消息，返回其消息 ID
    pub async fn push(&self, body: impl Into<String>) -> String {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = format!("msg-{}", state.next_id);
        state.pending.push_back((id.clone(), body.into()));
        id
    }

    /// 之后的拉取全部失败
    pub async fn fail_receives(&self) {
        self.state.lock().await.fail_receive = true;
    }

    /// 已删除消息的 ID，按删除顺序
    pub async fn deleted(&self) -> Vec<String> {
        self.state.lock().await.deleted.clone()
    }

    /// 已拉取但未删除的消息 ID
    pub async fn in_flight(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.lock().await.in_flight.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn pending_len(&self) -> usize {
        self.state.lock().await.pending.len()
    }

    pub async fn receive_calls(&self) -> usize {
        self.state.lock().await.receive_calls
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn receive(&self, options: &ReceiveOptions) -> Result<Vec<QueueMessage>, QueueError> {
        let mut state = self.state.lock().await;
        state.receive_calls += 1;

        if state.fail_receive {
            return Err(QueueError::Receive("in-memory queue unavailable".to_string()));
        }

        let take = options.max_messages.max(0) as usize;
        let mut messages = Vec::new();
        while messages.len() < take {
            let Some((id, body)) = state.pending.pop_front() else {
                break;
            };
            // the message id doubles as the receipt handle
            state.in_flight.insert(id.clone(), body.clone());
            messages.push(QueueMessage::new(
                Some(id.clone()),
                body,
                ReceiptHandle::new(id),
            ));
        }

        Ok(messages)
    }

    async fn delete(&self, receipt: ReceiptHandle) -> Result<(), QueueError> {
        let mut state = self.state.lock().await;
        let id = receipt.into_inner();

        if state.in_flight.remove(&id).is_none() {
            return Err(QueueError::Delete(format!("unknown receipt handle: {}", id)));
        }
        state.deleted.push(id);
        Ok(())
    }
}
