// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// 队列消息的确认凭据
///
/// 不可克隆：删除消息时按值消费，同一凭据不会被使用两次
#[derive(PartialEq, Eq)]
pub struct ReceiptHandle(String);

impl ReceiptHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ReceiptHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // handles are long opaque blobs, keep logs readable
        let prefix: String = self.0.chars().take(12).collect();
        write!(f, "ReceiptHandle({}…)", prefix)
    }
}

/// 从队列拉取到的原始消息
#[derive(Debug)]
pub struct QueueMessage {
    pub message_id: Option<String>,
    pub body: String,
    pub receipt: ReceiptHandle,
}

impl QueueMessage {
    pub fn new(message_id: Option<String>, body: impl Into<String>, receipt: ReceiptHandle) -> Self {
        Self {
            message_id,
            body: body.into(),
            receipt,
        }
    }
}

/// 消息体格式: `{"keyword": "...", "device": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
    #[serde(default)]
    pub device: Option<String>,
}

/// 消息体反序列化失败
#[derive(Debug, Error)]
pub enum JobError {
    #[error("invalid job body: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// 一个待处理的关键词任务
#[derive(Debug)]
pub struct Job {
    pub message_id: Option<String>,
    pub keyword: String,
    pub device_hint: Option<String>,
    pub receipt: ReceiptHandle,
}

impl Job {
    /// 解析消息体为任务
    ///
    /// 失败时消息连同其凭据一起被丢弃，不做确认，等待队列重新投递
    pub fn from_message(message: QueueMessage) -> Result<Self, JobError> {
        let request: SearchRequest = serde_json::from_str(&message.body)?;

        Ok(Self {
            message_id: message.message_id,
            keyword: request.keyword,
            device_hint: request.device,
            receipt: message.receipt,
        })
    }
}
