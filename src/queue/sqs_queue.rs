// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::QueueSettings;
use crate::domain::models::job::{QueueMessage, ReceiptHandle};
use crate::infrastructure::aws;
use crate::queue::job_queue::{JobQueue, QueueError, ReceiveOptions};
use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use tracing::warn;

/// SQS 任务队列实现
pub struct SqsJobQueue {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsJobQueue {
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// 根据配置创建 SQS 客户端，凭据来自默认凭据链
    pub async fn from_settings(settings: &QueueSettings) -> Self {
        let sdk_config = aws::load_sdk_config(settings.region.clone(), None, None).await;

        let mut config_builder = aws_sdk_sqs::config::Builder::from(&sdk_config);
        if let Some(ep) = &settings.endpoint {
            config_builder = config_builder.endpoint_url(ep);
        }

        let client = aws_sdk_sqs::Client::from_conf(config_builder.build());
        Self::new(client, settings.queue_url.clone())
    }
}

#[async_trait]
impl JobQueue for SqsJobQueue {
    async fn receive(&self, options: &ReceiveOptions) -> Result<Vec<QueueMessage>, QueueError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(options.max_messages)
            .wait_time_seconds(options.wait_time_seconds)
            .visibility_timeout(options.visibility_timeout_seconds)
            .send()
            .await
            .map_err(|e| QueueError::Receive(DisplayErrorContext(&e).to_string()))?;

        let messages = output
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|message| {
                let Some(receipt) = message.receipt_handle else {
                    warn!(message_id = ?message.message_id, "Message without receipt handle, skipping");
                    return None;
                };
                Some(QueueMessage::new(
                    message.message_id,
                    message.body.unwrap_or_default(),
                    ReceiptHandle::new(receipt),
                ))
            })
            .collect();

        Ok(messages)
    }

    async fn delete(&self, receipt: ReceiptHandle) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt.into_inner())
            .send()
            .await
            .map_err(|e| QueueError::Delete(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
