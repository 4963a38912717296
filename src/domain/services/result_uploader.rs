// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::StorageSettings;
use crate::domain::models::search_result::ResultBatch;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use crate::domain::services::result_encoder::{self, EncodeError, CONTENT_TYPE};
use chrono::{DateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use config::ConfigError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// 上传错误类型
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadAck {
    /// 结果集为空，未写入存储
    Skipped,
    /// 已写入存储
    Stored { key: String, records: usize },
}

/// 生成按日期和小时分区的对象键
///
/// 格式: `<prefix>/basic_date=<YYYYMMDD>/hh=<H>/<id>.csv.gz`
pub fn partition_key<T: TimeZone>(prefix: &str, at: &DateTime<T>, id: &str) -> String
where
    T::Offset: std::fmt::Display,
{
    format!(
        "{}/basic_date={}/hh={}/{}.csv.gz",
        prefix,
        at.format("%Y%m%d"),
        at.hour(),
        id
    )
}

/// 结果上传器
///
/// 将结果集编码为 gzip 压缩的 CSV 并以单个对象写入存储，不做重试
pub struct ResultUploader {
    storage: Arc<dyn StorageRepository>,
    key_prefix: String,
    time_zone: Tz,
    object_id_length: usize,
}

impl ResultUploader {
    pub fn new(
        storage: Arc<dyn StorageRepository>,
        settings: &StorageSettings,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_layout(
            storage,
            settings.key_prefix.clone(),
            settings.tz()?,
            settings.object_id_length,
        ))
    }

    pub fn with_layout(
        storage: Arc<dyn StorageRepository>,
        key_prefix: impl Into<String>,
        time_zone: Tz,
        object_id_length: usize,
    ) -> Self {
        Self {
            storage,
            key_prefix: key_prefix.into(),
            time_zone,
            object_id_length,
        }
    }

    /// 为给定时刻生成一个新的对象键，日期和小时按配置时区计算
    pub fn object_key(&self, now: DateTime<Utc>) -> String {
        let local = now.with_timezone(&self.time_zone);
        let id: String = Uuid::new_v4()
            .to_string()
            .chars()
            .take(self.object_id_length)
            .collect();

        partition_key(&self.key_prefix, &local, &id)
    }

    /// 上传一个结果集
    ///
    /// 空结果集直接返回 `UploadAck::Skipped`，不访问存储
    #[instrument(skip(self, batch), fields(query = %batch.query(), device = %batch.device()))]
    pub async fn upload(&self, batch: ResultBatch) -> Result<UploadAck, UploadError> {
        if batch.is_empty() {
            debug!("No results to upload, skipping");
            return Ok(UploadAck::Skipped);
        }

        let body = result_encoder::encode_batch(&batch)?;
        let key = self.object_key(Utc::now());
        let records = batch.len();

        self.storage.put_object(&key, body, CONTENT_TYPE).await?;

        metrics::counter!("serp_records_uploaded_total").increment(records as u64);
        info!(%key, records, "Uploaded result batch");

        Ok(UploadAck::Stored { key, records })
    }
}
