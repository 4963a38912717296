// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::{ResultBatch, ResultRecord};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use thiserror::Error;

/// 结果文件的固定表头
pub const CSV_HEADER: [&str; 7] = [
    "query",
    "device",
    "rank",
    "site_name",
    "display_url",
    "title",
    "description",
];

/// 上传对象的内容类型
pub const CONTENT_TYPE: &str = "application/gzip";

/// 编码错误类型
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Compression failed: {0}")]
    Io(#[from] std::io::Error),
}

/// 将结果记录序列化为带表头的 CSV
///
/// 行顺序与输入顺序一致，包含分隔符、引号或换行的字段按标准规则加引号
pub fn encode_csv(records: &[ResultRecord]) -> Result<Vec<u8>, EncodeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|e| EncodeError::Io(e.into_error()))
}

/// 单次 gzip 压缩，每个批次使用新的编码器
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 4), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// 编码并压缩整个结果集
pub fn encode_batch(batch: &ResultBatch) -> Result<Vec<u8>, EncodeError> {
    let csv = encode_csv(batch.records())?;
    gzip(&csv)
}
