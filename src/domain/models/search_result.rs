// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 抓取设备类型
///
/// 序列化为下游约定的设备代码 `PC` / `MO`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    #[serde(rename = "PC")]
    Desktop,
    #[serde(rename = "MO")]
    Mobile,
}

impl Device {
    /// 下游文件中使用的设备代码
    pub fn code(&self) -> &'static str {
        match self {
            Device::Desktop => "PC",
            Device::Mobile => "MO",
        }
    }

    /// 根据任务中的设备提示解析设备类型
    ///
    /// 无法识别的提示返回 `None`，由调用方决定默认值
    pub fn from_hint(hint: &str) -> Option<Self> {
        hint.parse().ok()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error)]
#[error("unknown device: {0}")]
pub struct UnknownDevice(String);

impl FromStr for Device {
    type Err = UnknownDevice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" | "desktop" => Ok(Device::Desktop),
            "mo" | "m" | "mobile" => Ok(Device::Mobile),
            _ => Err(UnknownDevice(s.to_string())),
        }
    }
}

/// 单条搜索结果记录
///
/// 所有字符串字段在页面中缺失时都为空字符串，而不是缺省值，
/// 保证编码阶段不会遇到缺失列。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub query: String,
    pub device: Device,
    /// 从 1 开始的页面内排名
    pub rank: u32,
    pub site_name: String,
    pub display_url: String,
    pub title: String,
    pub description: String,
}

/// 单个关键词一次抓取得到的有序结果集
///
/// 抽取完成后不再修改，由上传器按值消费一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBatch {
    query: String,
    device: Device,
    records: Vec<ResultRecord>,
}

impl ResultBatch {
    pub fn new(query: impl Into<String>, device: Device, records: Vec<ResultRecord>) -> Self {
        Self {
            query: query.into(),
            device,
            records,
        }
    }

    pub fn empty(query: impl Into<String>, device: Device) -> Self {
        Self::new(query, device, Vec::new())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
