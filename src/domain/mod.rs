// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：任务、搜索结果和轮次汇总
/// - 仓库接口（repositories）：对象存储抽象接口
/// - 搜索（search）：搜索引擎抓取接口
/// - 服务（services）：结果编码和上传
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod repositories;
pub mod search;
pub mod services;
