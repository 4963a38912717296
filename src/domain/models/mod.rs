// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 任务（job）：从队列消息解析出的关键词任务及其确认凭据
/// - 搜索结果（search_result）：抽取出的结果记录和结果集
/// - 轮次（round）：调度器的单轮结果与运行汇总
pub mod job;
pub mod round;
pub mod search_result;
