// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 组装一次完整的抓取运行
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供外部服务集成，如搜索结果页抓取、对象存储和 AWS 配置
pub mod infrastructure;

/// 队列模块
///
/// 实现任务队列、拉取和轮次调度
pub mod queue;

/// 工具模块
///
/// 日志初始化和运行级错误
pub mod utils;

/// 工作器模块
///
/// 实现有界并发的任务派发和单任务处理
pub mod workers;
