// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 任务队列抽象、SQS 实现、拉取器以及轮次调度器
pub mod job_queue;
pub mod poller;
pub mod scheduler;
pub mod sqs_queue;
