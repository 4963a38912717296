// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 把队列、抓取器、上传器和调度器组装成一次完整运行
pub mod use_cases;
