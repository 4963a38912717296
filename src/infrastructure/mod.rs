// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含与外部系统交互的具体实现：AWS 共享配置、搜索结果页抓取
/// 以及对象存储。基础设施层依赖于领域层的抽象接口。
pub mod aws;
pub mod search;
pub mod storage;
