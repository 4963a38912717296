// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 结果编码（result_encoder）：将结果集编码为 CSV 并压缩
/// - 结果上传（result_uploader）：生成分区对象键并写入对象存储
pub mod result_encoder;
pub mod result_uploader;
