// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::{Credentials, Region};

/// 加载 AWS SDK 共享配置
///
/// 同时提供访问密钥和密钥时使用静态凭据，否则回退到默认凭据链
/// （环境变量、配置文件、实例角色等）。
pub async fn load_sdk_config(
    region: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }

    if let (Some(access_key), Some(secret_key)) = (access_key, secret_key) {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");
        loader = loader.credentials_provider(credentials);
    }

    loader.load().await
}
