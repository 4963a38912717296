// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serp_crawlrs::application::use_cases::run_crawl::RunCrawlUseCase;
use serp_crawlrs::config::settings::Settings;
use serp_crawlrs::utils::telemetry;
use tracing::{error, info};

/// 主函数
///
/// 加载配置，执行一次有限轮数的抓取运行，输出汇总后退出
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.telemetry);
    info!("Starting serp-crawlrs...");

    // 3. Assemble queue, scraper and storage
    let run = RunCrawlUseCase::from_settings(&settings).await?;

    // 4. Run rounds until the queue drains or the round limit is hit
    match run.execute().await {
        Ok(summary) => {
            info!("{}", summary);
            println!("{}", summary);
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
