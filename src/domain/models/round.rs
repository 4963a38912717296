// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 单轮调度的结果，仅用于汇总和日志
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round_number: u32,
    pub jobs_processed: usize,
}

/// 一次完整运行的汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// 实际执行的轮数，包括拉取为空而提前结束的那一轮
    pub rounds_executed: u32,
    pub total_processed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: RoundOutcome) {
        self.rounds_executed = outcome.round_number;
        self.total_processed += outcome.jobs_processed;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run completed. Total rounds: {}, Total keywords processed: {}",
            self.rounds_executed, self.total_processed
        )
    }
}
