// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::QueueMessage;
use crate::domain::models::round::{RoundOutcome, RunSummary};
use crate::queue::poller::{JobPoller, PollError};
use crate::workers::dispatcher::Dispatch;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// 某一轮拉取失败
#[derive(Debug, Error)]
#[error("Error in round {round}: {source}")]
pub struct RoundError {
    pub round: u32,
    #[source]
    pub source: PollError,
}

/// 调度器状态
#[derive(Debug)]
pub enum RoundState {
    Idle,
    Polling { round: u32 },
    Dispatching { round: u32, messages: Vec<QueueMessage> },
    Stop { round: u32 },
    Done,
}

/// 轮次调度器
///
/// 每一轮拉取一批消息、派发并等待全部完成，轮与轮之间严格串行。
/// 拉取为空时提前结束；拉取失败终止整次运行。
pub struct RoundScheduler {
    poller: JobPoller,
    dispatcher: Arc<dyn Dispatch>,
    max_rounds: u32,
}

impl RoundScheduler {
    pub fn new(poller: JobPoller, dispatcher: Arc<dyn Dispatch>, max_rounds: u32) -> Self {
        Self {
            poller,
            dispatcher,
            max_rounds,
        }
    }

    /// 执行一次完整运行
    pub async fn run(&self) -> Result<RunSummary, RoundError> {
        let mut summary = RunSummary::default();
        let mut state = RoundState::Idle;
        info!(max_rounds = self.max_rounds, "Starting run");

        loop {
            state = match state {
                RoundState::Idle if self.max_rounds == 0 => RoundState::Done,
                RoundState::Idle => RoundState::Polling { round: 1 },
                RoundState::Polling { round } => {
                    metrics::counter!("serp_rounds_total").increment(1);
                    let messages = self
                        .poller
                        .poll()
                        .await
                        .map_err(|source| RoundError { round, source })?;

                    if messages.is_empty() {
                        info!(round, "No messages to process, stopping early");
                        summary.record(RoundOutcome {
                            round_number: round,
                            jobs_processed: 0,
                        });
                        RoundState::Stop { round }
                    } else {
                        RoundState::Dispatching { round, messages }
                    }
                }
                RoundState::Dispatching { round, messages } => {
                    let outcome = self.dispatch_round(round, messages).await;
                    summary.record(outcome);
                    info!(
                        round,
                        processed = outcome.jobs_processed,
                        total = summary.total_processed,
                        "Round summary"
                    );

                    if round >= self.max_rounds {
                        RoundState::Stop { round }
                    } else {
                        RoundState::Polling { round: round + 1 }
                    }
                }
                RoundState::Stop { .. } => RoundState::Done,
                RoundState::Done => break,
            };
        }

        info!(
            rounds = summary.rounds_executed,
            processed = summary.total_processed,
            "Run finished"
        );
        Ok(summary)
    }

    #[instrument(skip(self, messages), fields(jobs = messages.len()))]
    async fn dispatch_round(&self, round: u32, messages: Vec<QueueMessage>) -> RoundOutcome {
        let jobs_processed = self.dispatcher.dispatch(messages).await;

        RoundOutcome {
            round_number: round,
            jobs_processed,
        }
    }
}
