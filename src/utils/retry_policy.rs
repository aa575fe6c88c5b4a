// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 退避方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// 第n次重试等待 `initial_backoff * n`
    Linear,
    /// 第n次重试等待 `initial_backoff * multiplier^(n-1)`
    Exponential,
}

/// 重试策略配置
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大重试次数（不含首次尝试）
    pub max_retries: u32,
    /// 初始退避时间
    pub initial_backoff: Duration,
    /// 最大退避时间
    pub max_backoff: Duration,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 退避方式
    pub strategy: BackoffStrategy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            strategy: BackoffStrategy::Exponential,
        }
    }
}

impl RetryPolicy {
    /// 页面抓取使用的线性退避策略
    pub fn linear(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff: base_delay,
            max_backoff: Duration::MAX,
            strategy: BackoffStrategy::Linear,
            ..Self::default()
        }
    }

    /// Redis重连使用的指数退避策略（从1秒开始）
    pub fn exponential(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// 计算第 `attempt` 次重试（从1开始）的退避时间
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let base = self.initial_backoff.as_secs_f64();

        let backoff_secs = match self.strategy {
            BackoffStrategy::Linear => base * attempt as f64,
            BackoffStrategy::Exponential => {
                base * self.backoff_multiplier.powi(attempt as i32 - 1)
            }
        };

        Duration::from_secs_f64(backoff_secs.min(self.max_backoff.as_secs_f64()))
    }

    /// 超时重试使用的固定退避时间
    pub fn fixed_backoff(&self) -> Duration {
        self.initial_backoff
    }

    /// 是否应该重试
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}
