// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::RetrySettings;
use std::time::Duration;

/// 重试策略配置
///
/// `max_attempts` 是总尝试次数（包含第一次请求），不是额外重试次数
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大尝试次数
    pub max_attempts: u32,
    /// 初始退避时间（退避窗口下限）
    pub initial_backoff: Duration,
    /// 最大退避时间（退避窗口上限）
    pub max_backoff: Duration,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 抖动因子 (0.0-1.0)，只向上叠加
    pub jitter_factor: f64,
    /// 是否启用抖动
    pub enable_jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(4),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
            enable_jitter: true,
        }
    }
}

/// 负数、NaN 或溢出的秒数退回到 `fallback`
fn secs_or(value: f64, fallback: Duration) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(fallback)
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        let defaults = Self::default();
        let initial_backoff = secs_or(settings.min_backoff_secs, defaults.initial_backoff);
        let max_backoff =
            secs_or(settings.max_backoff_secs, defaults.max_backoff).max(initial_backoff);
        let multiplier = settings.backoff_multiplier;
        let backoff_multiplier = if multiplier.is_finite() && multiplier >= 1.0 {
            multiplier
        } else {
            defaults.backoff_multiplier
        };

        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_backoff,
            max_backoff,
            backoff_multiplier,
            jitter_factor: if settings.jitter_factor.is_finite() {
                settings.jitter_factor.clamp(0.0, 1.0)
            } else {
                0.0
            },
            enable_jitter: settings.jitter_factor.is_finite() && settings.jitter_factor > 0.0,
        }
    }
}

impl RetryPolicy {
    /// 创建标准重试策略（3 次尝试，4-10 秒指数退避）
    pub fn standard() -> Self {
        Self::default()
    }

    /// 不等待的重试策略，用于测试和本地工具
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
            enable_jitter: false,
        }
    }

    /// 计算第 `attempt` 次失败之后的退避时间
    ///
    /// attempt 从 1 开始；结果落在 `[initial_backoff, max_backoff]` 内，再叠加抖动
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let backoff_secs = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        let capped_backoff = backoff_secs
            .min(self.max_backoff.as_secs_f64())
            .max(self.initial_backoff.as_secs_f64());

        let final_backoff = if self.enable_jitter && capped_backoff > 0.0 {
            let jitter_range = capped_backoff * self.jitter_factor;
            capped_backoff + rand::random_range(0.0..=jitter_range)
        } else {
            capped_backoff
        };

        secs_or(final_backoff, self.max_backoff)
    }

    /// 是否还有剩余尝试次数
    ///
    /// `attempts_made` 为已经完成的尝试次数
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}
