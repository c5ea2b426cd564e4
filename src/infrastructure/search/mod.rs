// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索服务模块
///
/// SearchAPI.io Google Jobs 客户端，以及按分钟限流的包装器
pub mod rate_limited;
pub mod searchapi;

pub use rate_limited::RateLimitedProvider;
pub use searchapi::{SearchApiConfig, SearchApiProvider};
