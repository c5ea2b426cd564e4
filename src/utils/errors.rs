// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 存储层错误类型
///
/// 任何存储错误都会终止当前批次，已写入的记录保持不变（不回滚）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// 单条记录规范化错误
///
/// 只影响当前记录，不会中止整个批次
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid source url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("malformed record: {0}")]
    Malformed(String),
}
