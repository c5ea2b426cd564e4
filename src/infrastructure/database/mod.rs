// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::StorageError;
use sea_orm::DbErr;

/// 数据库模块
///
/// 提供数据库连接和实体管理功能
/// 包括数据库连接池和实体定义
pub mod connection;
pub mod entities;

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(e) => StorageError::Unavailable(e.to_string()),
            DbErr::ConnectionAcquire(e) => StorageError::Unavailable(e.to_string()),
            other => StorageError::Database(other.to_string()),
        }
    }
}
