// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 职位仓库（job_listing_repository）：去重写入职位
/// - 搜索元数据仓库（search_metadata_repository）：只追加的搜索审计记录
pub mod job_listing_repository;
pub mod search_metadata_repository;
