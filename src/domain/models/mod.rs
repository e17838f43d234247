// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义候选域名、验证结果、进度、任务与报告等核心实体
pub mod candidate;
pub mod job;
pub mod progress;
pub mod report;
pub mod verification;
