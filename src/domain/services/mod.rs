// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 提取服务（extraction_service）：从 HTML 中提取候选域名
/// - 候选服务（candidate_service）：合并、去重并截断候选集合
/// - 验证服务（verification_service）：按窗口并发探测候选域名
/// - 进度跟踪（progress_tracker）：验证过程中的共享进度记录
pub mod candidate_service;
pub mod extraction_service;
pub mod progress_tracker;
pub mod verification_service;
