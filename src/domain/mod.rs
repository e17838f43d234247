// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：候选域名、验证结果、进度与任务
/// - 仓库接口（repositories）：任务登记的抽象接口
/// - 服务（services）：提取、候选集合构建、验证与进度跟踪
///
/// 领域层只通过引擎特质访问网络。
pub mod models;
pub mod repositories;
pub mod services;
