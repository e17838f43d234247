// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含链接任务用例和请求数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含候选域名、验证结果、进度与任务，以及提取和验证服务
pub mod domain;

/// 引擎模块
///
/// 源页面抓取与域名探测的网络实现
pub mod engines;

/// 基础设施模块
///
/// 提供任务仓库实现与指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 后台清理已结束的任务
pub mod workers;
