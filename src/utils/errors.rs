// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 任务错误类型
///
/// 只有源页面抓取失败会让任务整体失败；单个域名的探测失败记录在结果中。
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Failed to fetch source page: {0}")]
    SourceFetch(String),
}
