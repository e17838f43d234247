// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 进度状态
///
/// 进度轮询接口返回的只读快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// 预期的探测单元总数
    pub total: usize,
    /// 已完成数量，单个任务内单调不减
    pub processed: usize,
    /// 当前正在处理的单元描述
    pub current: String,
    /// 正在处理的候选集合
    pub links: Vec<String>,
}

impl ProgressState {
    /// 完成信号：`processed >= total && total > 0`
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.processed >= self.total
    }
}
