// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parking_lot::RwLock;

use crate::domain::models::progress::ProgressState;

/// 进度跟踪器
///
/// 单写多读的共享进度记录。验证器写入，轮询接口读取。
/// 所有修改都在写锁内完成，快照永远不会看到半更新的状态。
#[derive(Debug, Default)]
pub struct ProgressTracker {
    state: RwLock<ProgressState>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始新一轮处理，`processed` 归零
    pub fn reset(&self, total: usize) {
        let mut state = self.state.write();
        *state = ProgressState {
            total,
            ..ProgressState::default()
        };
    }

    /// 以候选集合开始新一轮处理
    ///
    /// `total` 与 `links` 在同一把写锁内写入，读者不会看到只更新了一半的状态。
    pub fn start(&self, links: Vec<String>) {
        let mut state = self.state.write();
        *state = ProgressState {
            total: links.len(),
            links,
            ..ProgressState::default()
        };
    }

    /// 推进进度
    ///
    /// `processed` 只增不减，并且不会超过 `total`。
    pub fn advance(&self, processed: usize, current: impl Into<String>) {
        let mut state = self.state.write();
        state.processed = processed.max(state.processed).min(state.total);
        state.current = current.into();
    }

    /// 只更新当前描述，不改变计数
    pub fn set_current(&self, current: impl Into<String>) {
        self.state.write().current = current.into();
    }

    /// 返回自洽的只读副本
    pub fn snapshot(&self) -> ProgressState {
        self.state.read().clone()
    }
}
