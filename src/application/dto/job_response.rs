// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::job::JobStatus;

/// 任务已接受响应
///
/// 同步等待时间内未结束的任务返回该响应，客户端随后轮询进度
#[derive(Debug, Deserialize, Serialize)]
pub struct JobAcceptedDto {
    /// 请求处理是否成功
    pub success: bool,
    /// 任务ID
    pub id: Uuid,
    /// 当前任务状态
    pub status: JobStatus,
}
