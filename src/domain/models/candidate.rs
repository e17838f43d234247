// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 非域名前缀，命中的令牌直接丢弃
pub const INVALID_PREFIXES: [&str; 6] = ["javascript:", "mailto:", "tel:", "#", "data:", "about:"];

/// 提取模式
///
/// 决定提取器扫描页面的哪一部分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// 只匹配 `<a href="...">` 中的值，噪声更少
    #[default]
    Anchor,
    /// 扫描整个页面文本中的域名形状子串
    Text,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtractionMode::Anchor => write!(f, "anchor"),
            ExtractionMode::Text => write!(f, "text"),
        }
    }
}

/// 候选域名
///
/// 规范化（小写）的域名形状令牌，例如 `example.com`。
/// 只能通过 [`DomainCandidate::parse`] 构造，构造后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DomainCandidate(String);

impl DomainCandidate {
    /// 解析并校验候选域名
    ///
    /// 输入会被去除首尾空白并转为小写，随后检查：
    /// 长度大于 3、至少包含一个 `.`、不以非域名前缀开头。
    ///
    /// # 返回值
    ///
    /// 校验通过返回 `Some`，否则返回 `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.len() <= 3 || !normalized.contains('.') {
            return None;
        }
        if has_invalid_prefix(&normalized) {
            return None;
        }

        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainCandidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 判断令牌是否以非域名前缀开头（大小写不敏感）
pub fn has_invalid_prefix(token: &str) -> bool {
    let lowered = token.trim_start().to_ascii_lowercase();
    INVALID_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// 候选集合
///
/// 有序且不重复的候选域名序列，顺序为首次发现顺序。
/// 每个任务构建一次，验证结束后丢弃。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateSet {
    candidates: Vec<DomainCandidate>,
}

impl CandidateSet {
    /// 由已去重的候选列表构建集合
    pub(crate) fn from_unique(candidates: Vec<DomainCandidate>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn as_slice(&self) -> &[DomainCandidate] {
        &self.candidates
    }

    /// 以字符串形式返回全部候选，供进度观察者使用
    pub fn to_strings(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a DomainCandidate;
    type IntoIter = std::slice::Iter<'a, DomainCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
