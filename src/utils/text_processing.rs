// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 页面标题处理
//!
//! 轻量的正则启发式：取第一个 `<title>` 的内容，解码实体、去除首尾空白，
//! 超过 50 个字符时截断并追加省略号。

use once_cell::sync::Lazy;
use regex::Regex;

/// 标题最大字符数
pub const MAX_TITLE_CHARS: usize = 50;

/// 截断标记
pub const ELLIPSIS: &str = "...";

static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title\s*>").unwrap());

static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 提取页面标题
///
/// 没有 `<title>` 或内容为空时返回 `None`，由调用方换成哨兵值。
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_PATTERN.captures(html)?.get(1)?.as_str();
    let decoded = html_escape::decode_html_entities(raw);
    let collapsed = WHITESPACE_PATTERN.replace_all(decoded.trim(), " ");

    if collapsed.is_empty() {
        return None;
    }

    Some(truncate_chars(&collapsed, MAX_TITLE_CHARS))
}

/// 按字符（而非字节）截断，超长时追加省略号
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}
