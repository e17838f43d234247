// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::{ParseError, Url};

use crate::domain::models::candidate::{has_invalid_prefix, DomainCandidate, ExtractionMode};

/// 域名形状：可选协议与 `www.`，若干由点分隔的标签，以至少两个字母的顶级标签结尾
static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?((?:[a-z0-9][a-z0-9-]*\.)+[a-z]{2,})").unwrap()
});

/// 整个主机名必须是域名形状
static HOST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:www\.)?((?:[a-z0-9][a-z0-9-]*\.)+[a-z]{2,})$").unwrap());

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// 提取服务
///
/// 从任意 HTML 中提取候选域名。纯函数：无网络访问，无共享状态，
/// 同样的输入总是得到同样的输出。输出保持首次出现顺序，
/// 大小写不敏感去重，全部转为小写。
pub struct ExtractionService;

impl ExtractionService {
    /// 提取候选域名
    ///
    /// # 参数
    ///
    /// * `html` - 页面内容
    /// * `mode` - `Anchor` 只看 `<a href>`，`Text` 扫描整个文本
    ///
    /// # 返回值
    ///
    /// 按首次出现顺序排列的不重复候选域名
    pub fn extract(html: &str, mode: ExtractionMode) -> Vec<DomainCandidate> {
        let tokens = match mode {
            ExtractionMode::Anchor => Self::anchor_domains(html),
            ExtractionMode::Text => Self::text_domains(html),
        };

        let mut seen = HashSet::new();
        tokens
            .iter()
            .filter_map(|token| DomainCandidate::parse(token))
            .filter(|candidate| seen.insert(candidate.as_str().to_string()))
            .collect()
    }

    /// 将单个令牌（URL、主机名或裸域名）规范化为候选域名
    ///
    /// 用于种子列表。除 `href` 规则外，还接受以域名开头的裸令牌，如 `seed.org/path`。
    pub fn normalize_token(token: &str) -> Option<DomainCandidate> {
        let token = token.trim();
        Self::domain_from_href(token)
            .or_else(|| {
                if has_invalid_prefix(token) {
                    None
                } else {
                    Self::match_leading(token)
                }
            })
            .and_then(|domain| DomainCandidate::parse(&domain))
    }

    fn anchor_domains(html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(Self::domain_from_href)
            .collect()
    }

    /// 从 `href` 值中取出域名
    ///
    /// 绝对地址只接受 http/https，取其主机名；协议相对地址 `//host` 同样取主机名。
    /// 其余相对值（`index.html`、`list.php?id=1`）指向当前站点的文件，不产生候选。
    fn domain_from_href(href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || has_invalid_prefix(href) {
            return None;
        }

        match Url::parse(href) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    return None;
                }
                url.host_str().and_then(Self::match_host)
            }
            Err(ParseError::RelativeUrlWithoutBase) => href
                .strip_prefix("//")
                .and_then(|rest| Url::parse(&format!("https://{}", rest)).ok())
                .and_then(|url| url.host_str().and_then(Self::match_host)),
            Err(_) => None,
        }
    }

    fn match_host(host: &str) -> Option<String> {
        HOST_PATTERN
            .captures(host)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// 令牌必须以域名开头，后面紧跟 `/`、`?`、`#` 或令牌结束
    fn match_leading(token: &str) -> Option<String> {
        let caps = DOMAIN_PATTERN.captures(token)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 {
            return None;
        }
        match token[whole.end()..].chars().next() {
            None | Some('/') | Some('?') | Some('#') => caps.get(1).map(|m| m.as_str().to_string()),
            _ => None,
        }
    }

    fn text_domains(html: &str) -> Vec<String> {
        DOMAIN_PATTERN
            .captures_iter(html)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let before = html[..whole.start()].chars().next_back();
                let mut after = html[whole.end()..].chars();

                if before.is_some_and(|c| c.is_alphanumeric() || "-_.@".contains(c)) {
                    return None;
                }
                match after.next() {
                    Some(c) if c.is_alphanumeric() || "-_@".contains(c) => return None,
                    // Part of a longer dotted token, e.g. `a.com.x1`
                    Some('.') if after.next().is_some_and(|c| c.is_alphanumeric()) => return None,
                    _ => {}
                }

                caps.get(1).map(|m| m.as_str().to_string())
            })
            .collect()
    }
}
