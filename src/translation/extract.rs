//! 文本提取器
//!
//! 深度优先收集页面中所有可翻译文本片段，按规范化键去重
//! （同一页面内首次出现者生效，后续重复不再记录、也不单独可译），
//! 并保留每个片段的原始文本与首尾空白串，供替换阶段按节点还原。

use std::collections::HashSet;
use std::sync::OnceLock;

use markup5ever_rcdom::Handle;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::parsers::html::dom::{get_text_content, html_to_dom};
use crate::parsers::html::walker::walk_text_nodes;
use crate::translation::normalize::normalize;

/// 一个已提取的文本片段：查找键、原始文本及其边界空白
///
/// `id` 是规范化键的 SHA-256 十六进制摘要，作为内容寻址的存储键使用。
/// 记录一经产生即不可变。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StringRecord {
    pub id: String,
    pub key: String,
    pub original_text: String,
    pub leading_whitespace: String,
    pub trailing_whitespace: String,
}

/// 一次提取得到的有序去重片段集合
///
/// 顺序即文档顺序，只影响编辑界面的展示，不承载其他语义。
/// 每次提取都会重新生成，不作为独立实体持久化。
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PageStringSet {
    records: Vec<StringRecord>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl PageStringSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StringRecord> {
        self.records.iter()
    }

    /// 按文档顺序返回所有规范化键
    pub fn keys(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.key.as_str()).collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.iter().any(|r| r.key == key)
    }

    /// 记录一段原始文本；空白内容或重复键静默忽略
    fn record(&mut self, raw: &str) {
        let key = normalize(raw);
        if key.is_empty() {
            return;
        }
        if !self.seen.insert(key.clone()) {
            return;
        }
        self.records.push(StringRecord {
            id: string_id(&key),
            original_text: raw.to_string(),
            leading_whitespace: leading_whitespace(raw).to_string(),
            trailing_whitespace: trailing_whitespace(raw).to_string(),
            key,
        });
    }
}

impl<'a> IntoIterator for &'a PageStringSet {
    type Item = &'a StringRecord;
    type IntoIter = std::slice::Iter<'a, StringRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// 规范化键的内容寻址 id（SHA-256 十六进制）
pub fn string_id(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

/// 提取文本片段开头的空白串
pub fn leading_whitespace(value: &str) -> &str {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\s+").expect("invalid leading whitespace pattern"));
    re.find(value).map(|m| m.as_str()).unwrap_or("")
}

/// 提取文本片段末尾的空白串
pub fn trailing_whitespace(value: &str) -> &str {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+$").expect("invalid trailing whitespace pattern"));
    re.find(value).map(|m| m.as_str()).unwrap_or("")
}

/// 从 DOM 中提取所有可翻译文本片段
pub fn extract(root: &Handle) -> PageStringSet {
    let mut set = PageStringSet::default();
    walk_text_nodes(root, &mut |node| {
        if let Some(raw) = get_text_content(node) {
            set.record(&raw);
        }
    });
    set
}

/// 从 HTML 字节中提取文本片段
///
/// 输入无法解析时返回空集合，从不报错（失败软化约定）。
pub fn extract_from_html(data: &[u8], document_encoding: &str) -> PageStringSet {
    match html_to_dom(data, document_encoding) {
        Ok(dom) => extract(&dom.document),
        Err(err) => {
            tracing::warn!("HTML 解析失败，返回空提取集: {}", err);
            PageStringSet::default()
        }
    }
}
