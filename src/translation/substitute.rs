//! 替换引擎
//!
//! 与提取器共用同一套遍历和跳过规则（见 `parsers::html::walker`），
//! 对每个命中翻译映射的文本节点，用该节点自身的首尾空白包裹译文后写回；
//! 未命中的节点保持原样，匹配文本节点之外的标记一概不动。
//!
//! 同一映射重复替换是无操作：替换后的文本要么仍规范化到原键
//! （译文与键相同），要么匹配不到任何键，安全停止。

use markup5ever_rcdom::Handle;

use crate::parsers::html::dom::{get_text_content, html_to_dom, set_text_content};
use crate::parsers::html::serializer::serialize_document;
use crate::parsers::html::walker::walk_text_nodes;
use crate::translation::extract::{leading_whitespace, trailing_whitespace};
use crate::translation::normalize::normalize;
use crate::translation::TranslationMap;

/// 在 DOM 中就地替换命中映射的文本节点，返回改写的节点数
///
/// 边界空白取自各节点自身，而不是提取记录——可见内容相同的
/// 两个节点，其首尾空白完全可以不同。
pub fn substitute(root: &Handle, map: &TranslationMap) -> usize {
    if map.is_empty() {
        return 0;
    }

    let mut replaced = 0;
    walk_text_nodes(root, &mut |node| {
        let raw = match get_text_content(node) {
            Some(raw) => raw,
            None => return,
        };
        let key = normalize(&raw);
        if key.is_empty() {
            return;
        }
        if let Some(translation) = map.get(&key) {
            let rewritten = format!(
                "{}{}{}",
                leading_whitespace(&raw),
                translation,
                trailing_whitespace(&raw)
            );
            set_text_content(node, &rewritten);
            replaced += 1;
        }
    });
    replaced
}

/// 对 HTML 字节应用翻译映射
///
/// 映射为空或输入无法解析时原样返回输入，从不中断渲染。
pub fn apply_translations(data: &[u8], document_encoding: &str, map: &TranslationMap) -> Vec<u8> {
    if map.is_empty() {
        return data.to_vec();
    }

    match html_to_dom(data, document_encoding) {
        Ok(dom) => {
            let replaced = substitute(&dom.document, map);
            tracing::debug!("已替换 {} 个文本节点", replaced);
            serialize_document(dom, document_encoding)
        }
        Err(err) => {
            tracing::warn!("HTML 解析失败，原样返回输入: {}", err);
            data.to_vec()
        }
    }
}
