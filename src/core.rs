//! 核心选项和文档级处理入口
//!
//! 宿主（CMS 过滤器、CLI、预览服务）从这里进出：字节进、字节出，
//! 所有入口都遵守失败软化约定——解析不了就原样把输入还给调用方，
//! 绝不让一次渲染因为翻译失败而中断。

use crate::parsers::html::dom::html_to_dom;
use crate::translation::diff::diff;
use crate::translation::extract::{extract_from_html, PageStringSet};
use crate::translation::substitute::apply_translations;
use crate::translation::TranslationMap;

/// 文档级处理选项
#[derive(Default, Clone, Debug)]
pub struct TranslateOptions {
    /// 文档声明的字符集；缺省按 UTF-8 处理
    pub encoding: Option<String>,
}

impl TranslateOptions {
    pub fn charset(&self) -> &str {
        self.encoding.as_deref().unwrap_or("utf-8")
    }
}

/// 从一份 HTML 文档中提取可翻译字符串集合
///
/// 解析失败时返回空集合。
pub fn extract_document(data: &[u8], options: &TranslateOptions) -> PageStringSet {
    extract_from_html(data, options.charset())
}

/// 对一份 HTML 文档应用翻译映射，返回改写后的标记
///
/// 映射为空或解析失败时原样返回输入。
pub fn translate_document(
    data: &[u8],
    options: &TranslateOptions,
    map: &TranslationMap,
) -> Vec<u8> {
    apply_translations(data, options.charset(), map)
}

/// 对齐基线渲染与译文渲染，推导出翻译映射
///
/// 任一侧解析失败时返回空映射。结构分歧按对齐器的约定静默产生
/// 覆盖缺口。
pub fn diff_documents(
    baseline: &[u8],
    translated: &[u8],
    options: &TranslateOptions,
    base_lang: &str,
    lang: &str,
) -> TranslationMap {
    let baseline_dom = match html_to_dom(baseline, options.charset()) {
        Ok(dom) => dom,
        Err(err) => {
            tracing::warn!("基线文档解析失败，返回空映射: {}", err);
            return TranslationMap::new();
        }
    };
    let translated_dom = match html_to_dom(translated, options.charset()) {
        Ok(dom) => dom,
        Err(err) => {
            tracing::warn!("译文文档解析失败，返回空映射: {}", err);
            return TranslationMap::new();
        }
    };

    let mappings = diff(&baseline_dom.document, &translated_dom.document, base_lang, lang);
    tracing::debug!(
        "树对齐得到 {} 条文本对应、{} 条属性对应",
        mappings.text.len(),
        mappings.attributes.len()
    );
    mappings.derive_map(base_lang, lang)
}
