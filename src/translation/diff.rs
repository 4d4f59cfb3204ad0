//! 并行树对齐映射器
//!
//! 假定两棵树是同一逻辑内容在两种语言下的近似同构渲染
//! （例如由同一模板分别生成），用两个游标锁步遍历子节点列表，
//! 自动推导文本和属性的对应关系，免去手工逐键录入。
//!
//! 对齐是尽力而为的启发式：注释节点和仅含空白的文本节点在各自
//! 一侧独立跳过；标签或节点类型不一致时双游标同时前进、不记录
//! 任何内容。语言间元素被重排或插入的文档会静默欠映射、没有任何
//! 诊断——这是继承自来源行为的已知覆盖缺口，除非显式引入更强的
//! 对齐算法（如树编辑距离），否则不应悄悄"修正"。

use std::collections::HashMap;

use markup5ever_rcdom::{Handle, NodeData};

use crate::parsers::html::dom::{get_node_attr, get_text_content, set_node_attr, set_text_content};
use crate::translation::normalize::normalize;
use crate::translation::TranslationMap;

/// 脚本与样式子树视为不透明内容，不参与对齐
const OPAQUE_ELEMENTS: &[&str] = &["script", "style"];

/// 一条文本对应：基线树中的节点及其各语言文本
#[derive(Clone)]
pub struct TextMapping {
    pub node: Handle,
    pub values: HashMap<String, String>,
}

/// 一条属性对应：基线树中的元素、属性名及其各语言取值
///
/// 取值为 `None` 表示该语言下此属性不存在（激活时应移除）。
#[derive(Clone)]
pub struct AttributeMapping {
    pub element: Handle,
    pub attribute: String,
    pub values: HashMap<String, Option<String>>,
}

/// 一次对齐得到的全部对应关系，生命周期仅限本次对齐
#[derive(Default, Clone)]
pub struct DiffMappings {
    pub text: Vec<TextMapping>,
    pub attributes: Vec<AttributeMapping>,
}

impl DiffMappings {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.attributes.is_empty()
    }

    /// 把文本对应重新按规范化基线文本编码成翻译映射，供存储使用
    ///
    /// 重复键沿用首次出现者生效的约定。
    pub fn derive_map(&self, base_lang: &str, lang: &str) -> TranslationMap {
        let mut map = TranslationMap::new();
        for mapping in &self.text {
            let (base, translated) = match (mapping.values.get(base_lang), mapping.values.get(lang))
            {
                (Some(base), Some(translated)) => (base, translated),
                _ => continue,
            };
            let key = normalize(base);
            if key.is_empty() {
                continue;
            }
            map.entry(key).or_insert_with(|| translated.trim().to_string());
        }
        map
    }

    /// 将某一语言的取值写到基线树的对应节点上
    ///
    /// 该语言没有记录值的节点保持当前内容不变。
    pub fn apply(&self, lang: &str) -> usize {
        let mut applied = 0;
        for mapping in &self.text {
            if let Some(value) = mapping.values.get(lang) {
                set_text_content(&mapping.node, value);
                applied += 1;
            }
        }
        for mapping in &self.attributes {
            if let Some(value) = mapping.values.get(lang) {
                set_node_attr(&mapping.element, &mapping.attribute, value.clone());
                applied += 1;
            }
        }
        applied
    }
}

/// 对齐两棵平行语言树，推导文本与属性对应
///
/// `baseline` 与 `translated` 通常是两份解析结果的文档节点。
/// 结构分歧不报错，只产生部分覆盖。
pub fn diff(
    baseline: &Handle,
    translated: &Handle,
    base_lang: &str,
    lang: &str,
) -> DiffMappings {
    let mut mappings = DiffMappings::default();
    align_children(baseline, translated, base_lang, lang, &mut mappings);
    mappings
}

/// 判断该节点在对齐时是否应被单侧跳过
fn is_alignment_noise(node: &Handle) -> bool {
    match node.data {
        NodeData::Comment { .. } => true,
        NodeData::Text { ref contents } => normalize(&contents.borrow()).is_empty(),
        _ => false,
    }
}

fn align_children(
    baseline: &Handle,
    translated: &Handle,
    base_lang: &str,
    lang: &str,
    mappings: &mut DiffMappings,
) {
    let base_children = baseline.children.borrow();
    let translated_children = translated.children.borrow();
    let mut i = 0;
    let mut j = 0;

    loop {
        // 每侧独立跳过注释和纯空白文本，容忍排版噪音
        while i < base_children.len() && is_alignment_noise(&base_children[i]) {
            i += 1;
        }
        while j < translated_children.len() && is_alignment_noise(&translated_children[j]) {
            j += 1;
        }
        if i >= base_children.len() || j >= translated_children.len() {
            break;
        }

        let base_node = &base_children[i];
        let translated_node = &translated_children[j];

        match (&base_node.data, &translated_node.data) {
            (NodeData::Text { .. }, NodeData::Text { .. }) => {
                let base_text = get_text_content(base_node).unwrap_or_default();
                let translated_text = get_text_content(translated_node).unwrap_or_default();
                let mut values = HashMap::new();
                values.insert(base_lang.to_string(), base_text);
                values.insert(lang.to_string(), translated_text);
                mappings.text.push(TextMapping {
                    node: base_node.clone(),
                    values,
                });
            }
            (
                NodeData::Element {
                    name: base_name, ..
                },
                NodeData::Element {
                    name: translated_name,
                    ..
                },
            ) if base_name.local == translated_name.local => {
                if OPAQUE_ELEMENTS.contains(&base_name.local.as_ref()) {
                    // 不透明子树按原样保留，不进入
                } else {
                    record_attribute_differences(
                        base_node,
                        translated_node,
                        base_lang,
                        lang,
                        mappings,
                    );
                    align_children(base_node, translated_node, base_lang, lang, mappings);
                }
            }
            _ => {
                // 标签或类型不一致：双游标同步前进，留下覆盖缺口
                tracing::debug!("树对齐遇到结构分歧，跳过一对节点");
            }
        }

        i += 1;
        j += 1;
    }
}

/// 记录译文元素上与基线取值不同的属性（事件处理器属性除外）
fn record_attribute_differences(
    base_node: &Handle,
    translated_node: &Handle,
    base_lang: &str,
    lang: &str,
    mappings: &mut DiffMappings,
) {
    let translated_attrs = match &translated_node.data {
        NodeData::Element { attrs, .. } => attrs.borrow(),
        _ => return,
    };

    for attr in translated_attrs.iter() {
        let attr_name = attr.name.local.as_ref();
        if attr_name.starts_with("on") {
            continue;
        }
        let translated_value = attr.value.to_string();
        let base_value = get_node_attr(base_node, attr_name);
        if base_value.as_deref() == Some(translated_value.as_str()) {
            continue;
        }
        let mut values = HashMap::new();
        values.insert(base_lang.to_string(), base_value);
        values.insert(lang.to_string(), Some(translated_value));
        mappings.attributes.push(AttributeMapping {
            element: base_node.clone(),
            attribute: attr_name.to_string(),
            values,
        });
    }
}
