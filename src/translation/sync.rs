//! 运行时同步引擎
//!
//! 替换引擎的"活页面"对应物：按需应用或还原译文，并把译文增量
//! 传播到首次加载之后才出现的节点。每个受管作用域有两个稳态——
//! 基线语言和译文语言（同一形态可扩展到 N 种语言）。
//!
//! 变更监听是一份显式的回调契约：宿主在作用域内有节点插入或文本
//! 变化时同步调用 `notify_inserted` / `notify_text_changed`，引擎只
//! 对受影响的节点做规范化查找并重写，不做全页扫描，也没有隐藏的
//! 轮询。停止观察即停止调用，没有其他取消语义。
//!
//! 重入纪律：引擎自己的写入也可能触发宿主的监听。写回前先比较
//! 重写结果与当前内容，相同则不写；已翻译文本再次规范化要么仍
//! 命中同一键（恒等译文）、要么查不到键而安全停止，不会循环。

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

use crate::parsers::html::dom::{get_text_content, set_text_content};
use crate::parsers::html::walker::walk_text_nodes;
use crate::translation::diff::DiffMappings;
use crate::translation::extract::{leading_whitespace, trailing_whitespace};
use crate::translation::normalize::normalize;
use crate::translation::registry::LanguageRegistry;
use crate::translation::TranslationMap;

/// 页面加载时交给客户端的一次性引导数据
///
/// 引擎以此为全部初始状态，之后不再需要任何网络往返。
/// `translations` 是 `language` 对应的"规范化键 → 译文"映射。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapPayload {
    pub default_language: String,
    /// `translations` 所属的语言
    pub language: String,
    pub labels: BTreeMap<String, String>,
    pub translations: TranslationMap,
}

impl BootstrapPayload {
    /// 从注册表和一份翻译映射构建引导数据
    pub fn new(registry: &LanguageRegistry, language: &str, translations: TranslationMap) -> Self {
        let labels = registry
            .languages()
            .iter()
            .map(|l| (l.code.clone(), l.label.clone()))
            .collect();
        BootstrapPayload {
            default_language: registry.default_language().to_string(),
            language: language.to_string(),
            labels,
            translations,
        }
    }
}

/// 引擎持有的映射状态
enum MappingState {
    /// 缺少挂载点或映射数据，一切操作都是无操作
    Disabled,
    /// 键映射模式：来自替换引擎同款的翻译映射
    KeyBased {
        /// 语言代码 → 翻译映射
        translations: HashMap<String, TranslationMap>,
        /// 已写入的节点及其写入前的文本，用于还原基线语言
        applied: Vec<(Handle, String)>,
    },
    /// 节点引用模式：来自一次树对齐的直接对应关系
    NodeMapped(DiffMappings),
}

/// 活页面上的语言切换引擎
pub struct SyncEngine {
    scope: Option<Handle>,
    default_language: String,
    active: String,
    state: MappingState,
}

impl SyncEngine {
    /// 从引导数据构建键映射模式的引擎
    ///
    /// 作用域缺失或映射为空时引擎自我禁用（保持基线渲染），不报错。
    pub fn from_payload(payload: BootstrapPayload, scope: Option<Handle>) -> Self {
        let default_language = payload.default_language.clone();
        let state = match (&scope, payload.translations.is_empty()) {
            (Some(_), false) => {
                let mut translations = HashMap::new();
                translations.insert(payload.language.clone(), payload.translations);
                MappingState::KeyBased {
                    translations,
                    applied: Vec::new(),
                }
            }
            _ => {
                tracing::debug!("缺少挂载点或翻译数据，同步引擎禁用");
                MappingState::Disabled
            }
        };
        SyncEngine {
            scope,
            active: default_language.clone(),
            default_language,
            state,
        }
    }

    /// 从一次树对齐的结果构建节点引用模式的引擎
    ///
    /// 对应关系直接指向节点，激活时绕过键匹配；但对齐之后才出现的
    /// 内容没有任何对应关系，插入通知在此模式下是无操作。
    pub fn from_mappings(
        mappings: DiffMappings,
        default_language: &str,
        scope: Option<Handle>,
    ) -> Self {
        let state = if mappings.is_empty() {
            tracing::debug!("对齐结果为空，同步引擎禁用");
            MappingState::Disabled
        } else {
            MappingState::NodeMapped(mappings)
        };
        SyncEngine {
            scope,
            active: default_language.to_string(),
            default_language: default_language.to_string(),
            state,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, MappingState::Disabled)
    }

    pub fn active_language(&self) -> &str {
        &self.active
    }

    /// 把受管作用域切换到某个语言
    ///
    /// 键映射模式下先还原所有已写入节点（回到基线），再应用目标
    /// 语言的映射；目标语言没有映射的键保持当前值，不强行置空。
    pub fn activate(&mut self, lang: &str) {
        let scope = match (&self.state, &self.scope) {
            (MappingState::Disabled, _) => return,
            (MappingState::NodeMapped(_), _) => None,
            (MappingState::KeyBased { .. }, Some(scope)) => Some(scope.clone()),
            (MappingState::KeyBased { .. }, None) => return,
        };

        match &mut self.state {
            MappingState::Disabled => {}
            MappingState::NodeMapped(mappings) => {
                let applied = mappings.apply(lang);
                tracing::debug!("节点引用模式切换到 {}，写入 {} 处", lang, applied);
            }
            MappingState::KeyBased {
                translations,
                applied,
            } => {
                // 先还原到基线，避免键匹配落在上一种语言的译文上
                for (node, original) in applied.drain(..) {
                    set_text_content(&node, &original);
                }
                if lang != self.default_language {
                    if let (Some(map), Some(scope)) = (translations.get(lang), scope) {
                        walk_text_nodes(&scope, &mut |node| {
                            apply_to_text_node(node, map, applied);
                        });
                    }
                }
            }
        }
        self.active = lang.to_string();
    }

    /// 宿主通知：作用域内插入了新节点
    ///
    /// 只处理这棵新子树，不重扫页面。节点引用模式没有未见内容的
    /// 对应关系，此通知是无操作。
    pub fn notify_inserted(&mut self, node: &Handle) {
        match &mut self.state {
            MappingState::Disabled | MappingState::NodeMapped(_) => {}
            MappingState::KeyBased {
                translations,
                applied,
            } => {
                if self.active == self.default_language {
                    return;
                }
                if let Some(map) = translations.get(&self.active) {
                    walk_text_nodes(node, &mut |text_node| {
                        apply_to_text_node(text_node, map, applied);
                    });
                }
            }
        }
    }

    /// 宿主通知：某个文本节点的内容变了
    pub fn notify_text_changed(&mut self, node: &Handle) {
        match &mut self.state {
            MappingState::Disabled | MappingState::NodeMapped(_) => {}
            MappingState::KeyBased {
                translations,
                applied,
            } => {
                if self.active == self.default_language {
                    return;
                }
                if let Some(map) = translations.get(&self.active) {
                    apply_to_text_node(node, map, applied);
                }
            }
        }
    }
}

/// 对单个文本节点做规范化查找并写回译文
///
/// 未命中映射时不动；写入前记录该节点当前文本（每个节点只记一次）
/// 供基线还原；重写结果与当前内容相同时跳过写入，过滤自身造成的
/// 变更通知。
fn apply_to_text_node(node: &Handle, map: &TranslationMap, applied: &mut Vec<(Handle, String)>) {
    let raw = match get_text_content(node) {
        Some(raw) => raw,
        None => return,
    };
    let key = normalize(&raw);
    if key.is_empty() {
        return;
    }
    let translation = match map.get(&key) {
        Some(translation) => translation,
        None => return,
    };
    let rewritten = format!(
        "{}{}{}",
        leading_whitespace(&raw),
        translation,
        trailing_whitespace(&raw)
    );
    if rewritten == raw {
        return;
    }
    if !applied.iter().any(|(seen, _)| Rc::ptr_eq(seen, node)) {
        applied.push((node.clone(), raw.clone()));
    }
    set_text_content(node, &rewritten);
}
