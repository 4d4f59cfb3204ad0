//! 翻译模块
//!
//! 提供完整的逐字符串翻译管线，按清晰的模块化架构组织：
//! - **normalize**: 文本规范化，生成稳定查找键
//! - **extract**: 从 DOM 收集可翻译片段
//! - **substitute**: 把译文按映射写回标记
//! - **diff**: 平行语言树对齐，自动推导映射
//! - **sync**: 活页面上的语言切换与增量传播
//! - **registry**: 语言注册表
//! - **storage**: 每页翻译数据的形态与存取接口
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust
//! use langswitch::translation::{extract_from_html, apply_translations, TranslationMap};
//!
//! let html = b"<p>Hello   world</p>";
//! let strings = extract_from_html(html, "utf-8");
//! assert_eq!(strings.keys(), vec!["Hello world"]);
//!
//! let mut map = TranslationMap::new();
//! map.insert("Hello world".to_string(), "Hola mundo".to_string());
//! let translated = apply_translations(html, "utf-8", &map);
//! assert!(String::from_utf8_lossy(&translated).contains("Hola mundo"));
//! ```

use std::collections::HashMap;

pub mod diff;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod registry;
pub mod storage;
pub mod substitute;
pub mod sync;

/// 某一页面、某一语言下的"规范化键 → 译文"映射
///
/// 由外部存储提供并持有；渲染期间对核心只读，树对齐模式下
/// 由核心产出交还存储。
pub type TranslationMap = HashMap<String, String>;

// 核心API导出
pub use diff::{diff, AttributeMapping, DiffMappings, TextMapping};
pub use error::{TranslationError, TranslationResult};
pub use extract::{extract, extract_from_html, PageStringSet, StringRecord};
pub use normalize::normalize;
pub use registry::{Language, LanguageRegistry};
pub use storage::{JsonFileStore, MemoryStore, PageTranslationData, TranslationStore};
pub use substitute::{apply_translations, substitute};
pub use sync::{BootstrapPayload, SyncEngine};
