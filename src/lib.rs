//! # Langswitch Library
//!
//! 针对已渲染 HTML 页面的逐字符串翻译工具库：
//! 提取可翻译文本片段、按规范化内容（而非位置）建立翻译键、
//! 在生成标记时或在已渲染页面内将译文写回。
//!
//! ## 模块组织
//!
//! - `core` - 核心选项和文档级处理入口
//! - `parsers` - HTML 解析、序列化与 DOM 工具
//! - `translation` - 规范化 / 提取 / 替换 / 树对齐 / 运行时同步

pub mod core;
pub mod parsers;
pub mod translation;

// Re-export commonly used items for convenience
pub use crate::core::*;
pub use crate::parsers::*;
