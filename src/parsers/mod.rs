//! # 解析器模块
//!
//! 这个模块包含解析和处理 HTML 文档所需的功能：
//!
//! - HTML解析和DOM操作
//! - 文档字符集解码与序列化
//! - 共享的可翻译文本遍历逻辑
//!
//! # 模块组织
//!
//! - `html` - HTML文档解析、DOM操作、序列化、文本遍历

pub mod html;

// Re-export commonly used items for convenience
pub use html::{
    get_node_attr, get_text_content, html_to_dom, serialize_document, set_node_attr,
    set_text_content, walk_text_nodes,
};
