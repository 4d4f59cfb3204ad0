//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作
//! - `serializer`: 序列化功能
//! - `walker`: 可翻译文本节点的共享遍历逻辑

pub mod dom;
pub mod serializer;
pub mod walker;

// 重新导出主要的公共 API
pub use dom::{
    get_child_node_by_name, get_node_attr, get_text_content, html_to_dom, set_node_attr,
    set_text_content,
};
pub use serializer::serialize_document;
pub use walker::{walk_text_nodes, SKIP_ELEMENTS};
