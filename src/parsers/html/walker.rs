//! 可翻译文本节点的共享遍历逻辑
//!
//! 提取和替换必须使用完全相同的遍历与跳过规则，否则两边看到的
//! 文本集合会发生偏差（这是正确性问题，不是可调项）。因此两者都
//! 经由这里的 `walk_text_nodes` 访问文本节点。

use markup5ever_rcdom::{Handle, NodeData};

/// 整棵子树不参与翻译的元素标签
pub const SKIP_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// 深度优先访问所有可翻译文本节点
///
/// 命中 [`SKIP_ELEMENTS`] 中的元素时跳过其整棵子树。
/// 空白过滤不在这里做，由回调方按自己的规范化规则判断。
pub fn walk_text_nodes<F>(node: &Handle, f: &mut F)
where
    F: FnMut(&Handle),
{
    match node.data {
        NodeData::Text { .. } => f(node),
        NodeData::Element { ref name, .. } => {
            if SKIP_ELEMENTS.contains(&name.local.as_ref()) {
                return;
            }
            for child in node.children.borrow().iter() {
                walk_text_nodes(child, f);
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                walk_text_nodes(child, f);
            }
        }
    }
}
