// 集成测试公共模块
//
// 提供 DOM 构建和节点查找的测试辅助工具

#![allow(dead_code)]

use std::rc::Rc;

use markup5ever_rcdom::{Handle, NodeData, RcDom};

use langswitch::parsers::html::dom::{get_child_node_by_name, html_to_dom};
use langswitch::parsers::html::serializer::serialize_document;

/// 解析一段 HTML 为 DOM
pub fn dom(html: &str) -> RcDom {
    html_to_dom(html.as_bytes(), "utf-8").expect("test HTML should parse")
}

/// 取文档的 body 节点
pub fn body_of(dom: &RcDom) -> Handle {
    let html = get_child_node_by_name(&dom.document, "html").expect("document should have <html>");
    get_child_node_by_name(&html, "body").expect("document should have <body>")
}

/// 序列化为字符串便于断言
pub fn to_html(dom: RcDom) -> String {
    String::from_utf8_lossy(&serialize_document(dom, "utf-8")).to_string()
}

/// 深度优先找到第一个内容包含 `needle` 的文本节点
pub fn find_text_node(node: &Handle, needle: &str) -> Option<Handle> {
    if let NodeData::Text { ref contents } = node.data {
        if contents.borrow().contains(needle) {
            return Some(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(found) = find_text_node(child, needle) {
            return Some(found);
        }
    }
    None
}

/// 读取某个节点下全部文本（含跳过元素，测试直接断言用）
pub fn text_of(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// 造一个游离的 `<p>text</p>` 节点，模拟首次加载后注入的内容
pub fn detached_paragraph(text: &str) -> Handle {
    let parsed = dom(&format!("<p>{text}</p>"));
    let body = body_of(&parsed);
    let paragraph = body.children.borrow()[0].clone();
    body.children.borrow_mut().clear();
    paragraph.parent.set(None);
    paragraph
}

/// 把游离节点挂到父节点末尾
pub fn append_child(parent: &Handle, child: &Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
}

/// 一个带各种结构的样例页面
pub fn sample_page() -> &'static str {
    concat!(
        "<!DOCTYPE html><html><head><title>Test Page</title>",
        "<style>.hero { color: red; }</style>",
        "<script>var greeting = \"Hello world\";</script>",
        "</head><body>",
        "<h1>Welcome to Test</h1>",
        "<p>Hello   world</p>",
        "<p>\n  This is a test paragraph.\t</p>",
        "<div>Hello world</div>",
        "<noscript>Please enable JavaScript</noscript>",
        "<template><p>Template text</p></template>",
        "</body></html>",
    )
}
