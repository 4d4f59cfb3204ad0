//! 文本规范化
//!
//! 把一段可见文本折叠成稳定的查找键：不换行空格折叠为普通空格、
//! 任意空白串（含换行和制表符）折叠为单个空格、去掉首尾空白。
//! 两段可见内容相同（仅空白不同）的文本折叠到同一个键上。
//!
//! HTML 实体在解析阶段已按文档字符集解码（html5ever + encoding_rs），
//! 这里假定输入是解码后的文本。

/// 规范化一个文本片段，返回其查找键
///
/// 纯函数且幂等：`normalize(normalize(x)) == normalize(x)`。
/// 返回空串表示该片段不可翻译。
pub fn normalize(value: &str) -> String {
    value
        .replace('\u{00a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
