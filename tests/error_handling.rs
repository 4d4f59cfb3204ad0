//! 失败软化行为集成测试
//!
//! 不规则或畸形的标记不允许让渲染中断：提取退化为空集合，
//! 替换退化为原样透传，整个过程不产生任何 panic

mod common;

use langswitch::core::{extract_document, translate_document, TranslateOptions};
use langswitch::translation::{extract_from_html, TranslationMap};

fn map_of(pairs: &[(&str, &str)]) -> TranslationMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn empty_input_yields_empty_set() {
    let strings = extract_from_html(b"", "utf-8");
    assert!(strings.is_empty());
}

#[test]
fn malformed_markup_does_not_panic() {
    // 未闭合、错配、残缺的标签照常走完提取和替换
    let html = b"<p><div>Hello</span><p>Bye<td>";
    let strings = extract_from_html(html, "utf-8");
    assert!(strings.contains_key("Hello"));
    assert!(strings.contains_key("Bye"));

    let map = map_of(&[("Hello", "Hola")]);
    let output = translate_document(html, &TranslateOptions::default(), &map);
    assert!(String::from_utf8_lossy(&output).contains("Hola"));
}

#[test]
fn binary_garbage_is_handled_gracefully() {
    let garbage: &[u8] = &[0xff, 0xfe, 0x00, 0x92, 0x01, 0xc3];
    // 无论解析结果如何，不 panic、不报错
    let _ = extract_from_html(garbage, "utf-8");

    let map = map_of(&[("Hello", "Hola")]);
    let _ = translate_document(garbage, &TranslateOptions::default(), &map);

    // 空映射路径必须逐字节透传，即使输入是二进制垃圾
    let output = translate_document(garbage, &TranslateOptions::default(), &TranslationMap::new());
    assert_eq!(output, garbage);
}

#[test]
fn unknown_charset_label_falls_back_to_utf8() {
    let options = TranslateOptions {
        encoding: Some("no-such-charset".to_string()),
    };
    let strings = extract_document(b"<p>Hello</p>", &options);
    assert!(strings.contains_key("Hello"));
}

#[test]
fn declared_charset_is_honored() {
    // "café" 的 Latin-1 编码
    let latin1: &[u8] = b"<p>caf\xe9</p>";
    let options = TranslateOptions {
        encoding: Some("iso-8859-1".to_string()),
    };
    let strings = extract_document(latin1, &options);
    assert!(strings.contains_key("caf\u{e9}"));
}
