//! 运行时同步引擎集成测试
//!
//! 覆盖激活/还原、插入与文本变更的增量传播、自我禁用和重入安全

mod common;

use common::{append_child, body_of, detached_paragraph, dom, find_text_node, text_of};

use langswitch::parsers::html::dom::set_text_content;
use langswitch::translation::diff::diff;
use langswitch::translation::registry::LanguageRegistry;
use langswitch::translation::sync::{BootstrapPayload, SyncEngine};
use langswitch::translation::TranslationMap;

fn payload(pairs: &[(&str, &str)]) -> BootstrapPayload {
    let translations: TranslationMap = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BootstrapPayload::new(&LanguageRegistry::default(), "es", translations)
}

#[test]
fn activate_translates_and_base_restores() {
    let page = dom("<p>Hello</p><p>  Bye\n</p>");
    let body = body_of(&page);
    let mut engine = SyncEngine::from_payload(
        payload(&[("Hello", "Hola"), ("Bye", "Adi\u{f3}s")]),
        Some(body.clone()),
    );
    assert!(engine.is_enabled());
    assert_eq!(engine.active_language(), "en");

    engine.activate("es");
    assert_eq!(engine.active_language(), "es");
    let text = text_of(&body);
    assert!(text.contains("Hola"));
    // 边界空白照常保留
    assert!(text.contains("  Adi\u{f3}s\n"));

    engine.activate("en");
    let text = text_of(&body);
    assert!(text.contains("Hello"));
    assert!(text.contains("  Bye\n"));
}

#[test]
fn unmapped_keys_keep_their_current_value() {
    let page = dom("<p>Hello</p><p>No translation here</p>");
    let body = body_of(&page);
    let mut engine = SyncEngine::from_payload(payload(&[("Hello", "Hola")]), Some(body.clone()));

    engine.activate("es");
    let text = text_of(&body);
    assert!(text.contains("Hola"));
    assert!(text.contains("No translation here"), "no forced blank for unmapped keys");
}

/// 场景 D：激活后插入的新节点经通知被翻译，无需整页重扫
#[test]
fn scenario_d_inserted_node_is_translated_incrementally() {
    let page = dom("<p>Hello</p>");
    let body = body_of(&page);
    let mut engine = SyncEngine::from_payload(payload(&[("Hello", "Hola")]), Some(body.clone()));
    engine.activate("es");

    let inserted = detached_paragraph("Hello");
    append_child(&body, &inserted);
    engine.notify_inserted(&inserted);

    assert_eq!(text_of(&inserted), "Hola");
    // 切回基线时，后插入的节点同样被还原
    engine.activate("en");
    assert_eq!(text_of(&inserted), "Hello");
}

#[test]
fn inserted_node_is_ignored_while_base_language_is_active() {
    let page = dom("<p>Hello</p>");
    let body = body_of(&page);
    let mut engine = SyncEngine::from_payload(payload(&[("Hello", "Hola")]), Some(body.clone()));

    let inserted = detached_paragraph("Hello");
    append_child(&body, &inserted);
    engine.notify_inserted(&inserted);
    assert_eq!(text_of(&inserted), "Hello");
}

#[test]
fn text_change_notification_retranslates_the_node() {
    let page = dom("<p>Hello</p>");
    let body = body_of(&page);
    let mut engine = SyncEngine::from_payload(
        payload(&[("Hello", "Hola"), ("Goodbye", "Adi\u{f3}s")]),
        Some(body.clone()),
    );
    engine.activate("es");

    let node = find_text_node(&body, "Hola").expect("translated node");
    set_text_content(&node, "Goodbye");
    engine.notify_text_changed(&node);
    assert_eq!(text_of(&body), "Adi\u{f3}s");

    // 引擎自己的写入再被通知一次：键查不到或内容相同，安全停止
    engine.notify_text_changed(&node);
    assert_eq!(text_of(&body), "Adi\u{f3}s");
}

#[test]
fn identity_translation_does_not_loop() {
    let page = dom("<p>Same text</p>");
    let body = body_of(&page);
    let mut engine =
        SyncEngine::from_payload(payload(&[("Same text", "Same text")]), Some(body.clone()));
    engine.activate("es");

    let node = find_text_node(&body, "Same text").expect("text node");
    // 重写结果与当前内容相同，写入被过滤，重复通知收敛
    engine.notify_text_changed(&node);
    engine.notify_text_changed(&node);
    assert_eq!(text_of(&body), "Same text");
}

#[test]
fn empty_payload_disables_the_engine() {
    let page = dom("<p>Hello</p>");
    let body = body_of(&page);
    let mut engine = SyncEngine::from_payload(payload(&[]), Some(body.clone()));
    assert!(!engine.is_enabled());

    engine.activate("es");
    assert_eq!(text_of(&body), "Hello", "disabled engine must leave the page intact");
}

#[test]
fn missing_scope_disables_the_engine() {
    let mut engine = SyncEngine::from_payload(payload(&[("Hello", "Hola")]), None);
    assert!(!engine.is_enabled());
    engine.activate("es");
}

#[test]
fn node_mapped_engine_switches_languages_but_ignores_insertions() {
    let baseline = dom("<p>Hello</p>");
    let translated = dom("<p>Hola</p>");
    let body = body_of(&baseline);
    let mappings = diff(&baseline.document, &translated.document, "en", "es");

    let mut engine = SyncEngine::from_mappings(mappings, "en", Some(body.clone()));
    assert!(engine.is_enabled());

    engine.activate("es");
    assert_eq!(text_of(&body), "Hola");
    engine.activate("en");
    assert_eq!(text_of(&body), "Hello");

    // 对齐时没见过的内容没有对应关系，插入通知是无操作
    engine.activate("es");
    let inserted = detached_paragraph("Hello");
    append_child(&body, &inserted);
    engine.notify_inserted(&inserted);
    assert_eq!(text_of(&inserted), "Hello");
}

#[test]
fn payload_serializes_with_camel_case_fields() {
    let payload = payload(&[("Hello", "Hola")]);
    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains("\"defaultLanguage\":\"en\""));
    assert!(json.contains("\"labels\""));
    assert!(json.contains("\"translations\""));

    let parsed: BootstrapPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.default_language, "en");
    assert_eq!(parsed.labels.get("es").map(String::as_str), Some("Espa\u{f1}ol"));
    assert_eq!(parsed.translations.get("Hello").map(String::as_str), Some("Hola"));
}
