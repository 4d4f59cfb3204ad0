//! 语言注册表
//!
//! 维护一个有序语言列表（代码 + 展示名）和一个默认/基线语言。
//! 语言列表来自宿主的一份 `code | Label` 行文本，每行一种语言；
//! 也接受空白分隔的 `code Label` 写法，缺省展示名用大写代码顶替。

use serde::{Deserialize, Serialize};

/// 一种语言：代码和展示名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub label: String,
}

/// 有序语言注册表，含一个指定的默认语言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRegistry {
    default: String,
    languages: Vec<Language>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        LanguageRegistry {
            default: "en".to_string(),
            languages: vec![
                Language {
                    code: "en".to_string(),
                    label: "English".to_string(),
                },
                Language {
                    code: "es".to_string(),
                    label: "Español".to_string(),
                },
            ],
        }
    }
}

impl LanguageRegistry {
    /// 从行文本构建注册表
    ///
    /// 声明的默认语言不在列表中时退回第一种语言；
    /// 一行都解析不出来时退回内置的 en/es 注册表。
    pub fn from_lines(default: &str, lines: &str) -> Self {
        let mut languages: Vec<Language> = Vec::new();

        for line in lines.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (code, label) = if let Some((code, label)) = line.split_once('|') {
                (code.trim(), label.trim().to_string())
            } else {
                let mut parts = line.splitn(2, char::is_whitespace);
                let code = parts.next().unwrap_or_default().trim();
                let label = parts.next().unwrap_or_default().trim().to_string();
                (code, label)
            };
            let code = sanitize_code(code);
            if code.is_empty() || languages.iter().any(|l| l.code == code) {
                continue;
            }
            let label = if label.is_empty() {
                label_from_code(&code)
            } else {
                label
            };
            languages.push(Language { code, label });
        }

        if languages.is_empty() {
            return LanguageRegistry::default();
        }

        let default = sanitize_code(default);
        let default = if languages.iter().any(|l| l.code == default) {
            default
        } else {
            languages[0].code.clone()
        };

        LanguageRegistry { default, languages }
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// 除默认语言外的全部翻译语言
    pub fn translation_languages(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter().filter(move |l| l.code != self.default)
    }

    /// 把请求的语言代码解析为注册表里的有效代码，无效时退回默认语言
    pub fn resolve<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(code) if self.contains(code) => code,
            _ => &self.default,
        }
    }

    /// 切换器用的短标签：展示名首词不超过 4 个字符时用首词，否则用大写代码
    pub fn short_label(&self, code: &str) -> String {
        if let Some(language) = self.get(code) {
            if let Some(first) = language.label.split([' ', '-']).next() {
                if !first.is_empty() && first.chars().count() <= 4 {
                    return first.to_string();
                }
            }
        }
        code.to_uppercase()
    }
}

/// 语言代码清洗：小写字母、数字、连字符和下划线之外的字符全部丢弃
pub fn sanitize_code(code: &str) -> String {
    code.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_')
        .collect()
}

/// 常见语言代码的内置展示名，未知代码用大写代码
pub fn label_from_code(code: &str) -> String {
    match code {
        "en" => "English".to_string(),
        "es" => "Español".to_string(),
        "fr" => "Français".to_string(),
        "de" => "Deutsch".to_string(),
        "it" => "Italiano".to_string(),
        other => other.to_uppercase(),
    }
}
