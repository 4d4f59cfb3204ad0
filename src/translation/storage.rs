//! 翻译数据存储
//!
//! 每个页面一份可序列化的翻译数据：当前提取到的字符串快照、
//! 按语言分组的"记录 id → 译文"表、以及最近一次写入的时间戳。
//! 持久化格式和传输是宿主的事情，这里只定义数据形态和一个最小
//! 的存取接口。写入没有乐观并发控制，后写者覆盖先写者——这是
//! 已知且未设防的竞态，不由核心解决。

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::extract::{PageStringSet, StringRecord};
use crate::translation::TranslationMap;

/// 一个页面的全部翻译数据
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PageTranslationData {
    /// 最近一次提取的字符串快照（文档顺序）
    pub strings: Vec<StringRecord>,
    /// 语言代码 → (记录 id → 译文)
    pub translations: HashMap<String, HashMap<String, String>>,
    /// 最近一次写入的 Unix 秒
    pub updated: u64,
}

impl PageTranslationData {
    /// 用一次新的提取结果刷新字符串快照
    pub fn refresh_strings(&mut self, strings: &PageStringSet) {
        self.strings = strings.records().to_vec();
    }

    /// 写入某个语言的译文表
    ///
    /// 空译文丢弃（编辑界面留空即回退原文）；其余语言的条目按当前
    /// 字符串快照裁剪，提取不到的旧键不再保留。不允许覆盖基线语言。
    pub fn save_language(
        &mut self,
        lang: &str,
        base_lang: &str,
        entries: HashMap<String, String>,
    ) -> TranslationResult<()> {
        if lang == base_lang {
            return Err(TranslationError::InvalidInput(
                "不能覆盖默认语言".to_string(),
            ));
        }

        let known: Vec<&str> = self.strings.iter().map(|r| r.id.as_str()).collect();

        for (code, table) in self.translations.iter_mut() {
            if code == lang {
                continue;
            }
            table.retain(|id, _| known.contains(&id.as_str()));
        }

        let cleaned: HashMap<String, String> = entries
            .into_iter()
            .filter(|(id, value)| !value.is_empty() && known.contains(&id.as_str()))
            .collect();

        self.translations.insert(lang.to_string(), cleaned);
        self.updated = unix_now();
        Ok(())
    }

    /// 解析出某个语言的"规范化键 → 译文"映射
    ///
    /// 没有该语言的数据时返回空映射。
    pub fn translation_map(&self, lang: &str) -> TranslationMap {
        let mut map = TranslationMap::new();
        let entries = match self.translations.get(lang) {
            Some(entries) => entries,
            None => return map,
        };
        for record in &self.strings {
            if let Some(value) = entries.get(&record.id) {
                if !record.key.is_empty() {
                    map.insert(record.key.clone(), value.clone());
                }
            }
        }
        map
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// 按页面存取翻译数据的最小接口
pub trait TranslationStore {
    fn load(&self, page: &str) -> TranslationResult<Option<PageTranslationData>>;
    fn save(&mut self, page: &str, data: &PageTranslationData) -> TranslationResult<()>;
}

/// 内存存储，测试与嵌入场景用
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: HashMap<String, PageTranslationData>,
}

impl TranslationStore for MemoryStore {
    fn load(&self, page: &str) -> TranslationResult<Option<PageTranslationData>> {
        Ok(self.pages.get(page).cloned())
    }

    fn save(&mut self, page: &str, data: &PageTranslationData) -> TranslationResult<()> {
        self.pages.insert(page.to_string(), data.clone());
        Ok(())
    }
}

/// 目录式 JSON 文件存储，每个页面一个文件
#[derive(Debug)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            directory: directory.into(),
        }
    }

    fn page_path(&self, page: &str) -> TranslationResult<PathBuf> {
        if page.is_empty() || page.contains(['/', '\\', '.']) {
            return Err(TranslationError::InvalidInput(format!(
                "非法的页面标识: {page:?}"
            )));
        }
        Ok(self.directory.join(format!("{page}.json")))
    }
}

impl TranslationStore for JsonFileStore {
    fn load(&self, page: &str) -> TranslationResult<Option<PageTranslationData>> {
        let path = self.page_path(page)?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        let data = serde_json::from_str(&raw)?;
        Ok(Some(data))
    }

    fn save(&mut self, page: &str, data: &PageTranslationData) -> TranslationResult<()> {
        let path = self.page_path(page)?;
        std::fs::create_dir_all(&self.directory)?;
        std::fs::write(path, serde_json::to_string_pretty(data)?)?;
        Ok(())
    }
}
