//! 翻译模块统一错误处理

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug)]
pub enum TranslationError {
    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// 存储错误
    #[error("存储错误: {0}")]
    StorageError(String),

    /// IO错误
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),
}

/// 翻译操作的结果类型
pub type TranslationResult<T> = Result<T, TranslationError>;
