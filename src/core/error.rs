// 错误处理系统
// 开发心理：统一的错误类型系统，区分致命的约束耗尽与可恢复的配置问题
// 使用Rust的Result类型确保错误处理的安全性和一致性

use std::{error::Error as StdError, fmt};

// 随机化引擎主要错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomizerError {
    // 约束不可满足，整轮随机化必须中止
    ConfigurationExhausted(String),

    // 配置错误
    Config(String),

    // 数据错误（图鉴缺失条目等）
    Data(String),

    // 解析错误
    Parse(String),
}

// Result类型别名
pub type Result<T> = std::result::Result<T, RandomizerError>;

impl fmt::Display for RandomizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomizerError::ConfigurationExhausted(msg) => write!(f, "约束耗尽: {}", msg),
            RandomizerError::Config(msg) => write!(f, "配置错误: {}", msg),
            RandomizerError::Data(msg) => write!(f, "数据错误: {}", msg),
            RandomizerError::Parse(msg) => write!(f, "解析错误: {}", msg),
        }
    }
}

impl StdError for RandomizerError {}

// 错误转换实现
impl From<serde_json::Error> for RandomizerError {
    fn from(error: serde_json::Error) -> Self {
        RandomizerError::Parse(error.to_string())
    }
}

impl RandomizerError {
    // 致命错误意味着本轮结果不可用，调用方不应部分应用
    pub fn is_fatal(&self) -> bool {
        matches!(self, RandomizerError::ConfigurationExhausted(_))
    }
}
