//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    NodeNotFound(String),

    #[error("图结构非法: {0}")]
    MalformedGraph(String),

    #[error("参数无效: {0}")]
    InvalidArgument(String),

    #[error("重标号停滞: 顶点 {node} 仍有盈余 {excess}, 但没有残余容量")]
    RelabelStall { node: String, excess: f64 },

    #[error("超出步数上限: {0}")]
    StepLimitExceeded(u64),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
