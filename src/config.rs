//! 算法配置
//!
//! 可以从 JSON 文件加载，缺省字段取默认值

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 引擎配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 最大流配置
    pub flow: FlowConfig,
    /// 最短路配置
    pub paths: PathConfig,
}

/// 最大流配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// push + relabel 的总步数上限（None 表示不限制）
    pub max_steps: Option<u64>,
    /// 相对容差：盈余或残余容量不超过 `epsilon * max(1, 最大容量)` 时视为 0
    pub epsilon: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            epsilon: 1e-9,
        }
    }
}

/// 最短路配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// 额外执行一轮松弛以检测负环
    pub detect_negative_cycles: bool,
}

impl EngineConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.flow.max_steps, None);
        assert_eq!(config.flow.epsilon, 1e-9);
        assert!(!config.paths.detect_negative_cycles);
    }

    #[test]
    fn test_partial_config() {
        let config = EngineConfig::from_json(r#"{"flow": {"max_steps": 500}}"#).unwrap();

        assert_eq!(config.flow.max_steps, Some(500));
        assert_eq!(config.flow.epsilon, 1e-9);
        assert_eq!(config.paths, PathConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        let result = EngineConfig::from_json(r#"{"flow": {"max_steps": "many"}}"#);
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"paths": {{"detect_negative_cycles": true}}}}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(config.paths.detect_negative_cycles);
    }
}
