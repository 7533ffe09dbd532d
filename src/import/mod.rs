//! 数据导入模块
//!
//! 从 JSON 邻接表或 CSV 边列表加载图

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::Weight;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// 边记录（CSV 格式）
#[derive(Debug, Deserialize)]
struct EdgeRecord {
    src: String,
    dst: String,
    value: String,
}

/// 从 JSON 邻接表读取图，例如 `{"0": {"1": 10}, "1": {}}`
pub fn read_json<R: Read>(reader: R) -> Result<Graph<String>> {
    let graph: Graph<String> = serde_json::from_reader(reader)
        .map_err(|e| Error::ImportError(format!("JSON 解析错误: {}", e)))?;
    graph.validate()?;
    Ok(graph)
}

/// 从 CSV 边列表读取图，表头为 `src,dst,value`
pub fn read_csv<R: Read>(reader: R) -> Result<Graph<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut graph = Graph::new();
    for (i, record) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        // 第 1 行是表头
        let line = i + 2;
        let record = record.map_err(|e| Error::ImportError(format!("第 {} 行: {}", line, e)))?;
        let value: Weight = record.value.parse().map_err(|_| {
            Error::ImportError(format!("第 {} 行: 无效的边值 {:?}", line, record.value))
        })?;
        graph.add_edge(record.src, record.dst, value);
    }

    Ok(graph)
}

/// 从 JSON 文件加载
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Graph<String>> {
    let file = File::open(path)?;
    read_json(BufReader::new(file))
}

/// 从 CSV 文件加载
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Graph<String>> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file))
}

/// 按扩展名选择格式加载
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Graph<String>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let graph = match extension.as_deref() {
        Some("json") => load_json(path)?,
        Some("csv") => load_csv(path)?,
        other => {
            return Err(Error::ImportError(format!(
                "不支持的格式: {}",
                other.unwrap_or("<无扩展名>")
            )))
        }
    };

    debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "图已加载"
    );
    Ok(graph)
}
