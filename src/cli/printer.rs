//! 结果打印器
//!
//! 提供表格和 JSON 两种输出格式

use crate::algorithm::{MaxFlow, ShortestPaths};
use crate::graph::Graph;
use crate::types::{describe, NodeKey, Weight};
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};
use serde_json::{json, Value};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// JSON 模式
    Json,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

/// 格式化数值，不可达显示为 ∞
fn format_weight(value: Weight) -> String {
    match value {
        v if v == Weight::INFINITY => "∞".to_string(),
        v if v == Weight::NEG_INFINITY => "-∞".to_string(),
        v => v.to_string(),
    }
}

/// 数值转 JSON，无穷大转为 null
fn weight_json(value: Weight) -> Value {
    if value.is_finite() {
        json!(value)
    } else {
        Value::Null
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印最大流结果
    pub fn print_max_flow<N: NodeKey>(
        &self,
        result: &MaxFlow<N>,
        source: &N,
        sink: &N,
        show_flows: bool,
    ) -> String {
        match self.mode {
            PrintMode::Json => {
                let flows: Vec<Value> = result
                    .flows
                    .iter()
                    .map(|((src, dst), flow)| {
                        json!({"src": describe(src), "dst": describe(dst), "flow": flow})
                    })
                    .collect();
                let source_side: Vec<String> = result.source_side.iter().map(describe).collect();
                let value = json!({
                    "source": describe(source),
                    "sink": describe(sink),
                    "max_flow": result.value,
                    "flows": flows,
                    "source_side": source_side,
                    "stats": result.stats,
                });
                format!("{}\n", value)
            }
            PrintMode::Table => {
                let mut output = format!(
                    "Maximum flow {} -> {}: {}\n",
                    describe(source),
                    describe(sink),
                    format_weight(result.value).green().bold()
                );

                if show_flows {
                    let mut table = Table::new();
                    table.set_format(*format::consts::FORMAT_BOX_CHARS);
                    table.set_titles(row!["From", "To", "Flow"]);
                    for ((src, dst), flow) in &result.flows {
                        table.add_row(row![describe(src), describe(dst), format_weight(*flow)]);
                    }
                    output.push_str(&table.to_string());
                }

                output.push_str(&format!(
                    "{} push(es), {} relabel(s), {} sweep(s)\n",
                    result.stats.pushes, result.stats.relabels, result.stats.sweeps
                ));
                output
            }
        }
    }

    /// 打印最短路结果
    pub fn print_shortest_paths<N: NodeKey>(
        &self,
        paths: &ShortestPaths<N>,
        target: Option<&N>,
    ) -> String {
        let nodes: Vec<&N> = match target {
            Some(node) => vec![node],
            None => paths.distances.keys().collect(),
        };

        match self.mode {
            PrintMode::Json => {
                let entries: Vec<Value> = nodes
                    .iter()
                    .map(|node| {
                        let path = paths
                            .path_to(node)
                            .map(|p| p.iter().map(describe).collect::<Vec<_>>());
                        json!({
                            "node": describe(*node),
                            "distance": paths.distance(node).map_or(Value::Null, weight_json),
                            "path": path,
                        })
                    })
                    .collect();
                format!(
                    "{}\n",
                    json!({"source": describe(&paths.source), "distances": entries})
                )
            }
            PrintMode::Table => {
                let mut table = Table::new();
                table.set_format(*format::consts::FORMAT_BOX_CHARS);
                table.set_titles(row!["Node", "Distance", "Path"]);
                for node in nodes {
                    let distance = paths
                        .distance(node)
                        .map_or_else(|| "-".to_string(), format_weight);
                    let path = paths
                        .path_to(node)
                        .map(|p| p.iter().map(describe).collect::<Vec<_>>().join(" -> "))
                        .unwrap_or_default();
                    table.add_row(Row::new(vec![
                        Cell::new(&describe(node)),
                        Cell::new(&distance),
                        Cell::new(&path),
                    ]));
                }
                format!(
                    "Shortest paths from {}\n{}",
                    describe(&paths.source),
                    table
                )
            }
        }
    }

    /// 打印图统计信息
    pub fn print_stats<N: NodeKey>(&self, graph: &Graph<N>) -> String {
        match self.mode {
            PrintMode::Json => format!(
                "{}\n",
                json!({"nodes": graph.node_count(), "edges": graph.edge_count()})
            ),
            PrintMode::Table => {
                let mut table = Table::new();
                table.set_format(*format::consts::FORMAT_BOX_CHARS);
                table.set_titles(row!["Property", "Value"]);
                table.add_row(row!["Node Count", graph.node_count().to_string()]);
                table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
                table.to_string()
            }
        }
    }
}
