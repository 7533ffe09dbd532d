//! flownet - 有向带权图上的最大流与最短路
//!
//! 提供两个相互独立的算法，共用同一个图模型：
//! - 预流推进（push-relabel）最大流，带当前弧优化
//! - Bellman-Ford 单源最短路，支持负权边
//!
//! ```
//! use flownet::{max_flow, shortest_paths, Graph};
//!
//! let graph = Graph::from_edges([(0, 1, 3.0), (1, 2, 2.0)]);
//! let distances = shortest_paths(&graph, &0).unwrap();
//! assert_eq!(distances[&2], 5.0);
//!
//! // 最大流会消耗图并返回残余图
//! let result = max_flow(graph, &0, &2).unwrap();
//! assert_eq!(result.value, 2.0);
//! ```

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    max_flow, shortest_paths, BellmanFord, FlowStats, MaxFlow, PushRelabel, ShortestPaths,
};
pub use config::{EngineConfig, FlowConfig, PathConfig};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, GraphSnapshot};
pub use types::{NodeKey, Weight, UNREACHABLE};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
