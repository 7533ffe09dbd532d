//! 图算法模块
//!
//! 包含预流推进最大流和 Bellman-Ford 最短路

mod bellman_ford;
mod push_relabel;

pub use bellman_ford::{shortest_paths, BellmanFord, ShortestPaths};
pub use push_relabel::{max_flow, FlowStats, MaxFlow, PushRelabel};
