//! 图核心模块
//!
//! 定义边和邻接表形式的有向带权图

mod edge;
mod graph;

pub use edge::Edge;
pub use graph::{Graph, GraphSnapshot};
