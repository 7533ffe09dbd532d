//! 图数据结构
//!
//! 邻接表形式的有向带权图，最大流与最短路共用

use super::edge::Edge;
use crate::error::{Error, Result};
use crate::types::{describe, NodeKey, Weight};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// 有向带权图
///
/// 顶点 -> (邻居 -> 边值)。两层都是 `IndexMap`，邻居按插入顺序排列，
/// 计算过程中不会删除条目，因此按位置访问邻居是稳定的；新建的反向边
/// 总是追加在末尾。
///
/// 序列化格式即普通的邻接对象，例如 `{"0": {"1": 10, "2": 5}, "1": {}}`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "N: Serialize + Eq + Hash",
    deserialize = "N: Deserialize<'de> + Eq + Hash"
))]
pub struct Graph<N> {
    adjacency: IndexMap<N, IndexMap<N, Weight>>,
}

/// 图的只读快照（供外部可视化使用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot<N> {
    /// 所有顶点（包含没有出边的终点）
    pub nodes: Vec<N>,
    /// 所有边及其当前数值
    pub edges: Vec<Edge<N>>,
}

impl<N: NodeKey> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> Graph<N> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }

    /// 从 `(src, dst, value)` 边列表构建
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, Weight)>,
    {
        let mut graph = Self::new();
        for (src, dst, value) in edges {
            graph.add_edge(src, dst, value);
        }
        graph
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，返回是否为新顶点
    pub fn add_node(&mut self, node: N) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, IndexMap::new());
        true
    }

    /// 顶点是否存在
    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// 顶点数
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// 按插入顺序遍历顶点
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    // ==================== 边操作 ====================

    /// 添加边（两个端点都会注册为顶点）
    ///
    /// 已存在的边会被覆盖，返回旧值。
    pub fn add_edge(&mut self, src: N, dst: N, value: Weight) -> Option<Weight> {
        self.add_node(src.clone());
        self.add_node(dst.clone());
        self.adjacency
            .get_mut(&src)
            .and_then(|targets| targets.insert(dst, value))
    }

    /// 边数
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|targets| targets.len()).sum()
    }

    /// 获取边值
    pub fn weight(&self, src: &N, dst: &N) -> Option<Weight> {
        self.adjacency.get(src)?.get(dst).copied()
    }

    /// 获取顶点的出边（按插入顺序）
    pub fn neighbors(&self, node: &N) -> Option<&IndexMap<N, Weight>> {
        self.adjacency.get(node)
    }

    /// 顶点所有出边数值之和
    pub fn out_capacity(&self, node: &N) -> Option<Weight> {
        self.adjacency.get(node).map(|targets| targets.values().sum())
    }

    /// 遍历所有边
    pub fn edges(&self) -> impl Iterator<Item = Edge<N>> + '_ {
        self.adjacency.iter().flat_map(|(src, targets)| {
            targets
                .iter()
                .map(move |(dst, &value)| Edge::new(src.clone(), dst.clone(), value))
        })
    }

    /// 检查每条边的终点都是图中的顶点
    pub fn validate(&self) -> Result<()> {
        for (src, targets) in &self.adjacency {
            if let Some(dst) = targets.keys().find(|dst| !self.adjacency.contains_key(*dst)) {
                return Err(Error::MalformedGraph(format!(
                    "边 {} -> {} 的终点不在图中",
                    describe(src),
                    describe(dst)
                )));
            }
        }
        Ok(())
    }

    /// 导出快照（不修改图）
    pub fn snapshot(&self) -> GraphSnapshot<N> {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().collect(),
        }
    }

    // ==================== 按位置访问（算法内部使用） ====================

    pub(crate) fn index_of(&self, node: &N) -> Option<usize> {
        self.adjacency.get_index_of(node)
    }

    pub(crate) fn node_at(&self, index: usize) -> Option<&N> {
        self.adjacency.get_index(index).map(|(node, _)| node)
    }

    /// 顶点的出边数
    pub(crate) fn degree_at(&self, index: usize) -> usize {
        self.adjacency
            .get_index(index)
            .map_or(0, |(_, targets)| targets.len())
    }

    /// 第 `u` 个顶点的第 `k` 条出边：(终点位置, 边值)
    pub(crate) fn arc_at(&self, u: usize, k: usize) -> Option<(usize, Weight)> {
        let (_, targets) = self.adjacency.get_index(u)?;
        let (dst, &value) = targets.get_index(k)?;
        Some((self.adjacency.get_index_of(dst)?, value))
    }

    /// 第 `u` 个顶点的全部出边：(终点位置, 边值)
    pub(crate) fn arcs_at(&self, u: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        self.adjacency
            .get_index(u)
            .into_iter()
            .flat_map(move |(_, targets)| {
                targets
                    .iter()
                    .filter_map(move |(dst, &value)| Some((self.adjacency.get_index_of(dst)?, value)))
            })
    }

    /// 设置第 `u` 个顶点第 `k` 条出边的值
    pub(crate) fn set_arc_at(&mut self, u: usize, k: usize, value: Weight) {
        if let Some((_, targets)) = self.adjacency.get_index_mut(u) {
            if let Some((_, slot)) = targets.get_index_mut(k) {
                *slot = value;
            }
        }
    }

    /// 将边 `u -> v` 的值加上 `delta`，边不存在时先以 0 创建（追加到末尾）
    pub(crate) fn adjust_arc(&mut self, u: usize, v: usize, delta: Weight) {
        let Some(dst) = self.node_at(v).cloned() else {
            return;
        };
        if let Some((_, targets)) = self.adjacency.get_index_mut(u) {
            *targets.entry(dst).or_insert(0.0) += delta;
        }
    }
}

impl<N: NodeKey> FromIterator<(N, N, Weight)> for Graph<N> {
    fn from_iter<I: IntoIterator<Item = (N, N, Weight)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}
