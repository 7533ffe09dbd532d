//! 最短路径算法
//!
//! Bellman-Ford 单源最短路，支持负权边。默认不检测负环：
//! 图中存在从源点可达的负环时，直接返回 |V|-1 轮松弛后的距离。

use crate::config::PathConfig;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{describe, NodeKey, Weight, UNREACHABLE};
use indexmap::IndexMap;
use tracing::debug;

/// 最短路结果
#[derive(Debug, Clone)]
pub struct ShortestPaths<N> {
    /// 源点
    pub source: N,
    /// 每个顶点到源点的距离，不可达为 [`UNREACHABLE`]
    pub distances: IndexMap<N, Weight>,
    /// 最短路上的前驱顶点
    pub predecessors: IndexMap<N, Option<N>>,
    /// 实际执行的松弛轮数
    pub rounds: usize,
}

impl<N: NodeKey> ShortestPaths<N> {
    /// 到某顶点的距离
    pub fn distance(&self, node: &N) -> Option<Weight> {
        self.distances.get(node).copied()
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.distance(node).is_some_and(|d| d < UNREACHABLE)
    }

    /// 从源点到 `target` 的路径
    ///
    /// 不可达时返回 None。沿前驱回溯超过 |V| 步说明前驱链成环
    /// （只可能由未检测的负环造成），同样返回 None。
    pub fn path_to(&self, target: &N) -> Option<Vec<N>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while *current != self.source {
            if path.len() > self.distances.len() {
                return None;
            }
            current = self.predecessors.get(current)?.as_ref()?;
            path.push(current.clone());
        }

        path.reverse();
        Some(path)
    }
}

/// Bellman-Ford 最短路算法
///
/// 只读借用图，不做任何修改。
pub struct BellmanFord<'a, N> {
    graph: &'a Graph<N>,
    config: PathConfig,
}

impl<'a, N: NodeKey> BellmanFord<'a, N> {
    /// 创建算法实例
    pub fn new(graph: &'a Graph<N>) -> Self {
        Self {
            graph,
            config: PathConfig::default(),
        }
    }

    /// 设置配置
    pub fn with_config(mut self, config: PathConfig) -> Self {
        self.config = config;
        self
    }

    /// 计算从 `source` 出发的最短路
    pub fn run(&self, source: &N) -> Result<ShortestPaths<N>> {
        self.graph.validate()?;
        let s = self
            .graph
            .index_of(source)
            .ok_or_else(|| Error::NodeNotFound(describe(source)))?;

        let n = self.graph.node_count();
        let mut dist = vec![UNREACHABLE; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        dist[s] = 0.0;

        let mut rounds = 0;
        for _ in 0..n.saturating_sub(1) {
            rounds += 1;
            if !self.relax_all(&mut dist, &mut prev) {
                // 本轮没有更新，之后的轮次也不会再更新
                break;
            }
        }

        if self.config.detect_negative_cycles && self.relax_all(&mut dist, &mut prev) {
            return Err(Error::MalformedGraph(format!(
                "存在从 {} 可达的负环",
                describe(source)
            )));
        }

        debug!(nodes = n, rounds, "最短路计算完成");

        let node = |i: usize| self.graph.node_at(i).cloned();
        let distances = (0..n)
            .filter_map(|i| Some((node(i)?, dist[i])))
            .collect();
        let predecessors = (0..n)
            .filter_map(|i| Some((node(i)?, prev[i].and_then(node))))
            .collect();

        Ok(ShortestPaths {
            source: source.clone(),
            distances,
            predecessors,
            rounds,
        })
    }

    /// 对所有边做一轮松弛，返回是否有距离被更新
    fn relax_all(&self, dist: &mut [Weight], prev: &mut [Option<usize>]) -> bool {
        let mut updated = false;
        for u in 0..dist.len() {
            if dist[u] == UNREACHABLE {
                continue;
            }
            for (v, weight) in self.graph.arcs_at(u) {
                let candidate = dist[u] + weight;
                if candidate < dist[v] {
                    dist[v] = candidate;
                    prev[v] = Some(u);
                    updated = true;
                }
            }
        }
        updated
    }
}

/// 计算 `source` 到所有顶点的最短距离，不可达为 [`UNREACHABLE`]
pub fn shortest_paths<N: NodeKey>(graph: &Graph<N>, source: &N) -> Result<IndexMap<N, Weight>> {
    BellmanFord::new(graph).run(source).map(|paths| paths.distances)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph<u32> {
        Graph::from_edges([
            (0, 1, 10.0),
            (0, 2, 5.0),
            (1, 2, 2.0),
            (1, 3, 1.0),
            (2, 1, 3.0),
            (2, 3, 9.0),
            (2, 4, 2.0),
            (3, 4, 4.0),
        ])
    }

    #[test]
    fn test_sample_graph() {
        let distances = shortest_paths(&sample_graph(), &0).unwrap();

        let expected: Vec<(u32, Weight)> = vec![(0, 0.0), (1, 8.0), (2, 5.0), (3, 9.0), (4, 7.0)];
        for (node, distance) in expected {
            assert_eq!(distances[&node], distance, "node {}", node);
        }
    }

    #[test]
    fn test_sample_paths() {
        let graph = sample_graph();
        let paths = BellmanFord::new(&graph).run(&0).unwrap();

        assert_eq!(paths.path_to(&4), Some(vec![0, 2, 4]));
        assert_eq!(paths.path_to(&3), Some(vec![0, 2, 1, 3]));
        assert_eq!(paths.path_to(&0), Some(vec![0]));
        assert_eq!(paths.predecessors[&0], None);
    }

    #[test]
    fn test_repeat_is_idempotent() {
        let graph = sample_graph();

        let first = shortest_paths(&graph, &0).unwrap();
        let second = shortest_paths(&graph, &0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_weight() {
        // a -> b 直接 4，经 c 为 5 + (-3) = 2
        let graph = Graph::from_edges([
            ("a", "b", 4.0),
            ("a", "c", 5.0),
            ("c", "b", -3.0),
            ("b", "d", 1.0),
        ]);
        let paths = BellmanFord::new(&graph).run(&"a").unwrap();

        assert_eq!(paths.distance(&"b"), Some(2.0));
        assert_eq!(paths.distance(&"d"), Some(3.0));
        assert_eq!(paths.path_to(&"d"), Some(vec!["a", "c", "b", "d"]));
    }

    #[test]
    fn test_unreachable_is_infinite() {
        let mut graph = Graph::from_edges([(1, 2, 1.0), (3, 1, 1.0)]);
        graph.add_node(4);
        let paths = BellmanFord::new(&graph).run(&1).unwrap();

        assert_eq!(paths.distance(&3), Some(UNREACHABLE));
        assert_eq!(paths.distance(&4), Some(UNREACHABLE));
        assert!(!paths.is_reachable(&3));
        assert_eq!(paths.path_to(&3), None);
        assert_eq!(paths.distance(&2), Some(1.0));
    }

    #[test]
    fn test_single_node() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_node(7);
        let paths = BellmanFord::new(&graph).run(&7).unwrap();

        assert_eq!(paths.distance(&7), Some(0.0));
        assert_eq!(paths.rounds, 0);
    }

    #[test]
    fn test_negative_cycle_not_detected_by_default() {
        // 1 -> 2 -> 1 构成权重 -1 的环
        let graph = Graph::from_edges([(0, 1, 1.0), (1, 2, 1.0), (2, 1, -2.0)]);
        let paths = BellmanFord::new(&graph).run(&0).unwrap();

        // 执行了完整的 |V|-1 轮，结果按原样返回
        assert_eq!(paths.rounds, 2);
        assert!(paths.distance(&1).unwrap() < 1.0);
    }

    #[test]
    fn test_negative_cycle_detected_when_enabled() {
        let graph = Graph::from_edges([(0, 1, 1.0), (1, 2, 1.0), (2, 1, -2.0)]);
        let config = PathConfig {
            detect_negative_cycles: true,
        };
        let result = BellmanFord::new(&graph).with_config(config).run(&0);

        assert!(matches!(result, Err(Error::MalformedGraph(_))));
    }

    #[test]
    fn test_detection_passes_without_cycle() {
        let config = PathConfig {
            detect_negative_cycles: true,
        };
        let graph = sample_graph();
        let paths = BellmanFord::new(&graph).with_config(config).run(&0).unwrap();

        assert_eq!(paths.distance(&4), Some(7.0));
    }

    #[test]
    fn test_missing_source_fails() {
        assert!(matches!(
            shortest_paths(&sample_graph(), &99),
            Err(Error::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_dangling_endpoint_fails() {
        let graph: Graph<u32> = serde_json::from_str(r#"{"0": {"3": 1}}"#).unwrap();
        assert!(matches!(
            shortest_paths(&graph, &0),
            Err(Error::MalformedGraph(_))
        ));
    }

    #[test]
    fn test_graph_not_modified() {
        let graph = sample_graph();
        let before = graph.snapshot();
        shortest_paths(&graph, &0).unwrap();

        assert_eq!(graph.snapshot(), before);
    }
}
