//! 最大流算法
//!
//! 实现通用的预流推进（push-relabel）算法，带当前弧（邻居游标）优化。
//! 每一轮按顶点枚举顺序扫描所有非源非汇顶点，对有盈余的顶点执行 discharge，
//! 直到没有顶点有盈余。最坏复杂度 O(V²E)。

use crate::config::FlowConfig;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph};
use crate::types::{describe, NodeKey, Weight};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, error, trace, warn};

/// 运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStats {
    /// push 次数
    pub pushes: u64,
    /// relabel 次数
    pub relabels: u64,
    /// discharge 次数
    pub discharges: u64,
    /// 完整扫描轮数
    pub sweeps: u64,
}

impl FlowStats {
    /// push 与 relabel 的总步数
    pub fn steps(&self) -> u64 {
        self.pushes + self.relabels
    }
}

/// 最大流结果
#[derive(Debug, Clone)]
pub struct MaxFlow<N> {
    /// 最大流量值（汇点的最终盈余）
    pub value: Weight,
    /// 原图每条边上的正向净流量（只保留正流量）
    pub flows: IndexMap<(N, N), Weight>,
    /// 最小割的源侧顶点集（残余图中从源点可达的顶点）
    pub source_side: IndexSet<N>,
    /// 计算后的残余图
    pub residual: Graph<N>,
    /// 运行统计
    pub stats: FlowStats,
}

impl<N: NodeKey> MaxFlow<N> {
    /// 边 `src -> dst` 上的流量
    pub fn flow(&self, src: &N, dst: &N) -> Weight {
        self.flows
            .get(&(src.clone(), dst.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    /// 原图中跨越最小割（源侧 -> 汇侧）的边
    pub fn cut_edges(&self, original: &Graph<N>) -> Vec<Edge<N>> {
        original
            .edges()
            .filter(|edge| {
                self.source_side.contains(&edge.src) && !self.source_side.contains(&edge.dst)
            })
            .collect()
    }

    /// 最小割容量，等于最大流量
    pub fn cut_capacity(&self, original: &Graph<N>) -> Weight {
        self.cut_edges(original).iter().map(|edge| edge.value).sum()
    }
}

/// 预流推进最大流算法
///
/// 算法拥有传入的图并把它改写为残余图，计算结束后通过
/// [`MaxFlow::residual`] 交还。需要保留原始容量时请先 `clone`。
pub struct PushRelabel<N> {
    /// 残余图
    graph: Graph<N>,
    /// 原始容量（用于计算每条边的流量）
    capacities: Graph<N>,
    source: usize,
    sink: usize,
    /// 顶点高度
    height: Vec<usize>,
    /// 顶点盈余
    excess: Vec<Weight>,
    /// 当前弧游标
    cursor: Vec<usize>,
    /// 最大有限容量（不小于 1），容差按它缩放
    scale: Weight,
    /// 不超过该值的盈余和残余容量视为 0
    tolerance: Weight,
    config: FlowConfig,
    stats: FlowStats,
}

impl<N: NodeKey> PushRelabel<N> {
    /// 创建算法实例
    ///
    /// 在修改图之前完成所有校验：边的终点必须存在、源汇点必须存在且不同、
    /// 容量必须是非负有限值。
    pub fn new(graph: Graph<N>, source: &N, sink: &N) -> Result<Self> {
        graph.validate()?;

        let source_index = graph
            .index_of(source)
            .ok_or_else(|| Error::NodeNotFound(describe(source)))?;
        let sink_index = graph
            .index_of(sink)
            .ok_or_else(|| Error::NodeNotFound(describe(sink)))?;

        if source_index == sink_index {
            return Err(Error::InvalidArgument(format!(
                "源点与汇点相同: {}",
                describe(source)
            )));
        }

        if let Some(edge) = graph
            .edges()
            .find(|edge| !edge.value.is_finite() || edge.value < 0.0)
        {
            return Err(Error::MalformedGraph(format!(
                "边 {} -> {} 的容量非法: {}",
                describe(&edge.src),
                describe(&edge.dst),
                edge.value
            )));
        }

        let n = graph.node_count();
        let mut height = vec![0; n];
        // 源点始终最高
        height[source_index] = n;

        let scale = graph.edges().map(|edge| edge.value).fold(1.0, Weight::max);
        let config = FlowConfig::default();

        Ok(Self {
            capacities: graph.clone(),
            graph,
            source: source_index,
            sink: sink_index,
            height,
            excess: vec![0.0; n],
            cursor: vec![0; n],
            scale,
            tolerance: config.epsilon * scale,
            config,
            stats: FlowStats::default(),
        })
    }

    /// 设置配置
    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.tolerance = config.epsilon * self.scale;
        self.config = config;
        self
    }

    /// 计算最大流
    pub fn run(mut self) -> Result<MaxFlow<N>> {
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "开始计算最大流"
        );

        self.initialize_preflow();

        let active: Vec<usize> = (0..self.graph.node_count())
            .filter(|&u| u != self.source && u != self.sink)
            .collect();

        loop {
            let mut discharged = false;
            for &u in &active {
                if self.excess[u] > self.tolerance {
                    self.discharge(u)?;
                    discharged = true;
                }
            }
            if !discharged {
                break;
            }
            self.stats.sweeps += 1;
        }

        let result = self.finish();
        debug!(
            value = result.value,
            pushes = result.stats.pushes,
            relabels = result.stats.relabels,
            "最大流计算完成"
        );
        Ok(result)
    }

    /// 初始化预流：把源点所有出边的容量推给邻居
    fn initialize_preflow(&mut self) {
        let s = self.source;
        for k in 0..self.graph.degree_at(s) {
            let Some((v, capacity)) = self.graph.arc_at(s, k) else {
                continue;
            };
            self.graph.set_arc_at(s, k, 0.0);
            self.graph.adjust_arc(v, s, capacity);
            self.excess[v] += capacity;
            self.excess[s] -= capacity;
        }
    }

    /// 沿第 `k` 条出边 `u -> v` 推送流量
    ///
    /// 推送后落在容差内的残余容量和盈余清零，避免舍入残留被反复推送。
    fn push(&mut self, u: usize, k: usize, v: usize, residual: Weight) {
        let amount = self.excess[u].min(residual);
        let remaining = residual - amount;
        self.graph
            .set_arc_at(u, k, if remaining > self.tolerance { remaining } else { 0.0 });
        self.graph.adjust_arc(v, u, amount);
        self.excess[u] -= amount;
        if self.excess[u] <= self.tolerance {
            self.excess[u] = 0.0;
        }
        self.excess[v] += amount;
        self.stats.pushes += 1;
    }

    /// 重标号：高度设为残余邻居的最低高度 + 1
    fn relabel(&mut self, u: usize) -> Result<()> {
        let lowest = self
            .graph
            .arcs_at(u)
            .filter(|&(_, residual)| residual > self.tolerance)
            .map(|(v, _)| self.height[v])
            .min();

        match lowest {
            Some(h) => {
                self.height[u] = h + 1;
                self.stats.relabels += 1;
                trace!(node = u, height = h + 1, "重标号");
                Ok(())
            }
            None => {
                let node = self.graph.node_at(u).map(describe).unwrap_or_default();
                error!(node = %node, excess = self.excess[u], "顶点有盈余但没有残余容量");
                Err(Error::RelabelStall {
                    node,
                    excess: self.excess[u],
                })
            }
        }
    }

    /// 排空顶点 `u` 的盈余
    fn discharge(&mut self, u: usize) -> Result<()> {
        self.stats.discharges += 1;

        while self.excess[u] > self.tolerance {
            let k = self.cursor[u];
            match self.graph.arc_at(u, k) {
                Some((v, residual)) => {
                    if residual > self.tolerance && self.height[u] == self.height[v] + 1 {
                        self.check_step_limit()?;
                        self.push(u, k, v, residual);
                    } else {
                        self.cursor[u] += 1;
                    }
                }
                None => {
                    // 游标越过全部邻居
                    self.check_step_limit()?;
                    self.relabel(u)?;
                    self.cursor[u] = 0;
                }
            }
        }

        Ok(())
    }

    fn check_step_limit(&self) -> Result<()> {
        if let Some(max_steps) = self.config.max_steps {
            if self.stats.steps() >= max_steps {
                warn!(max_steps, "最大流超出步数上限");
                return Err(Error::StepLimitExceeded(max_steps));
            }
        }
        Ok(())
    }

    /// 残余图中从源点可达的顶点
    fn reachable_from_source(&self) -> IndexSet<N> {
        let mut visited = vec![false; self.graph.node_count()];
        let mut queue = VecDeque::new();

        visited[self.source] = true;
        queue.push_back(self.source);

        while let Some(u) = queue.pop_front() {
            for (v, residual) in self.graph.arcs_at(u) {
                if !visited[v] && residual > self.tolerance {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }

        visited
            .iter()
            .enumerate()
            .filter(|(_, &seen)| seen)
            .filter_map(|(i, _)| self.graph.node_at(i).cloned())
            .collect()
    }

    fn finish(self) -> MaxFlow<N> {
        let source_side = self.reachable_from_source();

        let flows = self
            .capacities
            .edges()
            .filter_map(|edge| {
                let residual = self.graph.weight(&edge.src, &edge.dst).unwrap_or(0.0);
                let flow = edge.value - residual;
                (flow > self.tolerance).then(|| ((edge.src, edge.dst), flow))
            })
            .collect();

        MaxFlow {
            value: self.excess[self.sink],
            flows,
            source_side,
            residual: self.graph,
            stats: self.stats,
        }
    }
}

/// 计算从 `source` 到 `sink` 的最大流
///
/// `graph` 被消耗，残余图保存在返回值中。
pub fn max_flow<N: NodeKey>(graph: Graph<N>, source: &N, sink: &N) -> Result<MaxFlow<N>> {
    PushRelabel::new(graph, source, sink)?.run()
}
