//! 边定义

use crate::types::Weight;
use serde::{Deserialize, Serialize};

/// 有向带权边
///
/// `value` 在最大流中表示容量（计算后为残余容量），在最短路中表示权重。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<N> {
    /// 源顶点
    pub src: N,
    /// 目标顶点
    pub dst: N,
    /// 边的数值
    pub value: Weight,
}

impl<N> Edge<N> {
    /// 创建新边
    pub fn new(src: N, dst: N, value: Weight) -> Self {
        Self { src, dst, value }
    }
}

impl<N> From<(N, N, Weight)> for Edge<N> {
    fn from((src, dst, value): (N, N, Weight)) -> Self {
        Self::new(src, dst, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_from_tuple() {
        let edge: Edge<u32> = (1, 2, 3.5).into();
        assert_eq!(edge.src, 1);
        assert_eq!(edge.dst, 2);
        assert_eq!(edge.value, 3.5);
    }

    #[test]
    fn test_edge_serialization() {
        let edge = Edge::new("a".to_string(), "b".to_string(), -2.0);
        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(json, r#"{"src":"a","dst":"b","value":-2.0}"#);

        let back: Edge<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edge);
    }
}
