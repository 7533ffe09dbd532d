//! 通用类型定义

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// 边的数值（流算法中为容量，最短路中为权重）
pub type Weight = f64;

/// 不可达顶点的距离
pub const UNREACHABLE: Weight = f64::INFINITY;

/// 顶点标识符需要满足的约束
///
/// 只要求相等性和哈希，不假设整数语义。`Display` 用于错误信息和输出。
pub trait NodeKey: Clone + Eq + Hash + Debug + Display {}

impl<T: Clone + Eq + Hash + Debug + Display> NodeKey for T {}

/// 顶点标识符的可读形式（错误信息和命令行输出共用）
pub fn describe<N: NodeKey>(node: &N) -> String {
    node.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_keeps_raw_text() {
        assert_eq!(describe(&42u32), "42");
        assert_eq!(describe(&r#"dock\7 "east""#.to_string()), r#"dock\7 "east""#);
    }
}
