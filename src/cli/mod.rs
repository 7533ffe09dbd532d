//! 命令行支持

mod printer;

pub use printer::{PrintMode, Printer};
