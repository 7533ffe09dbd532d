//! flownet 命令行工具
//!
//! 从文件加载图，计算最大流或最短路

use anyhow::Context;
use clap::{Parser, Subcommand};
use flownet::cli::{PrintMode, Printer};
use flownet::import::load_graph;
use flownet::types::describe;
use flownet::{BellmanFord, EngineConfig, Graph, PushRelabel};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flownet")]
#[command(about = "有向带权图的最大流与最短路计算工具")]
#[command(version)]
struct Args {
    /// 配置文件（JSON）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 以 JSON 格式输出
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 预流推进最大流
    MaxFlow {
        /// 图文件（.json 邻接表 或 .csv 边列表）
        #[arg(short, long)]
        graph: PathBuf,

        /// 源点
        #[arg(short, long)]
        source: String,

        /// 汇点
        #[arg(short = 't', long)]
        sink: String,

        /// 输出每条边的流量
        #[arg(long)]
        flows: bool,

        /// push + relabel 步数上限
        #[arg(long)]
        max_steps: Option<u64>,
    },

    /// Bellman-Ford 单源最短路
    Paths {
        /// 图文件（.json 邻接表 或 .csv 边列表）
        #[arg(short, long)]
        graph: PathBuf,

        /// 源点
        #[arg(short, long)]
        source: String,

        /// 只输出到该顶点的结果
        #[arg(short, long)]
        target: Option<String>,

        /// 额外执行一轮松弛以检测负环
        #[arg(long)]
        detect_negative_cycles: bool,
    },

    /// 图统计信息
    Info {
        /// 图文件（.json 邻接表 或 .csv 边列表）
        #[arg(short, long)]
        graph: PathBuf,
    },
}

fn load(path: &Path) -> anyhow::Result<Graph<String>> {
    load_graph(path).with_context(|| format!("无法加载图: {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flownet=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("无法读取配置: {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let printer = Printer::new(if args.json {
        PrintMode::Json
    } else {
        PrintMode::Table
    });

    match args.command {
        Command::MaxFlow {
            graph,
            source,
            sink,
            flows,
            max_steps,
        } => {
            if max_steps.is_some() {
                config.flow.max_steps = max_steps;
            }
            let graph = load(&graph)?;
            let result = PushRelabel::new(graph, &source, &sink)?
                .with_config(config.flow)
                .run()?;
            print!("{}", printer.print_max_flow(&result, &source, &sink, flows));
        }
        Command::Paths {
            graph,
            source,
            target,
            detect_negative_cycles,
        } => {
            if detect_negative_cycles {
                config.paths.detect_negative_cycles = true;
            }
            let graph = load(&graph)?;
            if let Some(target) = &target {
                if !graph.contains_node(target) {
                    return Err(flownet::Error::NodeNotFound(describe(target)).into());
                }
            }
            let paths = BellmanFord::new(&graph)
                .with_config(config.paths)
                .run(&source)?;
            print!("{}", printer.print_shortest_paths(&paths, target.as_ref()));
        }
        Command::Info { graph } => {
            let graph = load(&graph)?;
            print!("{}", printer.print_stats(&graph));
        }
    }

    Ok(())
}
