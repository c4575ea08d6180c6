use clap::{Parser, ValueEnum};
use common::io::{read_edge_list, read_metis, write_blocks, write_dot, GraphFileType, HierarchyFileType};
use kcore_tree::{BaseLevel, HierarchyBuilder, LevelReport};
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum BaseLevelArg {
    Components,
    Collapsed,
}

impl From<BaseLevelArg> for BaseLevel {
    fn from(value: BaseLevelArg) -> Self {
        match value {
            BaseLevelArg::Components => BaseLevel::Components,
            BaseLevelArg::Collapsed => BaseLevel::Collapsed,
        }
    }
}

/// Computes the k-core hierarchy tree of an undirected graph.
#[derive(Debug, Parser)]
struct Cli {
    #[arg(long)]
    input_type: GraphFileType,
    #[arg(long)]
    input: PathBuf,
    /// Write to stdout if not given.
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "blocks")]
    format: HierarchyFileType,
    #[arg(long, value_enum, default_value = "components")]
    base_level: BaseLevelArg,
    #[arg(long)]
    log_level: Option<Level>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .finish();

        subscriber.init();
    };

    let graph = match cli.input_type {
        GraphFileType::Metis => read_metis(&cli.input)?,
        GraphFileType::EdgeList => read_edge_list(&cli.input)?,
    };
    info!(n = graph.node_count(), m = graph.edge_count());

    let start = Instant::now();
    let hierarchy = HierarchyBuilder::new()
        .base_level(cli.base_level.into())
        .observer(|report: &LevelReport| {
            info!(
                level = report.level,
                number_of_nodes = report.vertex_count,
                number_of_blocks = report.block_count,
                first_block = report.first_block.index()
            )
        })
        .build(&graph)?;
    info!(time_us = start.elapsed().as_micros() as u64, number_of_blocks = hierarchy.len());

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    match cli.format {
        HierarchyFileType::Blocks => write_blocks(&mut out, &hierarchy)?,
        HierarchyFileType::Dot => write_dot(&mut out, hierarchy)?,
    }
    Ok(())
}
