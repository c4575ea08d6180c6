use petgraph::graph::UnGraph;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadEdgeListError {
    #[error("invalid line {line} (expected 'u v', got '{content}')")]
    InvalidLine { line: usize, content: String },
    #[error("parse int error")]
    ParseInt(#[from] ParseIntError),
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Reads an undirected graph with one edge `u v` per line.
///
/// Node indices start with 0 and the graph has `max(u, v) + 1` nodes. Empty
/// lines and lines starting with `%` or `#` are skipped.
pub fn read_edge_list<P>(path: P) -> Result<UnGraph<(), ()>, ReadEdgeListError>
where
    P: AsRef<Path>,
{
    parse_edge_list(BufReader::new(File::open(path)?))
}

pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<UnGraph<(), ()>, ReadEdgeListError> {
    let mut n = 0;
    let mut edges = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') || trimmed.starts_with('#') {
            continue;
        }
        let invalid = || ReadEdgeListError::InvalidLine { line: i + 1, content: line.clone() };
        let mut tokens = trimmed.split_ascii_whitespace();
        let (Some(a), Some(b), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(invalid());
        };

        let u: u32 = a.parse()?;
        let v: u32 = b.parse()?;
        let end = u.max(v).checked_add(1).ok_or_else(invalid)?;
        edges.push((u, v));
        n = n.max(end);
    }

    let mut graph = UnGraph::with_capacity(n as usize, edges.len());
    for _ in 0..n {
        graph.add_node(());
    }
    graph.extend_with_edges(edges);
    Ok(graph)
}
