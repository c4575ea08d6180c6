use kcore_tree::{Block, BlockId, Hierarchy};
use petgraph::dot::{Config, Dot};
use petgraph::graph::NodeIndex;
use std::io::{BufRead, Write};
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadBlocksError {
    #[error("missing header")]
    MissingHeader,
    #[error("invalid header (got {0})")]
    InvalidHeader(String),
    #[error("invalid block line (got {0})")]
    InvalidLine(String),
    #[error("wrong number of blocks (expected {expected}, got {actual})")]
    WrongCount { expected: usize, actual: usize },
    #[error("parse int error")]
    ParseInt(#[from] ParseIntError),
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum WriteBlocksError {
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

pub fn write_blocks<W: Write>(out: &mut W, hierarchy: &Hierarchy<NodeIndex>) -> Result<(), WriteBlocksError> {
    writeln!(out, "%% k-core hierarchy")?;
    writeln!(out, "%% 1st line:   number_of_blocks number_of_levels")?;
    writeln!(out, "%% ff lines:   id parent level nodes...")?;
    writeln!(out, "%%   parent:   '-' for roots")?;
    write!(out, "% roots")?;
    for root in hierarchy.roots() {
        write!(out, " {root}")?;
    }
    writeln!(out)?;
    writeln!(out, "{} {}", hierarchy.len(), hierarchy.levels().len())?;
    for block in hierarchy.blocks() {
        match block.parent() {
            Some(parent) => write!(out, "{} {} {}", block.id(), parent, block.level())?,
            None => write!(out, "{} - {}", block.id(), block.level())?,
        }
        for u in block.vertices() {
            write!(out, " {}", u.index())?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Reads blocks written by [write_blocks].
///
/// The blocks are not checked for consistency. Use [Hierarchy::from_blocks] to
/// restore the forest.
pub fn read_blocks<R: BufRead>(reader: R) -> Result<Vec<Block<NodeIndex>>, ReadBlocksError> {
    let mut lines = reader.lines();
    let first_line = loop {
        let line = lines.next().ok_or(ReadBlocksError::MissingHeader)??;
        if !line.starts_with('%') {
            break line;
        }
    };

    let n = {
        let err = || ReadBlocksError::InvalidHeader(first_line.clone());
        let mut iter = first_line.split_ascii_whitespace();
        let n: usize = iter.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let _levels: usize = iter.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if iter.next().is_some() {
            return Err(err());
        }
        n
    };

    let mut blocks = Vec::with_capacity(n);
    for line in lines {
        let line = line?;
        if line.starts_with('%') || line.trim().is_empty() {
            continue;
        }
        let mut values = line.split_ascii_whitespace();
        let (Some(id), Some(parent), Some(level)) = (values.next(), values.next(), values.next()) else {
            return Err(ReadBlocksError::InvalidLine(line));
        };
        let id = BlockId::new(id.parse()?);
        let parent = match parent {
            "-" => None,
            parent => Some(BlockId::new(parent.parse()?)),
        };
        let level: u32 = level.parse()?;
        let vertices = values.map(|u| u.parse().map(NodeIndex::new)).collect::<Result<Vec<_>, _>>()?;
        blocks.push(Block::new(id, parent, vertices, level));
    }

    if blocks.len() != n {
        return Err(ReadBlocksError::WrongCount { expected: n, actual: blocks.len() });
    }
    Ok(blocks)
}

/// Writes the forest in graphviz format with one node per block, labeled with
/// its id, level and number of nodes.
pub fn write_dot<W: Write>(out: &mut W, hierarchy: Hierarchy<NodeIndex>) -> Result<(), WriteBlocksError> {
    let digraph = hierarchy.into_digraph().map(
        |_, block| format!("{} k={} n={}", block.id(), block.level(), block.vertices().len()),
        |_, _| "",
    );
    writeln!(out, "{}", Dot::with_config(&digraph, &[Config::EdgeNoLabel]))?;
    out.flush()?;
    Ok(())
}
