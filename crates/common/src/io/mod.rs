mod blocks;
mod edge_list;
mod metis;

use clap::ValueEnum;
pub use blocks::{read_blocks, write_blocks, write_dot, ReadBlocksError, WriteBlocksError};
pub use edge_list::{parse_edge_list, read_edge_list, ReadEdgeListError};
pub use metis::{parse_metis, read_metis, ReadMetisError};

#[derive(Debug, Clone, Eq, PartialEq, ValueEnum)]
pub enum GraphFileType {
    Metis,
    EdgeList,
}

#[derive(Debug, Clone, Eq, PartialEq, ValueEnum)]
pub enum HierarchyFileType {
    Blocks,
    Dot,
}
