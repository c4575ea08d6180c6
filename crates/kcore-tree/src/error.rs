use thiserror::Error;

use crate::BlockId;

/// Errors raised while building a [Hierarchy](crate::Hierarchy).
///
/// None of these occur for a well-formed graph and its own coreness. They
/// report a broken precondition of the input or an inconsistent collaborator.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum HierarchyError {
    /// The coreness vector does not have one entry per node.
    #[error("coreness vector has {actual} entries (expected {expected})")]
    CorenessLength {
        /// Number of nodes in the graph.
        expected: usize,
        /// Length of the given coreness vector.
        actual: usize,
    },
    /// A component refers to a node that is not part of the induced subgraph.
    #[error("component at level {level} refers to node {node} outside of the induced subgraph")]
    UnknownVertex {
        /// Level of the component.
        level: u32,
        /// Node index local to the induced subgraph.
        node: usize,
    },
    /// The nodes of a component were last seen in different blocks.
    #[error("component at level {level} has conflicting parents {first} and {second}")]
    ConflictingParents {
        /// Level of the component.
        level: u32,
        /// Parent found for the first node with an ancestry.
        first: BlockId,
        /// A different parent found for another node.
        second: BlockId,
    },
    /// Some nodes of a component have an ancestry and others have none.
    #[error("component at level {level} contains node {node} without ancestor (expected {parent})")]
    MissingAncestor {
        /// Level of the component.
        level: u32,
        /// Index of the node without ancestry.
        node: usize,
        /// Parent found for the other nodes.
        parent: BlockId,
    },
    /// A block is not stored at the position given by its id.
    #[error("block {id} found at position {position}")]
    BlockOutOfOrder {
        /// Id of the block.
        id: BlockId,
        /// Position in the block list.
        position: usize,
    },
    /// A parent id does not refer to an earlier block.
    #[error("block {id} refers to invalid parent {parent}")]
    InvalidParent {
        /// Id of the block.
        id: BlockId,
        /// Id of the parent.
        parent: BlockId,
    },
    /// A block does not contain any nodes.
    #[error("block {0} does not contain any nodes")]
    EmptyBlock(BlockId),
}
