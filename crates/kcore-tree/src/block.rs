use std::fmt::{Debug, Display, Formatter};

/// Block identifier.
///
/// Blocks are numbered in the order they are discovered, i.e. by ascending
/// level and, within a level, in component order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BlockId(pub(crate) petgraph::graph::NodeIndex);

impl Debug for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BlockId").field(&self.0.index()).finish()
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.index())
    }
}

impl BlockId {
    /// Create new index from `usize`.
    pub fn new(x: usize) -> Self {
        Self(petgraph::graph::NodeIndex::new(x))
    }

    /// Returns the index as `usize`.
    pub fn index(&self) -> usize {
        self.0.index()
    }
}

/// A connected group of nodes at a coreness level.
///
/// A block is created once during assembly and never changes afterward.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block<NodeId> {
    id: BlockId,
    parent: Option<BlockId>,
    vertices: Vec<NodeId>,
    level: u32,
}

impl<NodeId> Block<NodeId> {
    /// Create a new block.
    ///
    /// Consistency with other blocks is checked by
    /// [Hierarchy::from_blocks](crate::Hierarchy::from_blocks).
    pub fn new(id: BlockId, parent: Option<BlockId>, vertices: Vec<NodeId>, level: u32) -> Self {
        Self { id, parent, vertices, level }
    }

    /// The id of the block.
    #[inline(always)]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The enclosing block at a lower level. `None` for roots.
    #[inline(always)]
    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    /// The nodes of the original graph contained in the block.
    #[inline(always)]
    pub fn vertices(&self) -> &[NodeId] {
        &self.vertices
    }

    /// The coreness threshold that produced the block.
    #[inline(always)]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns whether the block has no parent.
    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
