use std::ops::Index;

use petgraph::graph::DiGraph;
use petgraph::Outgoing;

use crate::{Block, BlockId, HierarchyError};

/// A k-core hierarchy forest.
///
/// Each node is a [Block]. The parent of a block is the block at a lower level
/// that contains all of its nodes. With [BaseLevel::Components](crate::BaseLevel),
/// there is one root for each connected component of the lowest level.
#[derive(Clone, Debug)]
pub struct Hierarchy<NodeId> {
    tree: DiGraph<Block<NodeId>, ()>,
    roots: Vec<BlockId>,
}

impl<NodeId> Hierarchy<NodeId> {
    /// Create the forest from a list of blocks.
    ///
    /// The block with id *i* must be at position *i* and the parent of a block
    /// must come before it in the list.
    ///
    /// # Errors
    ///
    /// Returns `BlockOutOfOrder`, `InvalidParent` or `EmptyBlock` for the first
    /// block that violates these conditions or has no nodes.
    pub fn from_blocks(blocks: Vec<Block<NodeId>>) -> Result<Self, HierarchyError> {
        let mut tree = DiGraph::with_capacity(blocks.len(), blocks.len());
        let mut roots = vec![];
        for (position, block) in blocks.into_iter().enumerate() {
            let id = block.id();
            if id.index() != position {
                return Err(HierarchyError::BlockOutOfOrder { id, position });
            }
            if block.vertices().is_empty() {
                return Err(HierarchyError::EmptyBlock(id));
            }
            let parent = block.parent();
            let node = tree.add_node(block);
            debug_assert_eq!(node, id.0);
            match parent {
                Some(parent) if parent.index() < position => {
                    tree.add_edge(parent.0, node, ());
                }
                Some(parent) => return Err(HierarchyError::InvalidParent { id, parent }),
                None => roots.push(id),
            }
        }
        Ok(Self { tree, roots })
    }

    /// Return the number of blocks.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tree.node_count()
    }

    /// Returns whether the forest has no blocks. This is the case exactly for
    /// the empty graph.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tree.node_count() == 0
    }

    /// Access a block.
    ///
    /// If the block does not exist, return None.
    pub fn block(&self, id: BlockId) -> Option<&Block<NodeId>> {
        self.tree.node_weight(id.0)
    }

    /// Return an iterator over all blocks in id order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block<NodeId>> {
        self.tree.node_weights()
    }

    /// Return the roots in id order.
    pub fn roots(&self) -> &[BlockId] {
        &self.roots
    }

    /// Return the blocks without children in id order.
    pub fn leaves(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.tree.externals(Outgoing).map(BlockId)
    }

    /// Return the parent of a block.
    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.block(id).and_then(Block::parent)
    }

    /// Return the children of a block in id order.
    pub fn children(&self, id: BlockId) -> impl Iterator<Item = BlockId> {
        let mut children: Vec<_> = self.tree.neighbors_directed(id.0, Outgoing).map(BlockId).collect();
        children.sort_unstable();
        children.into_iter()
    }

    /// Return the ancestors of a block, starting with its parent and ending
    /// with a root.
    pub fn ancestors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        std::iter::successors(self.parent(id), |&block| self.parent(block))
    }

    /// Return the number of ancestors of a block. Roots have depth 0.
    pub fn depth(&self, id: BlockId) -> usize {
        self.ancestors(id).count()
    }

    /// Return the blocks of the subtree rooted at `id` in pre-order, starting
    /// with `id`. Children are visited in id order.
    pub fn subtree(&self, id: BlockId) -> Subtree<'_, NodeId> {
        let stack = self.block(id).map(|_| vec![id]).unwrap_or_default();
        Subtree { hierarchy: self, stack }
    }

    /// Return all blocks in pre-order, tree by tree.
    pub fn walk(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.roots.iter().flat_map(|&root| self.subtree(root))
    }

    /// Return the distinct levels in ascending order.
    pub fn levels(&self) -> Vec<u32> {
        let mut levels: Vec<_> = self.blocks().map(Block::level).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    /// Return the blocks of a level in id order.
    pub fn blocks_at(&self, level: u32) -> impl Iterator<Item = &Block<NodeId>> {
        self.blocks().filter(move |block| block.level() == level)
    }

    /// Return the blocks in id order.
    pub fn into_blocks(self) -> Vec<Block<NodeId>> {
        let (nodes, _) = self.tree.into_nodes_edges();
        nodes.into_iter().map(|node| node.weight).collect()
    }

    /// Convert to [DiGraph] with edges from parents to children.
    ///
    /// This allows the use of [petgraph] algorithms. The node index of a block
    /// is [BlockId::index].
    ///
    /// ```rust
    /// # use std::error::Error;
    /// #
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use petgraph::graph::{NodeIndex, UnGraph};
    /// use petgraph::Incoming;
    /// use kcore_tree::build_hierarchy;
    ///
    /// let graph = UnGraph::<(), ()>::from_edges([(0, 1), (0, 2), (1, 2), (2, 3), (3, 4)]);
    /// let digraph = build_hierarchy(&graph)?.into_digraph();
    ///
    /// let roots: Vec<_> = digraph.externals(Incoming).collect();
    /// assert_eq!(roots, [NodeIndex::new(0)]);
    /// assert_eq!(digraph.edge_count(), 1);
    /// assert!(digraph.contains_edge(NodeIndex::new(0), NodeIndex::new(1)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_digraph(self) -> DiGraph<Block<NodeId>, ()> {
        self.tree
    }
}

impl<NodeId> Index<BlockId> for Hierarchy<NodeId> {
    type Output = Block<NodeId>;

    fn index(&self, id: BlockId) -> &Self::Output {
        &self.tree[id.0]
    }
}

/// Pre-order iterator over a subtree of a [Hierarchy].
#[derive(Debug)]
pub struct Subtree<'h, NodeId> {
    hierarchy: &'h Hierarchy<NodeId>,
    stack: Vec<BlockId>,
}

impl<NodeId> Iterator for Subtree<'_, NodeId> {
    type Item = BlockId;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(self.hierarchy.children(block));
        self.stack[start..].reverse();
        Some(block)
    }
}

#[cfg(test)]
mod test {
    use petgraph::Incoming;

    use super::*;

    fn id(x: usize) -> BlockId {
        BlockId::new(x)
    }

    fn block(x: usize, parent: Option<usize>, vertices: &[u32], level: u32) -> Block<u32> {
        Block::new(id(x), parent.map(id), vertices.to_vec(), level)
    }

    /// 0 ─┬─ 2 ─┬─ 4
    ///    │     └─ 5 ── 6
    ///    └─ 3
    /// 1
    fn small_forest() -> Hierarchy<u32> {
        Hierarchy::from_blocks(vec![
            block(0, None, &[0, 1, 2, 3, 4, 5, 6], 0),
            block(1, None, &[7], 0),
            block(2, Some(0), &[0, 1, 2, 3, 4], 1),
            block(3, Some(0), &[5, 6], 1),
            block(4, Some(2), &[0, 1], 2),
            block(5, Some(2), &[2, 3, 4], 2),
            block(6, Some(5), &[2, 3, 4], 3),
        ])
        .unwrap()
    }

    #[test]
    fn structure() {
        let forest = small_forest();
        assert_eq!(forest.len(), 7);
        assert_eq!(forest.roots(), [id(0), id(1)]);
        assert_eq!(forest.children(id(0)).collect::<Vec<_>>(), [id(2), id(3)]);
        assert_eq!(forest.children(id(2)).collect::<Vec<_>>(), [id(4), id(5)]);
        assert_eq!(forest.children(id(1)).count(), 0);
        assert_eq!(forest.parent(id(6)), Some(id(5)));
        assert_eq!(forest.parent(id(1)), None);
        assert_eq!(forest.leaves().collect::<Vec<_>>(), [id(1), id(3), id(4), id(6)]);
        assert_eq!(forest.levels(), [0, 1, 2, 3]);
        assert_eq!(forest.blocks_at(2).map(Block::id).collect::<Vec<_>>(), [id(4), id(5)]);
    }

    #[test]
    fn traversal() {
        let forest = small_forest();
        assert_eq!(forest.ancestors(id(6)).collect::<Vec<_>>(), [id(5), id(2), id(0)]);
        assert_eq!(forest.ancestors(id(0)).count(), 0);
        assert_eq!(forest.depth(id(6)), 3);
        assert_eq!(forest.subtree(id(2)).collect::<Vec<_>>(), [id(2), id(4), id(5), id(6)]);
        assert_eq!(forest.walk().collect::<Vec<_>>(), [id(0), id(2), id(4), id(5), id(6), id(3), id(1)]);
    }

    #[test]
    fn unknown_block() {
        let forest = small_forest();
        assert!(forest.block(id(7)).is_none());
        assert_eq!(forest.parent(id(7)), None);
        assert_eq!(forest.children(id(7)).count(), 0);
        assert_eq!(forest.subtree(id(7)).count(), 0);
    }

    #[test]
    fn empty() {
        let forest = Hierarchy::<u32>::from_blocks(vec![]).unwrap();
        assert!(forest.is_empty());
        assert!(forest.levels().is_empty());
        assert_eq!(forest.walk().count(), 0);
    }

    #[test]
    fn into_blocks_and_digraph() {
        let forest = small_forest();
        let blocks = forest.clone().into_blocks();
        assert_eq!(blocks.len(), 7);
        assert_eq!(blocks[5], block(5, Some(2), &[2, 3, 4], 2));

        let digraph = forest.into_digraph();
        assert_eq!(digraph.edge_count(), 5);
        assert_eq!(digraph.externals(Incoming).count(), 2);
        assert!(digraph.contains_edge(id(5).0, id(6).0));
    }

    #[test]
    fn invalid_blocks() {
        let err = Hierarchy::from_blocks(vec![block(1, None, &[0], 0)]).unwrap_err();
        assert_eq!(err, HierarchyError::BlockOutOfOrder { id: id(1), position: 0 });

        let err = Hierarchy::from_blocks(vec![block(0, None, &[0], 0), block(1, Some(1), &[0], 1)]).unwrap_err();
        assert_eq!(err, HierarchyError::InvalidParent { id: id(1), parent: id(1) });

        let err = Hierarchy::from_blocks(vec![block(0, None, &[], 0)]).unwrap_err();
        assert_eq!(err, HierarchyError::EmptyBlock(id(0)));
    }
}
