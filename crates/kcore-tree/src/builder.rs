use petgraph::visit::{GraphProp, IntoNeighbors, NodeCompactIndexable};
use petgraph::Undirected;
use tracing::{info, instrument};

use crate::assembly::assemble_blocks;
use crate::components::level_components;
use crate::coreness::{coreness, levels};
use crate::{BlockId, Hierarchy, HierarchyError};

/// How the lowest level is split into blocks.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BaseLevel {
    /// Split the lowest level into its connected components, like every other
    /// level. Disconnected parts of the graph become separate roots.
    #[default]
    Components,
    /// Put all nodes of the lowest level into a single root block, regardless
    /// of connectivity.
    Collapsed,
}

/// Summary of one level, passed to an [Observer] after its blocks are created.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LevelReport {
    /// The coreness threshold.
    pub level: u32,
    /// Number of nodes with coreness at least `level`.
    pub vertex_count: usize,
    /// Number of blocks created for the level.
    pub block_count: usize,
    /// Id of the first block of the level. The blocks of a level have
    /// consecutive ids.
    pub first_block: BlockId,
}

/// Receives progress while a hierarchy is built.
///
/// Implemented for closures taking a [LevelReport].
pub trait Observer {
    /// Called once per level, in ascending level order.
    fn level_done(&mut self, report: &LevelReport);
}

impl<F: FnMut(&LevelReport)> Observer for F {
    fn level_done(&mut self, report: &LevelReport) {
        self(report)
    }
}

/// An [Observer] that ignores all reports.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObserver;

impl Observer for NoObserver {
    fn level_done(&mut self, _report: &LevelReport) {}
}

/// Configures how a [Hierarchy] is built.
///
/// ```rust
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use petgraph::graph::UnGraph;
/// use kcore_tree::{BaseLevel, HierarchyBuilder};
///
/// // two disjoint edges
/// let graph = UnGraph::<(), ()>::from_edges([(0, 1), (2, 3)]);
///
/// let mut levels = vec![];
/// let hierarchy = HierarchyBuilder::new()
///     .base_level(BaseLevel::Collapsed)
///     .observer(|report: &kcore_tree::LevelReport| levels.push(report.level))
///     .build(&graph)?;
///
/// assert_eq!(hierarchy.roots().len(), 1);
/// assert_eq!(levels, [1]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HierarchyBuilder<'c, O> {
    base_level: BaseLevel,
    coreness: Option<&'c [u32]>,
    observer: O,
}

impl Default for HierarchyBuilder<'static, NoObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder<'static, NoObserver> {
    /// Create a builder with the default [BaseLevel] that computes coreness
    /// itself and reports nothing.
    pub fn new() -> Self {
        Self { base_level: BaseLevel::default(), coreness: None, observer: NoObserver }
    }
}

impl<'c, O: Observer> HierarchyBuilder<'c, O> {
    /// Set the policy for the lowest level.
    pub fn base_level(mut self, base_level: BaseLevel) -> Self {
        self.base_level = base_level;
        self
    }

    /// Use the given coreness instead of computing it.
    ///
    /// The vector is indexed by node position and must have one entry per
    /// node.
    pub fn with_coreness<'d>(self, coreness: &'d [u32]) -> HierarchyBuilder<'d, O> {
        HierarchyBuilder { base_level: self.base_level, coreness: Some(coreness), observer: self.observer }
    }

    /// Report progress to `observer`.
    pub fn observer<P: Observer>(self, observer: P) -> HierarchyBuilder<'c, P> {
        HierarchyBuilder { base_level: self.base_level, coreness: self.coreness, observer }
    }

    /// Builds the k-core hierarchy of `graph`.
    ///
    /// # Errors
    ///
    /// Returns `CorenessLength` if a given coreness vector does not match the
    /// graph. The remaining variants of [HierarchyError] indicate a coreness
    /// vector that violates the nesting of k-cores.
    #[instrument(skip_all)]
    pub fn build<G>(mut self, graph: G) -> Result<Hierarchy<G::NodeId>, HierarchyError>
    where
        G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
    {
        let n = graph.node_bound();
        let computed;
        let coreness = match self.coreness {
            Some(coreness) => {
                if coreness.len() != n {
                    return Err(HierarchyError::CorenessLength { expected: n, actual: coreness.len() });
                }
                coreness
            }
            None => {
                computed = coreness(graph);
                &computed[..]
            }
        };

        let levels = levels(coreness);
        info!(number_of_nodes = n, number_of_levels = levels.len());

        let components = level_components(graph, coreness, &levels, self.base_level)?;
        let blocks = assemble_blocks(graph, components, &mut self.observer)?;
        let hierarchy = Hierarchy::from_blocks(blocks)?;

        info!(number_of_blocks = hierarchy.len(), number_of_roots = hierarchy.roots().len());
        Ok(hierarchy)
    }
}

/// Computes the k-core hierarchy of the graph.
///
/// Every level is split into its connected components. See
/// [HierarchyBuilder] for other options.
///
/// # Errors
///
/// Does not fail for graphs implementing the petgraph traits consistently. An
/// empty graph results in an empty hierarchy.
pub fn build_hierarchy<G>(graph: G) -> Result<Hierarchy<G::NodeId>, HierarchyError>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    HierarchyBuilder::new().build(graph)
}
