use petgraph::visit::NodeIndexable;
use tracing::{debug, instrument};

use crate::components::LevelComponents;
use crate::{Block, BlockId, HierarchyError, LevelReport, Observer};

/// Turns the components of all levels into blocks and links each block to the
/// block that contained its nodes at the previous level.
///
/// `levels` must be in ascending order. Block ids are assigned consecutively
/// in the order of `levels` and their components.
#[instrument(skip_all)]
pub(crate) fn assemble_blocks<G, O>(
    graph: G,
    levels: Vec<LevelComponents<G::NodeId>>,
    observer: &mut O,
) -> Result<Vec<Block<G::NodeId>>, HierarchyError>
where
    G: NodeIndexable + Copy,
    O: Observer,
{
    // ancestry[i] lists the blocks containing node i, by ascending level.
    let mut ancestry: Vec<Vec<BlockId>> = vec![Vec::new(); graph.node_bound()];
    let mut blocks = Vec::with_capacity(levels.iter().map(|l| l.components.len()).sum());

    for level_components in levels {
        let vertex_count = level_components.vertex_count();
        let LevelComponents { level, components } = level_components;
        let first_block = BlockId::new(blocks.len());
        let block_count = components.len();

        for vertices in components {
            let id = BlockId::new(blocks.len());
            let parent = resolve_parent(graph, &ancestry, &vertices, level)?;
            for &u in &vertices {
                ancestry[graph.to_index(u)].push(id);
            }
            blocks.push(Block::new(id, parent, vertices, level));
        }

        debug!(level, number_of_blocks = block_count);
        observer.level_done(&LevelReport { level, vertex_count, block_count, first_block });
    }

    Ok(blocks)
}

/// Returns the most recent block shared by all `vertices`.
///
/// The nodes of a component at level *k* were connected at every lower level,
/// so they must agree on their last block.
fn resolve_parent<G: NodeIndexable>(
    graph: G,
    ancestry: &[Vec<BlockId>],
    vertices: &[G::NodeId],
    level: u32,
) -> Result<Option<BlockId>, HierarchyError> {
    let mut last = vertices.iter().map(|&u| {
        let i = graph.to_index(u);
        (i, ancestry[i].last().copied())
    });
    let Some((first_node, parent)) = last.next() else {
        return Ok(None);
    };
    for (node, other) in last {
        match (parent, other) {
            (Some(first), Some(second)) if first != second => {
                return Err(HierarchyError::ConflictingParents { level, first, second });
            }
            (Some(parent), None) => return Err(HierarchyError::MissingAncestor { level, node, parent }),
            (None, Some(parent)) => {
                return Err(HierarchyError::MissingAncestor { level, node: first_node, parent });
            }
            _ => {}
        }
    }
    Ok(parent)
}

#[cfg(test)]
mod test {
    use petgraph::graph::NodeIndex;

    use super::*;
    use crate::{tests, NoObserver};

    fn level(level: u32, components: &[&[usize]]) -> LevelComponents<NodeIndex> {
        let components = components.iter().map(|c| c.iter().copied().map(NodeIndex::new).collect()).collect();
        LevelComponents { level, components }
    }

    #[test]
    fn sequential_ids_and_parents() {
        let graph = tests::empty_graph(4);
        let levels = vec![level(0, &[&[0, 1], &[2, 3]]), level(1, &[&[0], &[1], &[3]]), level(2, &[&[3]])];
        let blocks = assemble_blocks(&graph, levels, &mut NoObserver).unwrap();

        let ids: Vec<_> = blocks.iter().map(|b| b.id().index()).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4, 5]);
        let parents: Vec<_> = blocks.iter().map(|b| b.parent().map(|p| p.index())).collect();
        assert_eq!(parents, [None, None, Some(0), Some(0), Some(1), Some(4)]);
        let levels: Vec<_> = blocks.iter().map(|b| b.level()).collect();
        assert_eq!(levels, [0, 0, 1, 1, 1, 2]);
    }

    #[test]
    fn skipped_level_keeps_last_ancestor() {
        let graph = tests::empty_graph(3);
        let levels = vec![level(1, &[&[0, 1, 2]]), level(2, &[&[0, 1]]), level(5, &[&[1]])];
        let blocks = assemble_blocks(&graph, levels, &mut NoObserver).unwrap();
        assert_eq!(blocks[2].parent(), Some(BlockId::new(1)));
    }

    #[test]
    fn conflicting_parents() {
        let graph = tests::empty_graph(2);
        let levels = vec![level(0, &[&[0], &[1]]), level(1, &[&[0, 1]])];
        let err = assemble_blocks(&graph, levels, &mut NoObserver).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::ConflictingParents { level: 1, first: BlockId::new(0), second: BlockId::new(1) }
        );
    }

    #[test]
    fn missing_ancestor() {
        let graph = tests::empty_graph(2);
        let levels = vec![level(0, &[&[0]]), level(1, &[&[0, 1]])];
        let err = assemble_blocks(&graph, levels, &mut NoObserver).unwrap_err();
        assert_eq!(err, HierarchyError::MissingAncestor { level: 1, node: 1, parent: BlockId::new(0) });

        let levels = vec![level(0, &[&[1]]), level(1, &[&[0, 1]])];
        let err = assemble_blocks(&graph, levels, &mut NoObserver).unwrap_err();
        assert_eq!(err, HierarchyError::MissingAncestor { level: 1, node: 0, parent: BlockId::new(0) });
    }

    #[test]
    fn reports_per_level() {
        let graph = tests::empty_graph(3);
        let levels = vec![level(0, &[&[0], &[1, 2]]), level(4, &[&[1, 2]])];
        let mut reports = vec![];
        let mut observer = |report: &LevelReport| reports.push(*report);
        assemble_blocks(&graph, levels, &mut observer).unwrap();
        assert_eq!(
            reports,
            [
                LevelReport { level: 0, vertex_count: 3, block_count: 2, first_block: BlockId::new(0) },
                LevelReport { level: 4, vertex_count: 2, block_count: 1, first_block: BlockId::new(2) },
            ]
        );
    }
}
