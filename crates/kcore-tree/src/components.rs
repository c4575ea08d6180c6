use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{Dfs, GraphProp, IntoNeighbors, NodeCompactIndexable, VisitMap};
use petgraph::Undirected;
use tracing::{debug, instrument};

use crate::{BaseLevel, HierarchyError};

/// The components of the subgraph induced by the nodes of one level.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LevelComponents<NodeId> {
    /// The coreness threshold.
    pub level: u32,
    /// Components ordered by their first node. Each component is ordered by
    /// node position.
    pub components: Vec<Vec<NodeId>>,
}

impl<NodeId> LevelComponents<NodeId> {
    /// Total number of nodes over all components.
    pub fn vertex_count(&self) -> usize {
        self.components.iter().map(Vec::len).sum()
    }
}

/// Returns the subgraph induced by the nodes for which `keep` holds.
///
/// Nodes are added in the order of their position in `graph`, so the relative
/// order is preserved. The weight of each node of the subgraph is the node
/// identifier in `graph`.
pub fn induced_subgraph<G, F>(graph: G, mut keep: F) -> UnGraph<G::NodeId, ()>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
    F: FnMut(G::NodeId) -> bool,
{
    let n = graph.node_bound();
    let mut local = vec![None; n];
    let mut subgraph = UnGraph::default();
    for (i, slot) in local.iter_mut().enumerate() {
        let u = graph.from_index(i);
        if keep(u) {
            *slot = Some(subgraph.add_node(u));
        }
    }
    for i in 0..n {
        let Some(a) = local[i] else {
            continue;
        };
        for v in graph.neighbors(graph.from_index(i)) {
            let j = graph.to_index(v);
            // Each undirected edge is seen from both endpoints. Self loops do
            // not change connectivity.
            if j <= i {
                continue;
            }
            if let Some(b) = local[j] {
                subgraph.add_edge(a, b, ());
            }
        }
    }
    subgraph
}

/// Returns the connected components of `graph`.
///
/// Components are ordered by their smallest node index, and the nodes of each
/// component are sorted.
pub fn weak_components<N, E>(graph: &UnGraph<N, E>) -> Vec<Vec<NodeIndex>> {
    let mut components = vec![];
    let mut dfs = Dfs::empty(graph);
    for start in graph.node_indices() {
        if dfs.discovered.is_visited(&start) {
            continue;
        }
        dfs.move_to(start);
        let mut component = vec![];
        while let Some(u) = dfs.next(graph) {
            component.push(u);
        }
        component.sort_unstable();
        components.push(component);
    }
    components
}

/// Computes the components of every level in ascending order of `levels`.
///
/// The nodes of level *k* are the nodes with `coreness >= k`. With
/// [BaseLevel::Collapsed], the first level is a single component containing all
/// of its nodes.
///
/// # Errors
///
/// Returns `CorenessLength` if `coreness` does not have one entry per node of
/// `graph`, and `UnknownVertex` if a component refers to a node of the induced
/// subgraph that has no identifier in `graph`.
#[instrument(skip_all)]
pub fn level_components<G>(
    graph: G,
    coreness: &[u32],
    levels: &[u32],
    base_level: BaseLevel,
) -> Result<Vec<LevelComponents<G::NodeId>>, HierarchyError>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    let n = graph.node_bound();
    if coreness.len() != n {
        return Err(HierarchyError::CorenessLength { expected: n, actual: coreness.len() });
    }
    let mut result = Vec::with_capacity(levels.len());
    for (i, &level) in levels.iter().enumerate() {
        let subgraph = induced_subgraph(graph, |u| coreness[graph.to_index(u)] >= level);

        let components = if i == 0 && base_level == BaseLevel::Collapsed {
            let all: Vec<_> = subgraph.node_indices().collect();
            if all.is_empty() {
                vec![]
            } else {
                vec![all]
            }
        } else {
            weak_components(&subgraph)
        };

        let components = components
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|u| {
                        subgraph.node_weight(u).copied().ok_or(HierarchyError::UnknownVertex { level, node: u.index() })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(level, number_of_nodes = subgraph.node_count(), number_of_components = components.len());
        result.push(LevelComponents { level, components });
    }
    Ok(result)
}

#[cfg(test)]
mod test {
    use petgraph::graph::{NodeIndex, UnGraph};

    use super::*;
    use crate::coreness::{coreness, levels};
    use crate::tests;

    fn to_usize(components: &[Vec<NodeIndex>]) -> Vec<Vec<usize>> {
        components.iter().map(|c| c.iter().map(|u| u.index()).collect()).collect()
    }

    #[test]
    fn induced_subgraph_keeps_identity() {
        let graph = tests::triangle_with_tail();
        let subgraph = induced_subgraph(&graph, |u| u.index() >= 2);
        assert_eq!(subgraph.node_count(), 3);
        assert_eq!(subgraph.edge_count(), 2);
        let tags: Vec<_> = subgraph.node_weights().map(|u| u.index()).collect();
        assert_eq!(tags, [2, 3, 4]);
    }

    #[test]
    fn induced_subgraph_ignores_self_loops() {
        let graph = UnGraph::<(), ()>::from_edges([(0, 0), (0, 1), (1, 2)]);
        let subgraph = induced_subgraph(&graph, |_| true);
        assert_eq!(subgraph.edge_count(), 2);
    }

    #[test]
    fn weak_components_ordered() {
        let graph = UnGraph::<(), ()>::from_edges([(4, 1), (2, 0), (3, 5)]);
        assert_eq!(to_usize(&weak_components(&graph)), [vec![0, 2], vec![1, 4], vec![3, 5]]);
    }

    #[test]
    fn weak_components_isolated() {
        let graph = tests::empty_graph(3);
        assert_eq!(to_usize(&weak_components(&graph)), [[0], [1], [2]]);
    }

    #[test]
    fn levels_of_two_triangles_with_tails() {
        let graph = tests::two_triangles_with_tails();
        let coreness = coreness(&graph);
        let levels = levels(&coreness);
        let components = level_components(&graph, &coreness, &levels, BaseLevel::Components).unwrap();

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].level, 1);
        assert_eq!(to_usize(&components[0].components), [[0, 1, 2, 3, 4], [5, 6, 7, 8, 9]]);
        assert_eq!(components[1].level, 2);
        assert_eq!(to_usize(&components[1].components), [[0, 1, 2], [5, 6, 7]]);
        assert_eq!(components[1].vertex_count(), 6);
    }

    #[test]
    fn collapsed_base_level() {
        let graph = tests::two_triangles_with_tails();
        let coreness = coreness(&graph);
        let levels = levels(&coreness);
        let components = level_components(&graph, &coreness, &levels, BaseLevel::Collapsed).unwrap();

        assert_eq!(to_usize(&components[0].components), [(0..10).collect::<Vec<_>>()]);
        assert_eq!(to_usize(&components[1].components), [[0, 1, 2], [5, 6, 7]]);
    }

    #[test]
    fn coreness_too_short() {
        let graph = tests::path_graph(4);
        let err = level_components(&graph, &[1, 1], &[1], BaseLevel::Components).unwrap_err();
        assert_eq!(err, HierarchyError::CorenessLength { expected: 4, actual: 2 });
    }

    #[test]
    fn no_levels() {
        let graph = tests::empty_graph(0);
        let components = level_components(&graph, &[], &[], BaseLevel::Collapsed).unwrap();
        assert!(components.is_empty());
    }
}
