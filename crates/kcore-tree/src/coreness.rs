use petgraph::visit::{GraphProp, IntoNeighbors, NodeCompactIndexable};
use petgraph::Undirected;
use tracing::{debug, instrument};

/// Computes the coreness of every node.
///
/// The result is indexed by node position, i.e. `coreness[graph.to_index(u)]`.
/// Self loops are ignored and parallel edges are counted once.
///
/// Runs in *O(n + m)* time by repeatedly removing a node of minimum remaining
/// degree with a bucket queue \[BZ03\].
///
/// ```rust
/// use petgraph::graph::UnGraph;
/// use kcore_tree::coreness::coreness;
///
/// // a triangle with a pendant node
/// let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (0, 2), (2, 3)]);
/// assert_eq!(coreness(&graph), [2, 2, 2, 1]);
/// ```
#[instrument(skip_all)]
pub fn coreness<G>(graph: G) -> Vec<u32>
where
    G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
{
    let n = graph.node_bound();
    let adj: Vec<Vec<usize>> = (0..n)
        .map(|u| {
            let mut neighbors: Vec<_> =
                graph.neighbors(graph.from_index(u)).map(|v| graph.to_index(v)).filter(|&v| v != u).collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            neighbors
        })
        .collect();

    let mut degree: Vec<usize> = adj.iter().map(Vec::len).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // bin[d] is the first position of degree d in vert.
    let mut bin = vec![0; max_degree + 1];
    for &d in &degree {
        bin[d] += 1;
    }
    let mut start = 0;
    for b in bin.iter_mut() {
        let count = *b;
        *b = start;
        start += count;
    }

    let mut pos = vec![0; n];
    let mut vert = vec![0; n];
    for u in 0..n {
        let d = degree[u];
        pos[u] = bin[d];
        vert[pos[u]] = u;
        bin[d] += 1;
    }
    for d in (1..=max_degree).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;

    for i in 0..n {
        let v = vert[i];
        for &u in &adj[v] {
            if degree[u] > degree[v] {
                let du = degree[u];
                let (pu, pw) = (pos[u], bin[du]);
                let w = vert[pw];
                if u != w {
                    pos[u] = pw;
                    pos[w] = pu;
                    vert[pu] = w;
                    vert[pw] = u;
                }
                bin[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    debug!(number_of_nodes = n, degeneracy = degree.iter().copied().max().unwrap_or(0));
    degree.into_iter().map(|d| d as u32).collect()
}

/// Returns the distinct coreness values in ascending order.
///
/// ```rust
/// use kcore_tree::coreness::levels;
///
/// assert_eq!(levels(&[2, 1, 2, 0, 1]), [0, 1, 2]);
/// ```
pub fn levels(coreness: &[u32]) -> Vec<u32> {
    let mut levels = coreness.to_vec();
    levels.sort_unstable();
    levels.dedup();
    levels
}
