use kcore_tree::build_hierarchy;
use petgraph::dot::Config::EdgeNoLabel;
use petgraph::dot::Dot;
use petgraph::visit::{GraphBase, GraphProp, IntoNeighbors, NodeCompactIndexable, NodeCount, NodeIndexable};
use petgraph::Undirected;

/// A graph stored as adjacency vectors with plain `usize` node ids.
struct Graph(Vec<Vec<usize>>);

impl Graph {
    fn from_edges(edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut adj = vec![];
        for (u, v) in edges {
            assert_ne!(u, v);
            if u.max(v) >= adj.len() {
                adj.resize(u.max(v) + 1, vec![])
            }
            adj[u].push(v);
            adj[v].push(u);
        }
        Self(adj)
    }
}

impl GraphBase for Graph {
    type EdgeId = usize;
    type NodeId = usize;
}

impl GraphProp for Graph {
    type EdgeType = Undirected;
}

struct Neighbors<'a>(std::slice::Iter<'a, usize>);

impl<'a> Iterator for Neighbors<'a> {
    type Item = usize;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().copied()
    }
}

impl<'a> IntoNeighbors for &'a Graph {
    type Neighbors = Neighbors<'a>;
    fn neighbors(self, a: Self::NodeId) -> Self::Neighbors {
        Neighbors(self.0[a].iter())
    }
}

impl NodeCount for Graph {
    fn node_count(&self) -> usize {
        self.0.len()
    }
}

impl NodeIndexable for Graph {
    fn node_bound(&self) -> usize {
        self.node_count()
    }
    fn to_index(&self, a: Self::NodeId) -> usize {
        a
    }
    fn from_index(&self, i: usize) -> Self::NodeId {
        i
    }
}

impl NodeCompactIndexable for Graph {}

fn main() {
    // a K4 with a triangle and a pendant node attached to it
    let graph = Graph::from_edges([(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (3, 4), (3, 5), (4, 5), (5, 6)]);
    let hierarchy = match build_hierarchy(&graph) {
        Ok(hierarchy) => hierarchy,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    for block in hierarchy.blocks() {
        println!("{} parent={:?} k={} nodes={:?}", block.id(), block.parent(), block.level(), block.vertices());
    }

    let tree = hierarchy.into_digraph().map(|_, block| format!("k={} {:?}", block.level(), block.vertices()), |_, _| "");
    println!("{}", Dot::with_config(&tree, &[EdgeNoLabel]));
}
