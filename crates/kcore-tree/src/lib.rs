//! This is a library to compute the [k-core](https://en.wikipedia.org/wiki/Degeneracy_(graph_theory)) hierarchy tree of a simple, undirected graph.
//!
//! The *coreness* of a node is the largest *k* such that the node belongs to a
//! subgraph in which every node has degree at least *k*. For each distinct
//! coreness value *k* present in the graph, the nodes with coreness at least
//! *k* induce a subgraph that splits into connected components. Each component
//! is a [Block]. A block at level *k* is nested in exactly one block at the
//! previous level, which is its parent in the resulting [Hierarchy].
//!
//! # Examples
//!
//! A triangle with a pendant path.
//! ```rust
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use petgraph::graph::{NodeIndex, UnGraph};
//! use kcore_tree::build_hierarchy;
//!
//! let graph = UnGraph::<(), ()>::from_edges([(0, 1), (0, 2), (1, 2), (2, 3), (3, 4)]);
//! let hierarchy = build_hierarchy(&graph)?;
//!
//! assert_eq!(hierarchy.levels(), [1, 2]);
//! let root = hierarchy.roots()[0];
//! let core: Vec<_> = hierarchy.children(root).collect();
//! assert_eq!(core.len(), 1);
//! assert_eq!(hierarchy[core[0]].vertices(), [NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)]);
//! # Ok(())
//! # }
//! ```
//!
//! Disconnected parts of the graph are separate trees of the forest.
//! ```rust
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use petgraph::graph::UnGraph;
//! use kcore_tree::build_hierarchy;
//!
//! // two disjoint triangles
//! let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
//! let hierarchy = build_hierarchy(&graph)?;
//!
//! assert_eq!(hierarchy.roots().len(), 2);
//! assert!(hierarchy.roots().iter().all(|&root| hierarchy.children(root).count() == 0));
//! # Ok(())
//! # }
//! ```
//!
//! # Generics
//!
//! The algorithm is implemented for structs that implement the `petgraph`
//! traits `NodeCompactIndexable`, `IntoNeighbors`, and `GraphProp<EdgeType =
//! Undirected>`.
//!
//! # References
//! + \[BZ03\]: Vladimir Batagelj and Matjaž Zaveršnik. “An O(m) Algorithm for Cores Decomposition of Networks”. <https://arxiv.org/abs/cs/0310049>.

#![forbid(unsafe_code)]
#![doc(test(attr(deny(warnings, rust_2018_idioms), allow(dead_code))))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod assembly;
mod block;
mod builder;
/// Weak components of the subgraphs induced by each coreness level.
pub mod components;
/// Coreness computation and level extraction.
pub mod coreness;
mod error;
mod hierarchy;


pub use block::{Block, BlockId};
pub use builder::{build_hierarchy, BaseLevel, HierarchyBuilder, LevelReport, NoObserver, Observer};
pub use error::HierarchyError;
pub use hierarchy::{Hierarchy, Subtree};
