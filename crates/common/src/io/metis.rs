use petgraph::graph::{NodeIndex, UnGraph};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadMetisError {
    #[error("missing header")]
    MissingHeader,
    #[error("invalid header (expected '(n) (m)', got {0})")]
    WrongHeader(String),
    #[error("wrong n given in header (expected {expected}, got {actual})")]
    WrongN { expected: usize, actual: usize },
    #[error("wrong m given in header (expected {expected}, got {actual})")]
    WrongM { expected: usize, actual: usize },
    #[error("node {0} out of range")]
    OutOfRange(usize),
    #[error("number of reverse edges not matching (expected {expected}, got {actual})")]
    NumReverseEdgesNotMatching { expected: usize, actual: usize },
    #[error("edge {0} - {1} is not listed at both endpoints")]
    MissingReverseEdge(usize, usize),
    #[error("parse error")]
    ParseInt(#[from] ParseIntError),
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Reads a graph in the unweighted [metis] format.
///
/// The header line is `n m`, followed by one line per node listing its
/// neighbors. Node indices start with 1. Lines starting with `%` are comments.
/// Self loops are dropped.
///
/// [metis]: https://people.sc.fsu.edu/~jburkardt/data/metis_graph/metis_graph.html
pub fn read_metis<P>(path: P) -> Result<UnGraph<(), ()>, ReadMetisError>
where
    P: AsRef<Path>,
{
    parse_metis(BufReader::new(File::open(path)?))
}

pub fn parse_metis<R: BufRead>(reader: R) -> Result<UnGraph<(), ()>, ReadMetisError> {
    let mut lines = reader.lines().filter(|line| !matches!(line, Ok(line) if line.starts_with('%')));

    let header = lines.next().ok_or(ReadMetisError::MissingHeader)??;
    let (n, m) = {
        let err = || ReadMetisError::WrongHeader(header.clone());
        let mut iter = header.split_ascii_whitespace();
        let n: usize = iter.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let m: usize = iter.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if iter.next().is_some() {
            return Err(err());
        }
        (n, m)
    };

    let mut graph = UnGraph::with_capacity(n, m);
    for _ in 0..n {
        graph.add_node(());
    }

    // Every edge u - v with u < v is added when reading u, and only counted
    // when reading v. listed[v] holds the nodes u < v that listed v, in
    // ascending order.
    let mut listed: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut reverse = 0;
    let mut u = 0;
    for line in lines {
        let line = line?;
        if u == n {
            if line.trim().is_empty() {
                continue;
            }
            return Err(ReadMetisError::WrongN { expected: n, actual: u + 1 });
        }
        for v in line.split_ascii_whitespace() {
            let v: usize = v.parse()?;
            if v == 0 || v > n {
                return Err(ReadMetisError::OutOfRange(v));
            }
            let v = v - 1;
            match u.cmp(&v) {
                Ordering::Less => {
                    graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
                    listed[v].push(u);
                }
                Ordering::Equal => {}
                Ordering::Greater => {
                    if listed[u].binary_search(&v).is_err() {
                        return Err(ReadMetisError::MissingReverseEdge(v + 1, u + 1));
                    }
                    reverse += 1;
                }
            }
        }
        u += 1;
    }

    if u != n {
        return Err(ReadMetisError::WrongN { expected: n, actual: u });
    }
    if graph.edge_count() != m {
        return Err(ReadMetisError::WrongM { expected: m, actual: graph.edge_count() });
    }
    if reverse != m {
        return Err(ReadMetisError::NumReverseEdgesNotMatching { expected: m, actual: reverse });
    }
    Ok(graph)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn triangle_with_tail() {
        let input = "% triangle with a tail\n5 5\n2 3\n1 3\n1 2 4\n3 5\n4\n";
        let graph = parse_metis(input.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.contains_edge(NodeIndex::new(3), NodeIndex::new(4)));
    }

    #[test]
    fn isolated_nodes() {
        let graph = parse_metis("3 1\n2\n1\n\n".as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn large_star() {
        let n = 20000;
        let mut input = format!("{} {}\n", n, n - 1);
        input.push_str(&(2..=n).map(|v| v.to_string()).collect::<Vec<_>>().join(" "));
        input.push('\n');
        for _ in 1..n {
            input.push_str("1\n");
        }
        let graph = parse_metis(input.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), n);
        assert_eq!(graph.edge_count(), n - 1);
        assert_eq!(graph.neighbors(NodeIndex::new(0)).count(), n - 1);
    }

    #[test]
    fn errors() {
        assert!(matches!(parse_metis("".as_bytes()), Err(ReadMetisError::MissingHeader)));
        assert!(matches!(parse_metis("2\n".as_bytes()), Err(ReadMetisError::WrongHeader(_))));
        assert!(matches!(parse_metis("2 1\n2\n".as_bytes()), Err(ReadMetisError::WrongN { expected: 2, actual: 1 })));
        assert!(matches!(
            parse_metis("2 1\n2\n\n".as_bytes()),
            Err(ReadMetisError::NumReverseEdgesNotMatching { expected: 1, actual: 0 })
        ));
        assert!(matches!(parse_metis("1 1\n\n".as_bytes()), Err(ReadMetisError::WrongM { expected: 1, actual: 0 })));
        assert!(matches!(parse_metis("2 1\n3\n1\n".as_bytes()), Err(ReadMetisError::OutOfRange(3))));
        assert!(matches!(parse_metis("2 1\n\n1\n".as_bytes()), Err(ReadMetisError::MissingReverseEdge(1, 2))));
    }
}
