//! Undirected graphs for the coloring game
//!
//! Graph definitions are plain JSON records:
//!
//! ```json
//! { "vertices": 3, "edges": [[0, 1], [1, 2], [2, 0]] }
//! ```

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A vertex and its current color (`None` = uncolored)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub color: Option<u32>,
    pub adjacent: Vec<usize>,
}

/// On-disk graph definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeList {
    pub vertices: usize,
    pub edges: Vec<(usize, usize)>,
}

/// Undirected simple graph with symmetric adjacency lists
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Build from an edge list. Duplicate edges are merged.
    pub fn from_edges(vertices: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); vertices];
        for &(a, b) in edges {
            if a == b {
                return Err(CoreError::SelfLoop(a));
            }
            for (vertex, neighbor) in [(a, b), (b, a)] {
                if neighbor >= vertices || vertex >= vertices {
                    return Err(CoreError::DanglingEdge {
                        vertex,
                        neighbor,
                        len: vertices,
                    });
                }
            }
            if !adjacency[a].contains(&b) {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
        }
        Ok(Self { adjacency })
    }

    /// Cycle 0-1-...-(n-1)-0. Fewer than three vertices gives a path.
    pub fn cycle(n: usize) -> Self {
        let mut edges: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
        if n >= 3 {
            edges.push((n - 1, 0));
        }
        Self::trusted(n, &edges)
    }

    /// Path 0-1-...-(n-1)
    pub fn path(n: usize) -> Self {
        let edges: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
        Self::trusted(n, &edges)
    }

    /// Complete graph on `n` vertices
    pub fn complete(n: usize) -> Self {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j));
            }
        }
        Self::trusted(n, &edges)
    }

    /// `edges` distinct edges drawn uniformly from all vertex pairs
    pub fn random<R: Rng + ?Sized>(vertices: usize, edges: usize, rng: &mut R) -> Result<Self> {
        let max = pair_count(vertices);
        if edges > max {
            return Err(CoreError::TooManyEdges { vertices, edges, max });
        }
        let picked: Vec<(usize, usize)> = rand::seq::index::sample(rng, max, edges)
            .into_iter()
            .map(pair_at)
            .collect();
        Ok(Self::trusted(vertices, &picked))
    }

    pub fn from_edge_list(list: &EdgeList) -> Result<Self> {
        Self::from_edges(list.vertices, &list.edges)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let list: EdgeList = serde_json::from_str(json)?;
        Self::from_edge_list(&list)
    }

    /// Load a JSON graph definition
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Uncolored vertex records, the coloring game's starting state
    pub fn to_vertices(&self) -> Vec<Vertex> {
        self.adjacency
            .iter()
            .map(|adjacent| Vertex {
                color: None,
                adjacent: adjacent.clone(),
            })
            .collect()
    }

    fn trusted(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![Vec::new(); n];
        for &(a, b) in edges {
            if a != b && !adjacency[a].contains(&b) {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
        }
        Self { adjacency }
    }
}

fn pair_count(n: usize) -> usize {
    if n % 2 == 0 {
        (n / 2).saturating_mul(n.saturating_sub(1))
    } else {
        n.saturating_mul(n / 2)
    }
}

/// The `k`-th vertex pair `(a, b)` with `a < b`, ordered by `b` then `a`
fn pair_at(k: usize) -> (usize, usize) {
    let mut b = ((1.0 + (1.0 + 8.0 * k as f64).sqrt()) / 2.0) as usize;
    while b > 1 && b * (b - 1) / 2 > k {
        b -= 1;
    }
    while (b + 1) * b / 2 <= k {
        b += 1;
    }
    (k - b * (b - 1) / 2, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_cycle() {
        let g = Graph::cycle(3);
        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.neighbors(2), &[0, 1]);
    }

    #[test]
    fn test_small_cycle_is_path() {
        assert_eq!(Graph::cycle(2), Graph::path(2));
        assert_eq!(Graph::cycle(2).edge_count(), 1);
    }

    #[test]
    fn test_complete() {
        let g = Graph::complete(5);
        assert_eq!(g.edge_count(), 10);
        assert!(g.neighbors(4).iter().copied().eq(0..4));
        assert_eq!(g.max_degree(), 4);
        assert_eq!(Graph::path(0).max_degree(), 0);
    }

    #[test]
    fn test_from_edges_symmetric_and_deduplicated() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 0), (1, 2)]).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(1), &[0, 2]);
    }

    #[test]
    fn test_from_edges_rejects_bad_edges() {
        assert!(matches!(Graph::from_edges(2, &[(1, 1)]), Err(CoreError::SelfLoop(1))));
        assert!(matches!(
            Graph::from_edges(2, &[(0, 5)]),
            Err(CoreError::DanglingEdge { neighbor: 5, len: 2, .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let g = Graph::from_json_str(r#"{ "vertices": 4, "edges": [[0, 1], [2, 3]] }"#).unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 2);
        assert!(matches!(Graph::from_json_str("{ nope"), Err(CoreError::Parse(_))));
    }

    #[test]
    fn test_pair_at_enumerates_every_pair_once() {
        let pairs: Vec<(usize, usize)> = (0..pair_count(5)).map(pair_at).collect();
        assert_eq!(pairs.len(), 10);
        assert_eq!(pairs[..4], [(0, 1), (0, 2), (1, 2), (0, 3)]);
        let mut unique = pairs.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        assert!(pairs.iter().all(|&(a, b)| a < b && b < 5));
    }

    #[test]
    fn test_random_graph() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for edges in [0, 1, 7, 20] {
            let g = Graph::random(10, edges, &mut rng).unwrap();
            assert_eq!(g.len(), 10);
            assert_eq!(g.edge_count(), edges);
            for v in 0..g.len() {
                assert!(!g.neighbors(v).contains(&v));
                assert!(g.neighbors(v).iter().all(|&n| g.neighbors(n).contains(&v)));
            }
        }

        assert_eq!(Graph::random(6, 15, &mut rng).unwrap(), Graph::complete(6));
        assert!(matches!(
            Graph::random(4, 7, &mut rng),
            Err(CoreError::TooManyEdges { max: 6, .. })
        ));
        assert!(matches!(Graph::random(1, 1, &mut rng), Err(CoreError::TooManyEdges { max: 0, .. })));
    }

    #[test]
    fn test_random_graph_is_seeded() {
        let a = Graph::random(12, 18, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let b = Graph::random(12, 18, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_vertices() {
        let vertices = Graph::path(3).to_vertices();
        assert_eq!(vertices.len(), 3);
        assert!(vertices.iter().all(|v| v.color.is_none()));
        assert_eq!(vertices[1].adjacent, vec![0, 2]);
    }
}
