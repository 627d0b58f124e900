//! Graph-level summary statistics

use crate::graph::NetworkGraph;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Summary snapshot of one coauthorship graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_authors: usize,

    pub total_collaborations: usize,

    /// Mean number of distinct collaborators per author
    pub avg_collaborators: f64,

    /// Edges over C(N, 2); 1.0 for a complete graph
    pub network_density: f64,

    pub largest_component_size: usize,

    pub is_connected: bool,
}

impl NetworkStats {
    /// The explicit all-zero snapshot reported for an empty graph
    pub fn empty() -> Self {
        Self {
            total_authors: 0,
            total_collaborations: 0,
            avg_collaborators: 0.0,
            network_density: 0.0,
            largest_component_size: 0,
            is_connected: false,
        }
    }

    /// Compute the snapshot for a graph
    pub fn from_graph(graph: &NetworkGraph) -> Self {
        let n = graph.node_count();
        if n == 0 {
            return Self::empty();
        }
        let edges = graph.edge_count();

        let avg_collaborators = 2.0 * edges as f64 / n as f64;
        let network_density = if n > 1 {
            edges as f64 / (n as f64 * (n - 1) as f64 / 2.0)
        } else {
            0.0
        };
        let largest_component_size = largest_component(graph);

        Self {
            total_authors: n,
            total_collaborations: edges,
            avg_collaborators,
            network_density,
            largest_component_size,
            is_connected: largest_component_size == n,
        }
    }
}

/// Size of the largest connected component (BFS sweep)
fn largest_component(graph: &NetworkGraph) -> usize {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut largest = 0;

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut size = 0;
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            size += 1;
            for &(neighbor, _) in graph.neighbors(node) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        largest = largest.max(size);
    }

    largest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use scholarnet_common::models::{PaperAuthorRecord, PaperRecord};
    use uuid::Uuid;

    fn paper(n: u128, authors: &[u128]) -> PaperRecord {
        PaperRecord {
            id: Uuid::from_u128(n),
            year: None,
            citation_count: 0,
            authors: authors
                .iter()
                .enumerate()
                .map(|(i, &id)| {
                    PaperAuthorRecord::new(Uuid::from_u128(id), format!("author-{id}"), i as u32 + 1)
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_graph_reports_zeros() {
        let stats = NetworkStats::from_graph(&GraphBuilder::new().build());
        assert_eq!(stats, NetworkStats::empty());
    }

    #[test]
    fn test_complete_graph_density_is_one() {
        let mut builder = GraphBuilder::new();
        // One paper with four authors is a complete K4
        builder.ingest_paper(&paper(1, &[1, 2, 3, 4])).unwrap();
        let stats = NetworkStats::from_graph(&builder.build());

        assert_eq!(stats.total_authors, 4);
        assert_eq!(stats.total_collaborations, 6);
        assert_eq!(stats.network_density, 1.0);
        assert!(stats.is_connected);
        assert_eq!(stats.largest_component_size, 4);
    }

    #[test]
    fn test_edgeless_graph_density_is_zero() {
        let mut builder = GraphBuilder::new();
        for i in 1..=3u128 {
            builder.ingest_paper(&paper(i, &[i])).unwrap();
        }
        let stats = NetworkStats::from_graph(&builder.build());

        assert_eq!(stats.network_density, 0.0);
        assert_eq!(stats.avg_collaborators, 0.0);
        assert_eq!(stats.largest_component_size, 1);
        assert!(!stats.is_connected);
    }

    #[test]
    fn test_disconnected_components() {
        let mut builder = GraphBuilder::new();
        builder.ingest_paper(&paper(1, &[1, 2, 3])).unwrap();
        builder.ingest_paper(&paper(2, &[4, 5])).unwrap();
        let stats = NetworkStats::from_graph(&builder.build());

        assert_eq!(stats.total_authors, 5);
        assert_eq!(stats.largest_component_size, 3);
        assert!(!stats.is_connected);
    }

    #[test]
    fn test_mean_degree() {
        let mut builder = GraphBuilder::new();
        // Path 1-2-3: degrees 1, 2, 1
        builder.ingest_paper(&paper(1, &[1, 2])).unwrap();
        builder.ingest_paper(&paper(2, &[2, 3])).unwrap();
        let stats = NetworkStats::from_graph(&builder.build());

        assert!((stats.avg_collaborators - 4.0 / 3.0).abs() < 1e-12);
    }
}
