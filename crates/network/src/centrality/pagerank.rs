//! PageRank over the weighted coauthorship graph
//!
//! Damped power iteration where a node spreads its score to neighbors in
//! proportion to edge weight. Scores form a probability distribution
//! (they sum to 1); authors with no collaborators donate their mass to
//! everyone uniformly.

use crate::graph::NetworkGraph;

/// PageRank configuration
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (typically 0.85)
    pub damping: f64,

    /// Maximum iterations
    pub max_iterations: usize,

    /// Convergence threshold on the largest per-node change
    pub epsilon: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            epsilon: 1e-6,
        }
    }
}

/// Compute PageRank scores for every node, in arena order
pub(crate) fn pagerank(graph: &NetworkGraph, config: &PageRankConfig) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let n_f64 = n as f64;
    let teleport = (1.0 - config.damping) / n_f64;

    // Total collaboration weight incident to each node
    let strength: Vec<f64> = (0..n)
        .map(|node| {
            graph
                .neighbors(node)
                .iter()
                .map(|&(_, edge_idx)| f64::from(graph.edge(edge_idx).weight()))
                .sum()
        })
        .collect();

    let mut scores = vec![1.0 / n_f64; n];

    for _ in 0..config.max_iterations {
        let dangling: f64 = (0..n)
            .filter(|&node| strength[node] == 0.0)
            .map(|node| scores[node])
            .sum();
        let base = teleport + config.damping * dangling / n_f64;

        let mut next = vec![base; n];
        for node in 0..n {
            if strength[node] == 0.0 {
                continue;
            }
            let share = config.damping * scores[node] / strength[node];
            for &(neighbor, edge_idx) in graph.neighbors(node) {
                next[neighbor] += share * f64::from(graph.edge(edge_idx).weight());
            }
        }

        let max_diff = scores
            .iter()
            .zip(&next)
            .map(|(old, new)| (new - old).abs())
            .fold(0.0_f64, f64::max);

        scores = next;

        if max_diff < config.epsilon {
            break;
        }
    }

    scores
}
