//! Betweenness centrality over weighted shortest paths
//!
//! Brandes' algorithm: a shortest-path pass from every source, then a
//! backward dependency accumulation. Each unordered pair is visited from
//! both endpoints, so the raw sums are halved before the standard
//! undirected normalization `2 / ((N-1)(N-2))`. Pairs in different
//! components never settle in the same pass and contribute nothing.

use super::paths::shortest_paths;
use crate::graph::NetworkGraph;

/// Compute normalized betweenness for every node, in arena order
pub(crate) fn betweenness_centrality(graph: &NetworkGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut betweenness = vec![0.0_f64; n];
    if n < 3 {
        return betweenness;
    }

    for source in 0..n {
        let sp = shortest_paths(graph, source);

        // Backward pass: accumulate dependencies, farthest node first
        let mut delta = vec![0.0_f64; n];
        for &w in sp.order.iter().rev() {
            for &v in &sp.predecessors[w] {
                // delta_s(v) += (sigma_sv / sigma_sw) * (1 + delta_s(w))
                delta[v] += sp.sigma[v] / sp.sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                betweenness[w] += delta[w];
            }
        }
    }

    // Undirected: each pair counted from both endpoints
    let norm = 2.0 / ((n - 1) as f64 * (n - 2) as f64);
    for score in &mut betweenness {
        *score = *score / 2.0 * norm;
    }

    betweenness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use scholarnet_common::models::{PaperAuthorRecord, PaperRecord};
    use uuid::Uuid;

    fn pair_paper(n: u128, a: u128, b: u128) -> PaperRecord {
        PaperRecord {
            id: Uuid::from_u128(n),
            year: None,
            citation_count: 0,
            authors: vec![
                PaperAuthorRecord::new(Uuid::from_u128(a), "x", 1),
                PaperAuthorRecord::new(Uuid::from_u128(b), "y", 2),
            ],
        }
    }

    fn line_graph() -> NetworkGraph {
        // A - B - C
        let mut builder = GraphBuilder::new();
        builder.ingest_paper(&pair_paper(1, 1, 2)).unwrap();
        builder.ingest_paper(&pair_paper(2, 2, 3)).unwrap();
        builder.build()
    }

    #[test]
    fn test_middle_of_line_is_the_broker() {
        let graph = line_graph();
        let scores = betweenness_centrality(&graph);

        // B sits on the only A-C path; endpoints broker nothing.
        // Normalized over the single other pair, B scores exactly 1.
        assert_eq!(scores[0], 0.0);
        assert!((scores[1] - 1.0).abs() < 1e-9);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_small_graphs_all_zero() {
        let mut builder = GraphBuilder::new();
        builder.ingest_paper(&pair_paper(1, 1, 2)).unwrap();
        let graph = builder.build();

        assert_eq!(betweenness_centrality(&graph), vec![0.0, 0.0]);
    }

    #[test]
    fn test_weights_steer_paths() {
        // Path A-B, B-C plus a strong direct tie A-C (three papers).
        // Unweighted, B would broker the A-C pair; with traversal cost
        // 1/weight the direct tie costs 1/3 and B brokers nothing.
        let mut builder = GraphBuilder::new();
        builder.ingest_paper(&pair_paper(1, 1, 2)).unwrap();
        builder.ingest_paper(&pair_paper(2, 2, 3)).unwrap();
        builder.ingest_paper(&pair_paper(3, 1, 3)).unwrap();
        builder.ingest_paper(&pair_paper(4, 1, 3)).unwrap();
        builder.ingest_paper(&pair_paper(5, 1, 3)).unwrap();
        let graph = builder.build();

        let scores = betweenness_centrality(&graph);
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_disconnected_pairs_excluded() {
        // Path A-B-C plus an isolated pair D-E
        let mut builder = GraphBuilder::new();
        builder.ingest_paper(&pair_paper(1, 1, 2)).unwrap();
        builder.ingest_paper(&pair_paper(2, 2, 3)).unwrap();
        builder.ingest_paper(&pair_paper(3, 4, 5)).unwrap();
        let graph = builder.build();

        let scores = betweenness_centrality(&graph);
        // B still brokers exactly the A-C pair; cross-component pairs
        // add nothing anywhere.
        assert!(scores[1] > 0.0);
        assert_eq!(scores[3], 0.0);
        assert_eq!(scores[4], 0.0);
    }
}
