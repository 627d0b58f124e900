//! Closeness centrality, Wasserman-Faust variant
//!
//! Restricted to each node's reachable component and scaled by the
//! component's share of the graph, so small components are not
//! artificially inflated. Distances are the same `1 / weight` costs the
//! betweenness pass uses.

use super::paths::shortest_paths;
use crate::graph::NetworkGraph;

/// Compute closeness for every node, in arena order
pub(crate) fn closeness_centrality(graph: &NetworkGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut closeness = vec![0.0_f64; n];
    if n < 2 {
        return closeness;
    }

    for source in 0..n {
        let sp = shortest_paths(graph, source);

        // Settled nodes are exactly the reachable component, source included
        let reachable = sp.order.len();
        if reachable < 2 {
            continue;
        }

        let total_cost: f64 = sp
            .order
            .iter()
            .filter(|&&node| node != source)
            .map(|&node| sp.dist[node])
            .sum();
        if total_cost <= 0.0 {
            continue;
        }

        let others = (reachable - 1) as f64;
        closeness[source] = (others / total_cost) * (others / (n - 1) as f64);
    }

    closeness
}
