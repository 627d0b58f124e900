//! Weighted single-source shortest paths
//!
//! Dijkstra over collaboration edges with traversal cost `1 / weight`, so
//! frequent collaborators are structurally closer. The forward pass also
//! collects path counts and predecessor lists (Brandes' sigma/preds),
//! which betweenness consumes; closeness only reads the distances.

use crate::graph::NetworkGraph;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Tolerance for treating two path costs as equal
const COST_EPS: f64 = 1e-9;

/// Shortest-path data from one source
pub(crate) struct ShortestPaths {
    /// Cost from the source; infinity when unreachable
    pub dist: Vec<f64>,

    /// Number of minimum-cost paths from the source
    pub sigma: Vec<f64>,

    /// Predecessors on minimum-cost paths
    pub predecessors: Vec<Vec<usize>>,

    /// Settled nodes in order of non-decreasing cost (source first)
    pub order: Vec<usize>,
}

/// Traversal cost of an edge
pub(crate) fn edge_cost(weight: u32) -> f64 {
    1.0 / f64::from(weight.max(1))
}

struct HeapEntry {
    cost: f64,
    node: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Reversed so BinaryHeap pops the cheapest entry; ties break on node
    // index to keep the settle order deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Run Dijkstra from `source` over the whole graph
pub(crate) fn shortest_paths(graph: &NetworkGraph, source: usize) -> ShortestPaths {
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut sigma = vec![0.0_f64; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);
    let mut settled = vec![false; n];

    dist[source] = 0.0;
    sigma[source] = 1.0;

    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        cost: 0.0,
        node: source,
    });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        order.push(node);

        for &(neighbor, edge_idx) in graph.neighbors(node) {
            if settled[neighbor] {
                continue;
            }
            let next = cost + edge_cost(graph.edge(edge_idx).weight());

            if next < dist[neighbor] - COST_EPS {
                dist[neighbor] = next;
                sigma[neighbor] = sigma[node];
                predecessors[neighbor].clear();
                predecessors[neighbor].push(node);
                heap.push(HeapEntry {
                    cost: next,
                    node: neighbor,
                });
            } else if (next - dist[neighbor]).abs() <= COST_EPS {
                sigma[neighbor] += sigma[node];
                predecessors[neighbor].push(node);
            }
        }
    }

    ShortestPaths {
        dist,
        sigma,
        predecessors,
        order,
    }
}
