//! Research community detection
//!
//! Greedy modularity maximization in the Louvain shape: local moving
//! until no move improves modularity, then aggregation of communities
//! into a meta-graph, repeated until the gain dries up. Edge weights are
//! collaboration counts.
//!
//! Greedy modularity is visitation-order sensitive, so every loop here
//! runs in a fixed order: nodes in ascending-id arena order, candidate
//! communities in ascending label order, and moves only on strict gain.
//! The resulting labels are renumbered consecutively by first appearance;
//! they identify the partition of this run only and carry no meaning
//! across runs.

use crate::graph::NetworkGraph;
use scholarnet_common::config::CommunityConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Author id -> community label for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityAssignment {
    assignments: BTreeMap<Uuid, usize>,
}

impl CommunityAssignment {
    /// Community label for one author
    pub fn community_of(&self, author_id: &Uuid) -> Option<usize> {
        self.assignments.get(author_id).copied()
    }

    /// Iterate in ascending author id order
    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &usize)> {
        self.assignments.iter()
    }

    /// Number of assigned authors
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of distinct communities
    pub fn community_count(&self) -> usize {
        let mut labels: Vec<usize> = self.assignments.values().copied().collect();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }
}

/// Greedy modularity community detector
#[derive(Debug, Clone)]
pub struct CommunityDetector {
    max_iterations: usize,
    max_levels: usize,
    min_modularity_gain: f64,
    resolution: f64,
}

impl Default for CommunityDetector {
    fn default() -> Self {
        Self::from_config(&CommunityConfig::default())
    }
}

impl CommunityDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CommunityConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            max_levels: config.max_levels,
            min_modularity_gain: config.min_modularity_gain,
            resolution: config.resolution,
        }
    }

    /// Partition the graph; every author lands in exactly one community
    ///
    /// Authors with no edges become singletons. Graphs with fewer than
    /// two nodes return the trivial partition.
    pub fn detect(&self, graph: &NetworkGraph) -> CommunityAssignment {
        let n = graph.node_count();
        if n == 0 {
            return CommunityAssignment::default();
        }

        let partition = if graph.edge_count() == 0 || n == 1 {
            (0..n).collect()
        } else {
            self.partition_weighted(graph)
        };

        let labels = renumber(&partition);
        let assignments = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, labels[idx]))
            .collect();
        CommunityAssignment { assignments }
    }

    fn partition_weighted(&self, graph: &NetworkGraph) -> Vec<usize> {
        let n = graph.node_count();
        let mut current_n = n;
        let mut current_edges: Vec<(usize, usize, f64)> = graph
            .edges()
            .iter()
            .map(|edge| (edge.a, edge.b, f64::from(edge.weight())))
            .collect();
        let mut current_self_loops = vec![0.0_f64; n];

        // Stack of community->members mappings for expanding the final
        // partition back to original nodes
        let mut mapping_stack: Vec<Vec<Vec<usize>>> = Vec::new();
        let mut prev_modularity = f64::NEG_INFINITY;

        for _level in 0..self.max_levels {
            let (partition, improved) =
                self.local_moving(current_n, &current_edges, &current_self_loops);
            if !improved {
                break;
            }

            let modularity_now = self.modularity(
                current_n,
                &current_edges,
                &current_self_loops,
                &partition,
            );
            if modularity_now - prev_modularity < self.min_modularity_gain {
                break;
            }
            prev_modularity = modularity_now;

            let (new_edges, new_self_loops, node_mapping) =
                aggregate(&current_edges, &current_self_loops, &partition);
            if node_mapping.len() == current_n {
                break;
            }

            current_n = node_mapping.len();
            current_edges = new_edges;
            current_self_loops = new_self_loops;
            mapping_stack.push(node_mapping);
        }

        // Expand through all aggregation levels
        let mut result: Vec<usize> = (0..current_n).collect();
        while let Some(mapping) = mapping_stack.pop() {
            result = expand_partition(&result, &mapping);
        }
        result.resize(n, 0);
        result
    }

    /// Phase 1: move nodes to the neighboring community with the highest
    /// strictly positive modularity gain, in ascending node order
    fn local_moving(
        &self,
        n: usize,
        edges: &[(usize, usize, f64)],
        self_loops: &[f64],
    ) -> (Vec<usize>, bool) {
        let mut adjacency: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
        for &(i, j, w) in edges {
            *adjacency[i].entry(j).or_insert(0.0) += w;
            *adjacency[j].entry(i).or_insert(0.0) += w;
        }

        let m: f64 = edges.iter().map(|&(_, _, w)| w).sum::<f64>() + self_loops.iter().sum::<f64>();
        if m == 0.0 {
            return ((0..n).collect(), false);
        }

        let mut degrees = vec![0.0_f64; n];
        for &(i, j, w) in edges {
            degrees[i] += w;
            degrees[j] += w;
        }
        for (i, &sl) in self_loops.iter().enumerate() {
            // Self-loops count twice toward weighted degree
            degrees[i] += 2.0 * sl;
        }

        let mut communities: Vec<usize> = (0..n).collect();
        let mut community_degrees = degrees.clone();
        let mut any_improved = false;

        for _iter in 0..self.max_iterations {
            let mut improved = false;

            for node in 0..n {
                let current = communities[node];
                let ki = degrees[node];

                community_degrees[current] -= ki;

                // Weight of this node's links into each neighboring
                // community; BTreeMap keeps the candidate order fixed
                let mut link_weights: BTreeMap<usize, f64> = BTreeMap::new();
                for (&neighbor, &w) in &adjacency[node] {
                    *link_weights.entry(communities[neighbor]).or_insert(0.0) += w;
                }

                let mut best_community = current;
                let mut best_gain = 0.0;
                for (&candidate, &ki_in) in &link_weights {
                    let sigma_tot = community_degrees[candidate];
                    let gain =
                        ki_in / m - self.resolution * sigma_tot * ki / (2.0 * m * m);
                    if gain > best_gain {
                        best_gain = gain;
                        best_community = candidate;
                    }
                }

                community_degrees[best_community] += ki;
                if best_community != current {
                    communities[node] = best_community;
                    improved = true;
                    any_improved = true;
                }
            }

            if !improved {
                break;
            }
        }

        (communities, any_improved)
    }

    /// Modularity of a weighted partition
    fn modularity(
        &self,
        n: usize,
        edges: &[(usize, usize, f64)],
        self_loops: &[f64],
        communities: &[usize],
    ) -> f64 {
        let m: f64 = edges.iter().map(|&(_, _, w)| w).sum::<f64>() + self_loops.iter().sum::<f64>();
        if m == 0.0 {
            return 0.0;
        }

        let mut degrees = vec![0.0_f64; n];
        for &(i, j, w) in edges {
            degrees[i] += w;
            degrees[j] += w;
        }
        for (i, &sl) in self_loops.iter().enumerate() {
            degrees[i] += 2.0 * sl;
        }

        let mut q = 0.0;
        for &(i, j, w) in edges {
            if communities[i] == communities[j] {
                let expected = degrees[i] * degrees[j] / (2.0 * m);
                q += w - self.resolution * expected;
            }
        }
        for (i, &sl) in self_loops.iter().enumerate() {
            if sl > 0.0 {
                let expected = degrees[i] * degrees[i] / (2.0 * m);
                q += sl - self.resolution * expected / 2.0;
            }
        }

        q / m
    }
}

/// Phase 2: collapse each community into a meta-node
///
/// Returns the meta edge list, meta self-loops (internal community
/// weight), and for each meta-node the original nodes it absorbed.
fn aggregate(
    edges: &[(usize, usize, f64)],
    self_loops: &[f64],
    communities: &[usize],
) -> (Vec<(usize, usize, f64)>, Vec<f64>, Vec<Vec<usize>>) {
    let mut unique: Vec<usize> = communities.to_vec();
    unique.sort_unstable();
    unique.dedup();
    let meta_count = unique.len();

    let relabel: BTreeMap<usize, usize> =
        unique.iter().enumerate().map(|(i, &c)| (c, i)).collect();

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); meta_count];
    for (node, &community) in communities.iter().enumerate() {
        members[relabel[&community]].push(node);
    }

    let mut meta_weights: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    let mut meta_self_loops = vec![0.0_f64; meta_count];
    for &(i, j, w) in edges {
        let ci = relabel[&communities[i]];
        let cj = relabel[&communities[j]];
        if ci == cj {
            meta_self_loops[ci] += w;
        } else {
            let key = if ci < cj { (ci, cj) } else { (cj, ci) };
            *meta_weights.entry(key).or_insert(0.0) += w;
        }
    }
    for (i, &sl) in self_loops.iter().enumerate() {
        meta_self_loops[relabel[&communities[i]]] += sl;
    }

    let meta_edges = meta_weights
        .into_iter()
        .map(|((i, j), w)| (i, j, w))
        .collect();

    (meta_edges, meta_self_loops, members)
}

/// Push a meta-level partition back down to the nodes it aggregated
fn expand_partition(partition: &[usize], members: &[Vec<usize>]) -> Vec<usize> {
    let total: usize = members.iter().map(|m| m.len()).sum();
    let mut result = vec![0; total];
    for (meta_node, originals) in members.iter().enumerate() {
        for &original in originals {
            result[original] = partition[meta_node];
        }
    }
    result
}

/// Renumber labels consecutively by first appearance in arena order
fn renumber(partition: &[usize]) -> Vec<usize> {
    let mut next_label = 0;
    let mut relabel: BTreeMap<usize, usize> = BTreeMap::new();
    partition
        .iter()
        .map(|&community| {
            *relabel.entry(community).or_insert_with(|| {
                let label = next_label;
                next_label += 1;
                label
            })
        })
        .collect()
}
