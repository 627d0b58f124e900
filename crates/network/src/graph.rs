//! Coauthorship graph construction
//!
//! Provides the in-memory weighted undirected graph for one analysis run.
//! `GraphBuilder` accumulates validated paper records; `build` seals them
//! into a `NetworkGraph` snapshot whose node arena is sorted by author id,
//! so dense-index iteration order is deterministic regardless of the order
//! papers arrived in.

use scholarnet_common::errors::{AppError, Result};
use scholarnet_common::models::{canonical_pair, PaperRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;
use validator::Validate;

/// Author vertex with aggregate publication attributes
///
/// The collaborator set is derived from graph edges, never stored here.
#[derive(Debug, Clone)]
pub struct AuthorNode {
    pub id: Uuid,

    pub name: String,

    /// Distinct papers this author appears on within the analyzed scope
    pub papers: BTreeSet<Uuid>,

    pub citation_sum: i64,

    pub first_author_count: u32,

    pub corresponding_count: u32,

    pub first_publication_year: Option<i32>,

    pub last_publication_year: Option<i32>,
}

impl AuthorNode {
    fn new(id: Uuid, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            papers: BTreeSet::new(),
            citation_sum: 0,
            first_author_count: 0,
            corresponding_count: 0,
            first_publication_year: None,
            last_publication_year: None,
        }
    }

    /// Distinct papers within the analyzed scope
    pub fn paper_count(&self) -> usize {
        self.papers.len()
    }

    fn touch_year(&mut self, year: Option<i32>) {
        if let Some(y) = year {
            self.first_publication_year = Some(match self.first_publication_year {
                Some(first) => first.min(y),
                None => y,
            });
            self.last_publication_year = Some(match self.last_publication_year {
                Some(last) => last.max(y),
                None => y,
            });
        }
    }
}

/// Collaboration edge between two authors
///
/// Endpoints are arena indices with `a < b`; since the arena is sorted by
/// author id, this is also the canonical ascending-id orientation.
#[derive(Debug, Clone)]
pub struct CollaborationEdge {
    pub a: usize,

    pub b: usize,

    /// Papers backing this edge
    pub papers: BTreeSet<Uuid>,

    /// Earliest year among backing papers that carry one
    pub first_year: Option<i32>,

    /// Latest year among backing papers that carry one
    pub last_year: Option<i32>,
}

impl CollaborationEdge {
    /// Distinct papers co-authored by the pair; an edge exists iff this is >= 1
    pub fn weight(&self) -> u32 {
        self.papers.len() as u32
    }
}

/// Accumulates paper records into a coauthorship graph
#[derive(Debug, Default)]
pub struct GraphBuilder {
    authors: HashMap<Uuid, AuthorNode>,
    edges: HashMap<(Uuid, Uuid), BTreeSet<Uuid>>,
    /// Paper id -> publication year for every ingested paper
    papers: HashMap<Uuid, Option<i32>>,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of papers ingested so far
    pub fn paper_count(&self) -> usize {
        self.papers.len()
    }

    /// Fold one paper into the graph
    ///
    /// Fails fast on malformed input; a paper is either counted in full or
    /// not at all. Re-ingesting an already-seen paper id is a no-op, so
    /// edge weights count distinct papers.
    pub fn ingest_paper(&mut self, record: &PaperRecord) -> Result<()> {
        record.validate().map_err(AppError::from)?;

        for author in &record.authors {
            if author.author_id.is_nil() {
                return Err(AppError::MissingField {
                    field: "author_id".to_string(),
                });
            }
        }

        if self.papers.contains_key(&record.id) {
            tracing::debug!(paper_id = %record.id, "paper already ingested, skipping");
            return Ok(());
        }
        self.papers.insert(record.id, record.year);

        // Duplicate byline rows for the same author would fabricate
        // self-collaborations; keep the first occurrence only.
        let mut distinct = Vec::with_capacity(record.authors.len());
        let mut seen = BTreeSet::new();
        for author in &record.authors {
            if seen.insert(author.author_id) {
                distinct.push(author);
            }
        }

        for author in &distinct {
            let node = self
                .authors
                .entry(author.author_id)
                .or_insert_with(|| AuthorNode::new(author.author_id, &author.name));
            node.papers.insert(record.id);
            node.citation_sum += record.citation_count;
            if author.position == 1 {
                node.first_author_count += 1;
            }
            if author.is_corresponding {
                node.corresponding_count += 1;
            }
            node.touch_year(record.year);
        }

        // Every unordered pair of distinct coauthors shares this paper
        for i in 0..distinct.len() {
            for j in (i + 1)..distinct.len() {
                let pair = canonical_pair(distinct[i].author_id, distinct[j].author_id);
                self.edges.entry(pair).or_default().insert(record.id);
            }
        }

        Ok(())
    }

    /// Seal the accumulated papers into an immutable snapshot
    pub fn build(self) -> NetworkGraph {
        let mut nodes: Vec<AuthorNode> = self.authors.into_values().collect();
        nodes.sort_by(|x, y| x.id.cmp(&y.id));

        let index: HashMap<Uuid, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id, idx))
            .collect();

        let mut pairs: Vec<((Uuid, Uuid), BTreeSet<Uuid>)> = self.edges.into_iter().collect();
        pairs.sort_by(|x, y| x.0.cmp(&y.0));

        let mut edges = Vec::with_capacity(pairs.len());
        let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); nodes.len()];
        for ((id1, id2), papers) in pairs {
            let a = index[&id1];
            let b = index[&id2];

            let mut first_year = None;
            let mut last_year = None;
            for paper_id in &papers {
                if let Some(year) = self.papers.get(paper_id).copied().flatten() {
                    first_year = Some(first_year.map_or(year, |f: i32| f.min(year)));
                    last_year = Some(last_year.map_or(year, |l: i32| l.max(year)));
                }
            }

            let edge_idx = edges.len();
            edges.push(CollaborationEdge {
                a,
                b,
                papers,
                first_year,
                last_year,
            });
            adjacency[a].push((b, edge_idx));
            adjacency[b].push((a, edge_idx));
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }

        NetworkGraph {
            nodes,
            index,
            edges,
            adjacency,
            paper_years: self.papers,
        }
    }
}

/// Sealed coauthorship graph for one analysis run
///
/// Arena index order equals ascending author id order.
#[derive(Debug)]
pub struct NetworkGraph {
    nodes: Vec<AuthorNode>,
    index: HashMap<Uuid, usize>,
    edges: Vec<CollaborationEdge>,
    adjacency: Vec<Vec<(usize, usize)>>,
    paper_years: HashMap<Uuid, Option<i32>>,
}

impl NetworkGraph {
    /// Total authors
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total collaboration edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ascending author id order
    pub fn nodes(&self) -> &[AuthorNode] {
        &self.nodes
    }

    /// Edges in canonical (ascending id pair) order
    pub fn edges(&self) -> &[CollaborationEdge] {
        &self.edges
    }

    pub fn node(&self, idx: usize) -> &AuthorNode {
        &self.nodes[idx]
    }

    pub fn edge(&self, idx: usize) -> &CollaborationEdge {
        &self.edges[idx]
    }

    /// Arena index for an author id
    pub fn index_of(&self, id: &Uuid) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// `(neighbor_index, edge_index)` pairs in ascending neighbor order
    pub fn neighbors(&self, idx: usize) -> &[(usize, usize)] {
        &self.adjacency[idx]
    }

    /// Distinct collaborators of a node
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    /// Publication year of an ingested paper, if it carried one
    pub fn paper_year(&self, paper_id: &Uuid) -> Option<i32> {
        self.paper_years.get(paper_id).copied().flatten()
    }

    /// An author's collaborators, strongest ties first
    pub fn collaborations_of(&self, author_id: &Uuid) -> Vec<CollaborationSummary> {
        let Some(idx) = self.index_of(author_id) else {
            return Vec::new();
        };
        let mut summaries: Vec<CollaborationSummary> = self
            .neighbors(idx)
            .iter()
            .map(|&(neighbor, edge_idx)| {
                let edge = self.edge(edge_idx);
                let node = self.node(neighbor);
                CollaborationSummary {
                    collaborator_id: node.id,
                    collaborator_name: node.name.clone(),
                    collaboration_count: edge.weight(),
                    shared_papers: edge.papers.iter().copied().collect(),
                }
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.collaboration_count
                .cmp(&a.collaboration_count)
                .then_with(|| a.collaborator_id.cmp(&b.collaborator_id))
        });
        summaries
    }
}

/// One collaborator of an author, as shown on author detail views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationSummary {
    pub collaborator_id: Uuid,

    pub collaborator_name: String,

    pub collaboration_count: u32,

    pub shared_papers: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarnet_common::models::PaperAuthorRecord;

    fn author(n: u128, name: &str, position: u32) -> PaperAuthorRecord {
        PaperAuthorRecord::new(Uuid::from_u128(n), name, position)
    }

    fn paper(n: u128, year: Option<i32>, authors: Vec<PaperAuthorRecord>) -> PaperRecord {
        PaperRecord {
            id: Uuid::from_u128(n),
            year,
            citation_count: 0,
            authors,
        }
    }

    #[test]
    fn test_three_author_paper_yields_three_edges() {
        let mut builder = GraphBuilder::new();
        builder
            .ingest_paper(&paper(
                1,
                Some(2020),
                vec![author(1, "A", 1), author(2, "B", 2), author(3, "C", 3)],
            ))
            .unwrap();
        let graph = builder.build();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        for edge in graph.edges() {
            assert_eq!(edge.weight(), 1);
        }
        // Position 1 marked exactly one first author
        let first_authors: u32 = graph.nodes().iter().map(|n| n.first_author_count).sum();
        assert_eq!(first_authors, 1);
    }

    #[test]
    fn test_edge_weight_counts_distinct_papers() {
        let mut builder = GraphBuilder::new();
        builder
            .ingest_paper(&paper(1, Some(2019), vec![author(1, "A", 1), author(2, "B", 2)]))
            .unwrap();
        builder
            .ingest_paper(&paper(2, Some(2020), vec![author(1, "A", 1), author(2, "B", 2)]))
            .unwrap();
        builder
            .ingest_paper(&paper(3, Some(2021), vec![author(1, "A", 1), author(3, "C", 2)]))
            .unwrap();
        let graph = builder.build();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let ab = &graph.edges()[0];
        assert_eq!(graph.node(ab.a).id, Uuid::from_u128(1));
        assert_eq!(graph.node(ab.b).id, Uuid::from_u128(2));
        assert_eq!(ab.weight(), 2);
        assert_eq!(ab.first_year, Some(2019));
        assert_eq!(ab.last_year, Some(2020));

        let ac = &graph.edges()[1];
        assert_eq!(ac.weight(), 1);
        assert_eq!(ac.first_year, Some(2021));
        assert_eq!(ac.last_year, Some(2021));
    }

    #[test]
    fn test_single_author_paper_adds_no_edges() {
        let mut builder = GraphBuilder::new();
        builder
            .ingest_paper(&paper(1, None, vec![author(1, "A", 1)]))
            .unwrap();
        let graph = builder.build();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree(0), 0);
    }

    #[test]
    fn test_duplicate_byline_rows_do_not_self_collaborate() {
        let mut builder = GraphBuilder::new();
        builder
            .ingest_paper(&paper(
                1,
                Some(2022),
                vec![author(1, "A", 1), author(1, "A", 3), author(2, "B", 2)],
            ))
            .unwrap();
        let graph = builder.build();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let a = &graph.nodes()[graph.index_of(&Uuid::from_u128(1)).unwrap()];
        // First occurrence wins: counted once, at position 1
        assert_eq!(a.paper_count(), 1);
        assert_eq!(a.first_author_count, 1);
    }

    #[test]
    fn test_reingesting_same_paper_is_a_noop() {
        let record = paper(1, Some(2020), vec![author(1, "A", 1), author(2, "B", 2)]);
        let mut builder = GraphBuilder::new();
        builder.ingest_paper(&record).unwrap();
        builder.ingest_paper(&record).unwrap();
        let graph = builder.build();

        assert_eq!(graph.edges()[0].weight(), 1);
        assert_eq!(graph.nodes()[0].paper_count(), 1);
    }

    #[test]
    fn test_nil_author_id_fails_fast() {
        let mut builder = GraphBuilder::new();
        let record = paper(
            1,
            None,
            vec![author(1, "A", 1), PaperAuthorRecord::new(Uuid::nil(), "B", 2)],
        );
        let err = builder.ingest_paper(&record).unwrap_err();
        assert!(matches!(err, AppError::MissingField { .. }));
        // The paper must not be partially counted
        assert_eq!(builder.paper_count(), 0);
    }

    #[test]
    fn test_negative_citation_count_rejected() {
        let mut builder = GraphBuilder::new();
        let mut record = paper(1, None, vec![author(1, "A", 1)]);
        record.citation_count = -5;
        let err = builder.ingest_paper(&record).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_arena_sorted_by_author_id() {
        let mut builder = GraphBuilder::new();
        builder
            .ingest_paper(&paper(1, None, vec![author(9, "Z", 1), author(3, "M", 2)]))
            .unwrap();
        builder
            .ingest_paper(&paper(2, None, vec![author(5, "Q", 1)]))
            .unwrap();
        let graph = builder.build();

        let ids: Vec<Uuid> = graph.nodes().iter().map(|n| n.id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(3), Uuid::from_u128(5), Uuid::from_u128(9)]
        );
    }

    #[test]
    fn test_collaborations_of_sorted_by_strength() {
        let mut builder = GraphBuilder::new();
        builder
            .ingest_paper(&paper(1, Some(2019), vec![author(1, "A", 1), author(2, "B", 2)]))
            .unwrap();
        builder
            .ingest_paper(&paper(2, Some(2020), vec![author(1, "A", 1), author(2, "B", 2)]))
            .unwrap();
        builder
            .ingest_paper(&paper(3, Some(2021), vec![author(1, "A", 1), author(3, "C", 2)]))
            .unwrap();
        let graph = builder.build();

        let collabs = graph.collaborations_of(&Uuid::from_u128(1));
        assert_eq!(collabs.len(), 2);
        assert_eq!(collabs[0].collaborator_name, "B");
        assert_eq!(collabs[0].collaboration_count, 2);
        assert_eq!(collabs[1].collaboration_count, 1);

        assert!(graph.collaborations_of(&Uuid::from_u128(42)).is_empty());
    }

    #[test]
    fn test_publication_year_range() {
        let mut builder = GraphBuilder::new();
        builder
            .ingest_paper(&paper(1, Some(2018), vec![author(1, "A", 1)]))
            .unwrap();
        builder
            .ingest_paper(&paper(2, None, vec![author(1, "A", 1)]))
            .unwrap();
        builder
            .ingest_paper(&paper(3, Some(2023), vec![author(1, "A", 2)]))
            .unwrap();
        let graph = builder.build();

        let a = graph.node(0);
        assert_eq!(a.first_publication_year, Some(2018));
        assert_eq!(a.last_publication_year, Some(2023));
        assert_eq!(a.paper_count(), 3);
        assert_eq!(a.first_author_count, 2);
    }
}
