//! Visualization payload
//!
//! Renders the snapshot as nodes and links for front-end graph views.
//! The base payload carries only graph-derived attributes; computed
//! metrics and community labels are attached through the explicit merge
//! methods when the caller wants them embedded.

use crate::community::CommunityAssignment;
use crate::graph::NetworkGraph;
use scholarnet_common::models::AuthorProfile;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One author node in the visualization payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: Uuid,

    pub name: String,

    pub paper_count: usize,

    pub citations: i64,

    pub first_author_count: u32,

    /// Distinct collaborators
    pub degree: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub influence_score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_key_person: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<usize>,
}

/// One collaboration link in the visualization payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLink {
    pub source: Uuid,

    pub target: Uuid,

    pub weight: u32,

    /// Papers backing the collaboration
    pub papers: Vec<Uuid>,
}

/// Nodes and links for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkExport {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<ExportLink>,
}

impl NetworkExport {
    /// Render the base payload: nodes in ascending id order, links in
    /// canonical pair order
    pub fn from_graph(graph: &NetworkGraph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| ExportNode {
                id: node.id,
                name: node.name.clone(),
                paper_count: node.paper_count(),
                citations: node.citation_sum,
                first_author_count: node.first_author_count,
                degree: graph.degree(idx),
                influence_score: None,
                is_key_person: None,
                community: None,
            })
            .collect();

        let links = graph
            .edges()
            .iter()
            .map(|edge| ExportLink {
                source: graph.node(edge.a).id,
                target: graph.node(edge.b).id,
                weight: edge.weight(),
                papers: edge.papers.iter().copied().collect(),
            })
            .collect();

        Self { nodes, links }
    }

    /// Attach influence and key-person flags from author profiles
    pub fn merge_profiles(&mut self, profiles: &[AuthorProfile]) -> &mut Self {
        for node in &mut self.nodes {
            if let Some(profile) = profiles.iter().find(|p| p.id == node.id) {
                node.influence_score = Some(profile.influence_score);
                node.is_key_person = Some(profile.is_key_person);
            }
        }
        self
    }

    /// Attach community labels
    pub fn merge_communities(&mut self, assignment: &CommunityAssignment) -> &mut Self {
        for node in &mut self.nodes {
            node.community = assignment.community_of(&node.id);
        }
        self
    }
}
