use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content carried by an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeSource {
    Text,
    Message,
    Json,
}

/// A named, timestamped blob of text submitted to the graph store.
///
/// Episodes are append-only: an update submits a new episode under the same
/// name and the store decides what it supersedes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub name: String,
    pub episode_body: String,
    pub source: EpisodeSource,
    pub source_description: String,
    pub reference_time: DateTime<Utc>,
    pub group_id: String,
}

/// Predefined search configuration understood by the graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchRecipe {
    /// Hybrid BM25 + embedding search over edges, nodes, episodes and
    /// communities, fused with reciprocal rank fusion
    CombinedHybridSearchRrf,
}

/// Search filters; the default restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub group_ids: Vec<String>,
    pub limit: usize,
    pub recipe: SearchRecipe,
    pub filters: SearchFilters,
}

impl SearchRequest {
    /// Combined hybrid search within one group, unrestricted filters
    pub fn hybrid(query: impl Into<String>, group_id: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            group_ids: vec![group_id.into()],
            limit,
            recipe: SearchRecipe::CombinedHybridSearchRrf,
            filters: SearchFilters::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityEdge {
    pub uuid: String,
    pub source_node_uuid: String,
    pub target_node_uuid: String,
    #[serde(default, alias = "name")]
    pub predicate: String,
    #[serde(default)]
    pub fact: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodicNode {
    pub uuid: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityNode {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
}

/// Raw search output of the graph store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub nodes: Vec<EntityNode>,
    #[serde(default)]
    pub edges: Vec<EntityEdge>,
    #[serde(default)]
    pub episodes: Vec<EpisodicNode>,
    #[serde(default)]
    pub communities: Vec<CommunityNode>,
}
