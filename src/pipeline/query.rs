use super::{Pipeline, DEFAULT_TOP_K};
use crate::error::{CodecoachError, Result};
use crate::graph::{self, SearchRequest, SearchResults};
use crate::identity::group_id_for;
use serde::Serialize;
use serde_json::Value;

/// Validated query input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub group_id: String,
    pub query: String,
    pub top_k: usize,
}

impl QueryParams {
    /// Validate a `{repo, query, top_k?}` request body.
    ///
    /// `repo` must be a non-empty string and becomes the group id. `query` must be
    /// present: strings are trimmed, any other JSON value is used as its JSON
    /// text. `top_k` is a positive integer (or a string holding one), default 5.
    pub fn from_json(body: &Value) -> Result<Self> {
        let body = body.as_object().ok_or_else(|| {
            CodecoachError::Validation("Request body must be a JSON object".to_string())
        })?;

        let repo = match body.get("repo") {
            Some(Value::String(repo)) if !repo.is_empty() => repo,
            _ => {
                return Err(CodecoachError::Validation(
                    "'repo' is required and must be a string".to_string(),
                ))
            }
        };

        let query = match body.get("query") {
            None | Some(Value::Null) => {
                return Err(CodecoachError::Validation("'query' is required".to_string()))
            }
            Some(Value::String(text)) => text.trim().to_string(),
            Some(other) => other.to_string(),
        };

        let top_k = match body.get("top_k") {
            None | Some(Value::Null) => DEFAULT_TOP_K,
            Some(value) => parse_top_k(value)?,
        };

        Ok(Self {
            group_id: group_id_for(repo),
            query,
            top_k,
        })
    }
}

fn parse_top_k(value: &Value) -> Result<usize> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .filter(|k| *k > 0)
        .and_then(|k| usize::try_from(k).ok())
        .ok_or_else(|| {
            CodecoachError::Validation("'top_k' must be a positive integer".to_string())
        })
}

/// Flattened search result for JSON transport
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub nodes: Vec<NodeView>,
    pub facts: Vec<FactView>,
    pub episodes: Vec<EpisodeView>,
    pub communities: Vec<CommunityView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactView {
    pub id: String,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeView {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityView {
    pub id: String,
    pub name: String,
}

impl From<SearchResults> for QueryResult {
    fn from(results: SearchResults) -> Self {
        Self {
            nodes: results
                .nodes
                .into_iter()
                .map(|n| NodeView {
                    id: n.uuid,
                    summary: n.summary,
                })
                .collect(),
            facts: results
                .edges
                .into_iter()
                .map(|e| FactView {
                    id: e.uuid,
                    subject: e.source_node_uuid,
                    predicate: e.predicate,
                    object: e.target_node_uuid,
                    score: e.score,
                })
                .collect(),
            episodes: results
                .episodes
                .into_iter()
                .map(|ep| EpisodeView {
                    id: ep.uuid,
                    content: ep.content,
                })
                .collect(),
            communities: results
                .communities
                .into_iter()
                .map(|c| CommunityView {
                    id: c.uuid,
                    name: c.name,
                })
                .collect(),
        }
    }
}

impl Pipeline {
    /// Hybrid search restricted to one group.
    ///
    /// Invalid input fails with `Validation` before any connection is opened.
    pub async fn query(&self, group_id: &str, query_text: &str, top_k: usize) -> Result<QueryResult> {
        if group_id.is_empty() {
            return Err(CodecoachError::Validation(
                "group id must not be empty".to_string(),
            ));
        }
        if top_k == 0 {
            return Err(CodecoachError::Validation(
                "'top_k' must be a positive integer".to_string(),
            ));
        }

        let request = SearchRequest::hybrid(query_text, group_id, top_k);

        let results = graph::with_session(self.graph.as_ref(), move |session| {
            Box::pin(async move { session.search(&request).await })
        })
        .await;

        match results {
            Ok(results) => Ok(QueryResult::from(results)),
            Err(e) => {
                log::error!("Error running query for {} : {}: {}", group_id, query_text, e);
                Err(e)
            }
        }
    }

    pub async fn run_query(&self, params: &QueryParams) -> Result<QueryResult> {
        self.query(&params.group_id, &params.query, params.top_k).await
    }
}
