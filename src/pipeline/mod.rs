//! Ingest, update and query pipelines.
//!
//! A [`Pipeline`] owns its collaborators explicitly: a [`ContentFetcher`] for the
//! code host, a [`ContentCache`] on local disk and a [`GraphClient`] for the
//! graph store. Each call runs its steps one after another and opens its own
//! graph connection, released before the call returns.
//!
//! Calls for the same document are not serialized. Two concurrent updates race
//! on the cache (last write wins) and on episode order (the store resolves it by
//! reference time).
//!
//! Fetch, cache write and episode submission are not one transaction. A crash
//! or failure between submission and cache write leaves the cache one version
//! behind the graph; the next update then diffs against that older text and
//! still submits the full new document, so the graph converges regardless.

mod ingest;
mod query;
mod update;

pub use query::{CommunityView, EpisodeView, FactView, NodeView, QueryParams, QueryResult};

use crate::cache::ContentCache;
use crate::config::Config;
use crate::diff::SectionDiff;
use crate::fetch::{ContentFetcher, GithubFetcher};
use crate::graph::{Episode, EpisodeSource, GraphClient, HttpGraphClient};
use crate::identity::DocumentIdentity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// `top_k` used when a query does not give one
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

/// Outcome of a successful ingest or update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub status: Status,
    pub repository: String,
    pub file: String,
    /// Set by ingest (including an update that fell back to ingest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    pub timestamp: String,
    /// Section diff against the cached version; informational, never serialized
    #[serde(skip)]
    pub changes: Option<SectionDiff>,
}

impl Summary {
    fn success(
        identity: &DocumentIdentity,
        content_length: Option<usize>,
        reference_time: DateTime<Utc>,
    ) -> Self {
        Self {
            status: Status::Success,
            repository: identity.repo.clone(),
            file: identity.path.clone(),
            content_length,
            timestamp: reference_time.to_rfc3339(),
            changes: None,
        }
    }
}

pub struct Pipeline {
    fetcher: Arc<dyn ContentFetcher>,
    cache: ContentCache,
    graph: Arc<dyn GraphClient>,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        cache: ContentCache,
        graph: Arc<dyn GraphClient>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            graph,
        }
    }

    /// Wire the GitHub fetcher, the on-disk cache and the HTTP graph client from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let credentials = config.credentials()?;

        let fetcher = GithubFetcher::new(&config.github.api_url, credentials.github_token.clone())?;
        let graph = HttpGraphClient::from_credentials(&credentials)?;

        Ok(Self::new(
            Arc::new(fetcher),
            ContentCache::new(config.cache_dir()),
            Arc::new(graph),
        ))
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }
}

/// Episode carrying a full document, named after its path
fn document_episode(
    identity: &DocumentIdentity,
    body: String,
    source_description: String,
    reference_time: DateTime<Utc>,
) -> Episode {
    Episode {
        name: identity.path.clone(),
        episode_body: body,
        source: EpisodeSource::Text,
        source_description,
        reference_time,
        group_id: identity.group_id(),
    }
}
