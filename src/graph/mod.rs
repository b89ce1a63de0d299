//! Knowledge graph store access.
//!
//! The graph store (storage, embedding, hybrid ranking) is an external service.
//! This module only defines the connection seam, the wire types, and the
//! scoped-session helper every pipeline goes through.

mod http;
mod types;

pub use http::HttpGraphClient;
pub use types::{
    CommunityNode, EntityEdge, EntityNode, Episode, EpisodeSource, EpisodicNode, SearchFilters,
    SearchRecipe, SearchRequest, SearchResults,
};

use crate::error::Result;
use async_trait::async_trait;
use futures_util::future::BoxFuture;

/// Opens graph store connections. Each pipeline invocation opens its own.
#[async_trait]
pub trait GraphClient: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn GraphSession>>;
}

/// One open connection to the graph store
#[async_trait]
pub trait GraphSession: Send {
    /// Create indices and constraints. Idempotent.
    async fn build_indices_and_constraints(&mut self) -> Result<()>;

    async fn add_episode(&mut self, episode: &Episode) -> Result<()>;

    async fn search(&mut self, request: &SearchRequest) -> Result<SearchResults>;

    /// Release the connection. Further calls on the session fail.
    async fn close(&mut self) -> Result<()>;
}

/// Run `work` on a fresh session and close it on every exit path.
///
/// The session is closed before the work's result is returned, whether the
/// work succeeded or failed. A failure to close is logged, never reported in
/// place of the work's own result.
pub async fn with_session<T, F>(client: &dyn GraphClient, work: F) -> Result<T>
where
    F: for<'s> FnOnce(&'s mut (dyn GraphSession + 'static)) -> BoxFuture<'s, Result<T>>,
{
    let mut session = client.connect().await?;

    let outcome = work(session.as_mut()).await;

    match session.close().await {
        Ok(()) => log::info!("Graph connection closed"),
        Err(e) => log::warn!("Failed to close graph connection: {}", e),
    }

    outcome
}
