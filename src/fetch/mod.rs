//! Remote content fetching: the current text of a document on its code host.

mod github;

pub use github::GithubFetcher;

use crate::error::Result;
use crate::identity::DocumentIdentity;
use async_trait::async_trait;

/// Source of a document's current text.
///
/// Implementations make a single attempt per call; failures propagate
/// unchanged as `NotFound`, `Auth`, `Transient` or `Payload`.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, identity: &DocumentIdentity) -> Result<String>;
}
