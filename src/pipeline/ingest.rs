use super::{document_episode, Pipeline, Summary};
use crate::error::Result;
use crate::graph;
use crate::identity::DocumentIdentity;
use chrono::Utc;

impl Pipeline {
    /// First-time ingestion of a document.
    ///
    /// Fetch → cache write → index setup → one episode with the full text.
    /// Fetch and cache failures propagate unchanged; graph failures are logged
    /// and propagated. The graph connection is closed on every path.
    pub async fn ingest(&self, identity: &DocumentIdentity) -> Result<Summary> {
        identity.validate()?;
        log::info!("Starting ingestion for {}", identity);

        let content = self.fetcher.fetch(identity).await?;
        self.cache.save(identity, &content)?;

        let content_length = content.chars().count();
        let reference_time = Utc::now();
        let episode = document_episode(
            identity,
            content,
            format!("CodeCoach documentation from {}", identity.repo),
            reference_time,
        );

        let submitted = graph::with_session(self.graph.as_ref(), move |session| {
            Box::pin(async move {
                log::info!("Building indices and constraints");
                session.build_indices_and_constraints().await?;

                log::info!("Adding episode for {}", episode.name);
                session.add_episode(&episode).await
            })
        })
        .await;

        if let Err(e) = submitted {
            log::error!("Error during ingestion of {}: {}", identity, e);
            return Err(e);
        }

        log::info!("Successfully ingested {} into the graph", identity);
        Ok(Summary::success(identity, Some(content_length), reference_time))
    }
}
