use super::{document_episode, Pipeline, Summary};
use crate::diff::{diff_sections, section_title, SectionDiff};
use crate::error::Result;
use crate::graph;
use crate::identity::DocumentIdentity;
use chrono::Utc;

impl Pipeline {
    /// Submit the current text of an already ingested document.
    ///
    /// Without a cached previous version this is exactly [`Pipeline::ingest`].
    /// Otherwise the section diff against the cache is computed and logged,
    /// a new episode with the full new text is submitted, and the cache is
    /// overwritten. The diff does not change what is submitted.
    pub async fn update(&self, identity: &DocumentIdentity) -> Result<Summary> {
        identity.validate()?;
        log::info!("Starting update for {}", identity);

        let new_content = self.fetcher.fetch(identity).await?;

        let Some(old_content) = self.cache.load(identity)? else {
            log::warn!(
                "No cached content for {}. Performing full ingestion instead.",
                identity
            );
            return self.ingest(identity).await;
        };

        let changes = diff_sections(&old_content, &new_content);
        log_changes(identity, &changes);

        let reference_time = Utc::now();
        let episode = document_episode(
            identity,
            new_content.clone(),
            format!("Updated CodeCoach documentation from {}", identity.repo),
            reference_time,
        );

        let submitted = graph::with_session(self.graph.as_ref(), move |session| {
            Box::pin(async move { session.add_episode(&episode).await })
        })
        .await;

        let outcome = submitted.and_then(|()| self.cache.save(identity, &new_content));
        if let Err(e) = outcome {
            log::error!("Error during update of {}: {}", identity, e);
            return Err(e);
        }

        log::info!("Successfully updated {} in the graph", identity);
        let mut summary = Summary::success(identity, None, reference_time);
        summary.changes = Some(changes);
        Ok(summary)
    }
}

fn log_changes(identity: &DocumentIdentity, changes: &SectionDiff) {
    if changes.is_empty() {
        log::info!("No section changes in {}", identity);
        return;
    }

    log::info!(
        "Section changes in {}: {} added, {} removed",
        identity,
        changes.added.len(),
        changes.removed.len()
    );
    for section in &changes.removed {
        log::debug!("  - {}", section_title(section));
    }
    for section in &changes.added {
        log::debug!("  + {}", section_title(section));
    }
}
