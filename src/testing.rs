//! In-memory test doubles for the fetcher and graph store seams.

use crate::error::{CodecoachError, Result};
use crate::fetch::ContentFetcher;
use crate::graph::{Episode, GraphClient, GraphSession, SearchRequest, SearchResults};
use crate::identity::DocumentIdentity;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fetcher serving whatever content the test last set for an identity.
/// Unknown identities fail with `NotFound`.
#[derive(Default)]
pub struct ScriptedFetcher {
    files: Mutex<HashMap<DocumentIdentity, String>>,
    fetches: Mutex<usize>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, identity: &DocumentIdentity, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(identity.clone(), content.to_string());
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl ContentFetcher for ScriptedFetcher {
    async fn fetch(&self, identity: &DocumentIdentity) -> Result<String> {
        *self.fetches.lock().unwrap() += 1;
        self.files
            .lock()
            .unwrap()
            .get(identity)
            .cloned()
            .ok_or_else(|| CodecoachError::NotFound(identity.to_string()))
    }
}

#[derive(Default)]
struct GraphLog {
    connects: usize,
    closes: usize,
    index_builds: usize,
    episodes: Vec<Episode>,
    searches: Vec<SearchRequest>,
}

type EpisodeHook = Arc<dyn Fn() + Send + Sync>;

/// Graph client recording every connection and call made through it
#[derive(Default)]
pub struct RecordingGraph {
    log: Arc<Mutex<GraphLog>>,
    fail_connect: bool,
    fail_writes: bool,
    results: SearchResults,
    on_episode: Option<EpisodeHook>,
}

impl RecordingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Episode submissions and searches fail; index builds still succeed.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn with_results(mut self, results: SearchResults) -> Self {
        self.results = results;
        self
    }

    /// Run `hook` after each accepted episode
    pub fn on_episode(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_episode = Some(Arc::new(hook));
        self
    }

    pub fn connects(&self) -> usize {
        self.log.lock().unwrap().connects
    }

    pub fn closes(&self) -> usize {
        self.log.lock().unwrap().closes
    }

    pub fn index_builds(&self) -> usize {
        self.log.lock().unwrap().index_builds
    }

    pub fn episodes(&self) -> Vec<Episode> {
        self.log.lock().unwrap().episodes.clone()
    }

    pub fn searches(&self) -> Vec<SearchRequest> {
        self.log.lock().unwrap().searches.clone()
    }
}

#[async_trait]
impl GraphClient for RecordingGraph {
    async fn connect(&self) -> Result<Box<dyn GraphSession>> {
        if self.fail_connect {
            return Err(CodecoachError::GraphStore("connection refused".into()));
        }
        self.log.lock().unwrap().connects += 1;
        Ok(Box::new(RecordingSession {
            log: Arc::clone(&self.log),
            fail_writes: self.fail_writes,
            results: self.results.clone(),
            on_episode: self.on_episode.clone(),
        }))
    }
}

struct RecordingSession {
    log: Arc<Mutex<GraphLog>>,
    fail_writes: bool,
    results: SearchResults,
    on_episode: Option<EpisodeHook>,
}

#[async_trait]
impl GraphSession for RecordingSession {
    async fn build_indices_and_constraints(&mut self) -> Result<()> {
        self.log.lock().unwrap().index_builds += 1;
        Ok(())
    }

    async fn add_episode(&mut self, episode: &Episode) -> Result<()> {
        if self.fail_writes {
            return Err(CodecoachError::GraphStore("episode rejected".into()));
        }
        self.log.lock().unwrap().episodes.push(episode.clone());
        if let Some(hook) = &self.on_episode {
            hook();
        }
        Ok(())
    }

    async fn search(&mut self, request: &SearchRequest) -> Result<SearchResults> {
        if self.fail_writes {
            return Err(CodecoachError::GraphStore("search failed".into()));
        }
        self.log.lock().unwrap().searches.push(request.clone());
        Ok(self.results.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

/// Pipeline over the given doubles with its cache in `cache_dir`
pub fn pipeline_with(
    fetcher: &Arc<ScriptedFetcher>,
    graph: &Arc<RecordingGraph>,
    cache_dir: &std::path::Path,
) -> crate::pipeline::Pipeline {
    crate::pipeline::Pipeline::new(
        fetcher.clone(),
        crate::cache::ContentCache::new(cache_dir),
        graph.clone(),
    )
}
