use super::{Episode, GraphClient, GraphSession, SearchRequest, SearchResults};
use crate::config::Credentials;
use crate::error::{CodecoachError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

/// Graph store reached over its HTTP service API
///
/// Every [`connect`](GraphClient::connect) builds a new HTTP client and checks
/// `GET /healthcheck`; nothing is pooled across connections.
pub struct HttpGraphClient {
    base: Url,
    user: String,
    password: String,
}

impl HttpGraphClient {
    pub fn new(uri: &str, user: String, password: String) -> Result<Self> {
        let base = Url::parse(uri)
            .map_err(|e| CodecoachError::Config(format!("Invalid graph store URI {}: {}", uri, e)))?;
        if base.cannot_be_a_base() {
            return Err(CodecoachError::Config(format!(
                "Graph store URI cannot be a base: {}",
                uri
            )));
        }

        Ok(Self {
            base,
            user,
            password,
        })
    }

    /// Base URI with any password removed, for logs and error text
    pub fn redacted_base(&self) -> Url {
        redact(&self.base)
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        Self::new(
            &credentials.graph_uri,
            credentials.graph_user.clone(),
            credentials.graph_password.clone(),
        )
    }
}

#[async_trait]
impl GraphClient for HttpGraphClient {
    async fn connect(&self) -> Result<Box<dyn GraphSession>> {
        let client = Client::builder()
            .user_agent(concat!("codecoach-graph/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CodecoachError::GraphStore(format!("Failed to build HTTP client: {}", e)))?;

        let session = HttpGraphSession {
            client,
            base: self.base.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            closed: false,
        };

        let response = session
            .client
            .get(session.endpoint("healthcheck"))
            .basic_auth(&session.user, Some(&session.password))
            .send()
            .await
            .map_err(|e| {
                CodecoachError::GraphStore(format!(
                    "Failed to connect to {}: {}",
                    self.redacted_base(),
                    e.without_url()
                ))
            })?;
        check_status("healthcheck", response).await?;

        log::info!("Connected to graph store at {}", self.redacted_base());
        Ok(Box::new(session))
    }
}

struct HttpGraphSession {
    client: Client,
    base: Url,
    user: String,
    password: String,
    closed: bool,
}

impl HttpGraphSession {
    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        // base was checked to be a base URL in HttpGraphClient::new
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }

    async fn post_json<B: Serialize + Sync>(&self, name: &str, body: &B) -> Result<Response> {
        if self.closed {
            return Err(CodecoachError::GraphStore(format!(
                "{} called on a closed connection",
                name
            )));
        }

        let response = self
            .client
            .post(self.endpoint(name))
            .basic_auth(&self.user, Some(&self.password))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                CodecoachError::GraphStore(format!("{} request failed: {}", name, e.without_url()))
            })?;

        check_status(name, response).await
    }
}

/// `url` without its password; the user name is kept
fn redact(url: &Url) -> Url {
    let mut shown = url.clone();
    // fails only for URLs that cannot carry credentials anyway
    let _ = shown.set_password(None);
    shown
}

async fn check_status(name: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());

    Err(CodecoachError::GraphStore(format!(
        "{} returned {}: {}",
        name, status, body
    )))
}

#[async_trait]
impl GraphSession for HttpGraphSession {
    async fn build_indices_and_constraints(&mut self) -> Result<()> {
        self.post_json("indices", &serde_json::json!({})).await?;
        Ok(())
    }

    async fn add_episode(&mut self, episode: &Episode) -> Result<()> {
        self.post_json("episodes", episode).await?;
        Ok(())
    }

    async fn search(&mut self, request: &SearchRequest) -> Result<SearchResults> {
        let response = self.post_json("search", request).await?;

        response
            .json()
            .await
            .map_err(|e| CodecoachError::GraphStore(format!("Failed to parse search results: {}", e)))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
