use super::ContentFetcher;
use crate::error::{CodecoachError, Result};
use crate::identity::DocumentIdentity;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

/// Single-file response of the GitHub contents API
#[derive(Deserialize)]
struct ContentsResponse {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// GitHub contents API client
///
/// Fetches one file per call with `GET /repos/{owner}/{name}/contents/{path}`
/// and decodes the base64 body. No retries and no request timeout.
pub struct GithubFetcher {
    client: Client,
    api_base: Url,
    token: String,
}

impl GithubFetcher {
    /// Create a fetcher against `api_url` (e.g. `https://api.github.com`)
    pub fn new(api_url: &str, token: String) -> Result<Self> {
        let api_base = Url::parse(api_url)
            .map_err(|e| CodecoachError::Config(format!("Invalid GitHub API URL {}: {}", api_url, e)))?;

        let client = Client::builder()
            .user_agent(concat!("codecoach-graph/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CodecoachError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base,
            token,
        })
    }

    /// Contents API URL for a document
    fn contents_url(&self, identity: &DocumentIdentity) -> Result<Url> {
        identity.validate()?;

        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| CodecoachError::Config(format!("GitHub API URL cannot be a base: {}", self.api_base)))?
            .pop_if_empty()
            .push("repos")
            .extend(identity.repo.split('/'))
            .push("contents")
            .extend(identity.path.split('/'));
        Ok(url)
    }

    async fn fetch_inner(&self, identity: &DocumentIdentity) -> Result<String> {
        let url = self.contents_url(identity)?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| CodecoachError::Transient(format!("{}: {}", identity, e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(match status {
                StatusCode::NOT_FOUND => CodecoachError::NotFound(format!(
                    "{} (repository or file does not exist)",
                    identity
                )),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    CodecoachError::Auth(format!("{} returned {}: {}", identity, status, body))
                }
                _ => CodecoachError::Transient(format!("{} returned {}: {}", identity, status, body)),
            });
        }

        let contents: ContentsResponse = response.json().await.map_err(|e| {
            CodecoachError::Payload(format!("{} is not a single file: {}", identity, e))
        })?;

        decode_contents(identity, contents)
    }
}

fn decode_contents(identity: &DocumentIdentity, contents: ContentsResponse) -> Result<String> {
    if let Some(kind) = contents.kind.as_deref() {
        if kind != "file" {
            return Err(CodecoachError::Payload(format!(
                "{} is a {}, not a file",
                identity, kind
            )));
        }
    }

    match contents.encoding.as_deref() {
        Some("base64") => {}
        other => {
            return Err(CodecoachError::Payload(format!(
                "{} has unsupported encoding {:?}",
                identity, other
            )))
        }
    }

    // The API wraps base64 at 60 columns
    let packed: String = contents
        .content
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(packed.as_bytes())
        .map_err(|e| CodecoachError::Payload(format!("{}: invalid base64: {}", identity, e)))?;

    String::from_utf8(bytes)
        .map_err(|e| CodecoachError::Payload(format!("{}: not UTF-8 text: {}", identity, e)))
}

#[async_trait]
impl ContentFetcher for GithubFetcher {
    async fn fetch(&self, identity: &DocumentIdentity) -> Result<String> {
        log::info!("Fetching {} from {}", identity.path, identity.repo);

        match self.fetch_inner(identity).await {
            Ok(content) => {
                log::info!(
                    "Successfully fetched {} ({} bytes)",
                    identity.path,
                    content.len()
                );
                Ok(content)
            }
            Err(e) => {
                log::error!(
                    "Error fetching {} from {}: {}",
                    identity.path,
                    identity.repo,
                    e
                );
                Err(e)
            }
        }
    }
}
