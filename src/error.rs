use thiserror::Error;

/// Main error type for codecoach-graph
#[derive(Error, Debug)]
pub enum CodecoachError {
    /// Bad or missing request fields (reported as 400)
    #[error("{0}")]
    Validation(String),

    /// Repository or file does not exist on the code host
    #[error("Not found on code host: {0}")]
    NotFound(String),

    /// Missing or rejected code host credentials
    #[error("Code host authentication failed: {0}")]
    Auth(String),

    /// Network-level failure talking to the code host
    #[error("Code host request failed: {0}")]
    Transient(String),

    /// Code host answered but the file body could not be decoded as text
    #[error("Unreadable content from code host: {0}")]
    Payload(String),

    /// Graph store connection, indexing, write or search failure
    #[error("Graph store error: {0}")]
    GraphStore(String),

    /// Local filesystem errors (content cache)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodecoachError {
    /// True for pre-flight validation failures; everything else is a server-side failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, CodecoachError::Validation(_))
    }

    /// True for the failures raised while fetching from the code host.
    pub fn is_upstream_fetch(&self) -> bool {
        matches!(
            self,
            CodecoachError::NotFound(_)
                | CodecoachError::Auth(_)
                | CodecoachError::Transient(_)
                | CodecoachError::Payload(_)
        )
    }
}

/// Convenient Result type using CodecoachError
pub type Result<T> = std::result::Result<T, CodecoachError>;
