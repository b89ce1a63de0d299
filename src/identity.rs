use crate::error::{CodecoachError, Result};
use serde::Serialize;
use std::fmt;

/// A trackable document: a file path inside an `owner/name` repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentIdentity {
    pub repo: String,
    pub path: String,
}

impl DocumentIdentity {
    pub fn new(repo: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            path: path.into(),
        }
    }

    /// Check that this names one file in an `owner/name` repository.
    ///
    /// `repo` must be exactly two segments and `path` at least one; no segment
    /// may be empty, `.` or `..`. Dot segments are rejected, never normalized.
    pub fn validate(&self) -> Result<()> {
        let repo: Vec<&str> = self.repo.split('/').collect();
        if repo.len() != 2 || !repo.iter().all(|s| is_plain_segment(s)) {
            return Err(CodecoachError::Validation(format!(
                "'repo' must be of the form owner/name, got '{}'",
                self.repo
            )));
        }

        if !self.path.split('/').all(is_plain_segment) {
            return Err(CodecoachError::Validation(format!(
                "'path' must not contain empty, '.' or '..' segments, got '{}'",
                self.path
            )));
        }

        Ok(())
    }

    /// Partition key into the graph store: the repository with `/` replaced by `_`.
    pub fn group_id(&self) -> String {
        group_id_for(&self.repo)
    }

    /// Filesystem-safe cache file name.
    ///
    /// Both separators collapse to `_`, so `a/b` + `c` and `a` + `b/c` share a name.
    pub fn cache_file_name(&self) -> String {
        format!("{}_{}", self.repo.replace('/', "_"), self.path.replace('/', "_"))
    }
}

impl fmt::Display for DocumentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.repo, self.path)
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

/// Group id for a bare repository identifier.
pub fn group_id_for(repo: &str) -> String {
    repo.replace('/', "_")
}
