use crate::error::{CodecoachError, Result};
use crate::identity::DocumentIdentity;
use serde::Serialize;
use serde_json::Value;

/// `GET /` body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Failure body of `/ingest` and `/update`
#[derive(Debug, Serialize)]
pub struct StatusError {
    pub status: &'static str,
    pub message: String,
}

impl StatusError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

/// Failure body of `/query`
#[derive(Debug, Serialize)]
pub struct QueryError {
    pub error: String,
}

/// Read the `{repo, path?}` body of `/ingest` and `/update`.
pub fn document_identity(body: &Value, default_path: &str) -> Result<DocumentIdentity> {
    let repo = match body.get("repo") {
        None | Some(Value::Null) => {
            return Err(CodecoachError::Validation(
                "Missing required field: repo".to_string(),
            ))
        }
        Some(Value::String(repo)) if !repo.is_empty() => repo.clone(),
        Some(_) => {
            return Err(CodecoachError::Validation(
                "'repo' must be a non-empty string".to_string(),
            ))
        }
    };

    let path = match body.get("path") {
        None | Some(Value::Null) => default_path.to_string(),
        Some(Value::String(path)) if !path.is_empty() => path.clone(),
        Some(_) => {
            return Err(CodecoachError::Validation(
                "'path' must be a non-empty string".to_string(),
            ))
        }
    };

    let identity = DocumentIdentity::new(repo, path);
    identity.validate()?;
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_path() {
        let id = document_identity(&json!({"repo": "acme/widgets"}), "codecoach.md").unwrap();
        assert_eq!(id, DocumentIdentity::new("acme/widgets", "codecoach.md"));
    }

    #[test]
    fn test_explicit_path() {
        let id = document_identity(
            &json!({"repo": "acme/widgets", "path": "docs/coach.md"}),
            "codecoach.md",
        )
        .unwrap();
        assert_eq!(id.path, "docs/coach.md");
    }

    #[test]
    fn test_missing_repo_message() {
        let err = document_identity(&json!({"path": "x.md"}), "codecoach.md").unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: repo");

        let err = document_identity(&json!("acme/widgets"), "codecoach.md").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(document_identity(&json!({"repo": ["a"]}), "c.md").unwrap_err().is_validation());
        assert!(document_identity(&json!({"repo": ""}), "c.md").unwrap_err().is_validation());
        assert!(document_identity(&json!({"repo": "a/b", "path": 3}), "c.md")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_error_bodies() {
        assert_eq!(
            serde_json::to_value(StatusError::new("boom")).unwrap(),
            json!({"status": "error", "message": "boom"})
        );
        assert_eq!(
            serde_json::to_value(QueryError { error: "boom".into() }).unwrap(),
            json!({"error": "boom"})
        );
    }

    #[test]
    fn test_rejects_traversal() {
        let err = document_identity(&json!({"repo": "acme/widgets", "path": "../../../user"}), "c.md")
            .unwrap_err();
        assert!(err.is_validation());

        let err = document_identity(&json!({"repo": "../../orgs/x"}), "c.md").unwrap_err();
        assert!(err.is_validation());
    }
}
