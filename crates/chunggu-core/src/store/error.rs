use thiserror::Error;

/// Which source collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Members,
    Scores,
}

impl Collection {
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Members => "members.json",
            Collection::Scores => "scores.json",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Members => write!(f, "members"),
            Collection::Scores => write!(f, "scores"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("The {collection} data is unavailable: {reason}")]
    DataUnavailable {
        collection: Collection,
        reason: String,
    },
}

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 200;

impl DataError {
    pub fn unavailable(collection: Collection, reason: impl Into<String>) -> Self {
        DataError::DataUnavailable {
            collection,
            reason: reason.into(),
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            DataError::DataUnavailable { collection, .. } => *collection,
        }
    }

    /// Build an error from a non-success HTTP status, quoting at most
    /// `MAX_ERROR_BODY_LENGTH` characters of the body.
    pub fn from_status(collection: Collection, status: reqwest::StatusCode, body: &str) -> Self {
        let truncated: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
        let reason = if truncated.len() < body.len() {
            format!("HTTP {}: {}... (truncated)", status, truncated)
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, truncated)
        };
        Self::unavailable(collection, reason)
    }
}
