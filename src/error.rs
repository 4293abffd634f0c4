use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures a result source can report. None of these reach the user as
/// anything other than the "no results" message.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search endpoint returned status {0}")]
    Status(u16),

    #[error("search response was malformed: {0}")]
    Malformed(String),

    #[error("search API reported an error: {0}")]
    Api(String),
}

/// Coarse classification kept on the `NoResults` state for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Status,
    Malformed,
    Api,
}

impl SearchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SearchError::Transport(_) => FailureKind::Transport,
            SearchError::Status(_) => FailureKind::Status,
            SearchError::Malformed(_) => FailureKind::Malformed,
            SearchError::Api(_) => FailureKind::Api,
        }
    }
}

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("panel runtime has shut down")]
    RuntimeGone,
}
