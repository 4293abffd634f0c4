use serde::{Deserialize, Serialize};

use crate::error::FailureKind;
use crate::models::{EmbedFrame, Query, ResultSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    OpenEmpty,
    Loading {
        query: Query,
    },
    Results {
        query: Query,
        results: ResultSet,
    },
    Embedded {
        query: Query,
        frame: EmbedFrame,
    },
    NoResults {
        query: Query,
        cause: Option<FailureKind>,
    },
}

/// The status areas inside the dialog. At most one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    EmptyPrompt,
    Loading,
    ResultList,
    NoResults,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::EmptyPrompt,
        Region::Loading,
        Region::ResultList,
        Region::NoResults,
    ];

    pub fn dom_id(&self) -> &'static str {
        match self {
            Region::EmptyPrompt => "searchPrompt",
            Region::Loading => "searchLoading",
            Region::ResultList => "searchResultsContainer",
            Region::NoResults => "noResults",
        }
    }
}

impl PanelState {
    pub fn is_open(&self) -> bool {
        !matches!(self, PanelState::Closed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PanelState::Closed => "closed",
            PanelState::OpenEmpty => "open_empty",
            PanelState::Loading { .. } => "loading",
            PanelState::Results { .. } => "results",
            PanelState::Embedded { .. } => "embedded",
            PanelState::NoResults { .. } => "no_results",
        }
    }

    pub fn query(&self) -> Option<&Query> {
        match self {
            PanelState::Closed | PanelState::OpenEmpty => None,
            PanelState::Loading { query }
            | PanelState::Results { query, .. }
            | PanelState::Embedded { query, .. }
            | PanelState::NoResults { query, .. } => Some(query),
        }
    }

    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            PanelState::Results { results, .. } => Some(results),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            PanelState::NoResults { cause, .. } => *cause,
            _ => None,
        }
    }

    pub fn visible_region(&self) -> Option<Region> {
        match self {
            PanelState::Closed => None,
            PanelState::OpenEmpty => Some(Region::EmptyPrompt),
            PanelState::Loading { .. } => Some(Region::Loading),
            PanelState::Results { .. } | PanelState::Embedded { .. } => Some(Region::ResultList),
            PanelState::NoResults { .. } => Some(Region::NoResults),
        }
    }
}
