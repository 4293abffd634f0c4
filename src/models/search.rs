use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Query(String);

impl Query {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(rename = "formattedUrl")]
    pub display_url: String,
}

impl ResultItem {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
        display_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            display_url: display_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
    pub summary: String,
}

impl ResultSet {
    pub fn new(items: Vec<ResultItem>, summary: impl Into<String>) -> Self {
        Self {
            items,
            summary: summary.into(),
        }
    }

    /// Summary used when only the item count is known.
    pub fn counted(items: Vec<ResultItem>, query: &Query) -> Self {
        let summary = format!("About {} results for \"{}\"", items.len(), query);
        Self::new(items, summary)
    }

    /// Summary built from the provider's preformatted totals.
    pub fn timed(items: Vec<ResultItem>, total: &str, seconds: &str) -> Self {
        let summary = format!("About {} results ({} seconds)", total, seconds);
        Self::new(items, summary)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Reference to a third-party widget that renders its own results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFrame {
    pub url: String,
}

/// What a result source hands back for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Results(ResultSet),
    Embedded(EmbedFrame),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_queries_are_rejected(#[case] raw: &str) {
        assert!(Query::parse(raw).is_none());
    }

    #[test]
    fn queries_are_trimmed() {
        let query = Query::parse("  solar panels \n").unwrap();
        assert_eq!(query.as_str(), "solar panels");
    }

    #[test]
    fn summaries_follow_provider_wording() {
        let query = Query::parse("test").unwrap();
        let set = ResultSet::counted(vec![ResultItem::new("a", "b", "c", "d")], &query);
        assert_eq!(set.summary, "About 1 results for \"test\"");

        let set = ResultSet::timed(Vec::new(), "1,230", "0.31");
        assert_eq!(set.summary, "About 1,230 results (0.31 seconds)");
    }
}
