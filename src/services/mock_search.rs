use async_trait::async_trait;
use std::time::Duration;

use crate::error::SearchError;
use crate::models::{FetchOutcome, Query, ResultItem, ResultSet};
use crate::services::ResultSource;

/// Canned results for working on the panel without network access.
#[derive(Debug, Clone)]
pub struct MockSearch {
    delay: Duration,
}

impl MockSearch {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn sample_items() -> Vec<ResultItem> {
        vec![
            ResultItem::new(
                "Advancements in Renewable Energy Technologies",
                "https://solav.me/article/123",
                "Recent breakthroughs in solar panel efficiency and wind turbine design are paving the way for sustainable energy solutions.",
                "solav.me/article/123",
            ),
            ResultItem::new(
                "Machine Learning Applications in Biomedical Research",
                "https://solav.me/article/456",
                "This study explores how artificial intelligence is transforming disease diagnosis and drug discovery processes.",
                "solav.me/article/456",
            ),
            ResultItem::new(
                "Interdisciplinary Approaches to Climate Change",
                "https://solav.me/article/789",
                "Combining environmental science, engineering, and social sciences to address global warming challenges.",
                "solav.me/article/789",
            ),
        ]
    }
}

#[async_trait]
impl ResultSource for MockSearch {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, query: &Query) -> Result<FetchOutcome, SearchError> {
        tokio::time::sleep(self.delay).await;
        Ok(FetchOutcome::Results(ResultSet::counted(
            Self::sample_items(),
            query,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn returns_three_articles_after_the_delay() {
        let source = MockSearch::new(Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        let outcome = source.fetch(&Query::parse("test").unwrap()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(500));
        let FetchOutcome::Results(results) = outcome else {
            panic!("mock search should return structured results");
        };
        assert_eq!(results.len(), 3);
        assert_eq!(
            results.items[0].title,
            "Advancements in Renewable Energy Technologies"
        );
        assert_eq!(results.summary, "About 3 results for \"test\"");
    }
}
