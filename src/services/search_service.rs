use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::{SearchConfig, StrategyKind};
use crate::error::SearchError;
use crate::models::{FetchOutcome, Query};
use crate::services::{EmbedSearch, JsonSearch, MockSearch};

/// Something that can answer a query, either with structured results or
/// with a widget that renders them itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, query: &Query) -> Result<FetchOutcome, SearchError>;
}

/// Picks the result source for the configured strategy.
pub fn build_source(config: &SearchConfig) -> Result<Arc<dyn ResultSource>> {
    let source: Arc<dyn ResultSource> = match config.strategy {
        StrategyKind::Embed => Arc::new(EmbedSearch::from_config(config)),
        StrategyKind::Mock => Arc::new(MockSearch::new(config.mock_delay())),
        StrategyKind::Json => Arc::new(JsonSearch::from_config(config)?),
    };
    info!(strategy = source.name(), "search source ready");
    Ok(source)
}
