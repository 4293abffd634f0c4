use async_trait::async_trait;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::models::{EmbedFrame, FetchOutcome, Query};
use crate::services::ResultSource;

/// Delegates rendering to the provider's hosted results page.
#[derive(Debug, Clone)]
pub struct EmbedSearch {
    host: String,
    scope_id: String,
    reveal_delay: Duration,
}

impl EmbedSearch {
    pub fn new(
        host: impl Into<String>,
        scope_id: impl Into<String>,
        reveal_delay: Duration,
    ) -> Self {
        Self {
            host: host.into(),
            scope_id: scope_id.into(),
            reveal_delay,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            config.embed_host.clone(),
            config.scope_id.clone(),
            config.embed_reveal_delay(),
        )
    }

    pub fn frame_for(&self, query: &Query) -> EmbedFrame {
        let separator = if self.host.contains('?') { '&' } else { '?' };
        EmbedFrame {
            url: format!(
                "{}{}cx={}&q={}",
                self.host,
                separator,
                urlencoding::encode(&self.scope_id),
                urlencoding::encode(query.as_str())
            ),
        }
    }
}

#[async_trait]
impl ResultSource for EmbedSearch {
    fn name(&self) -> &'static str {
        "embed"
    }

    async fn fetch(&self, query: &Query) -> Result<FetchOutcome, SearchError> {
        let frame = self.frame_for(query);
        // give the widget time to load before the list region is revealed
        if !self.reveal_delay.is_zero() {
            tokio::time::sleep(self.reveal_delay).await;
        }
        Ok(FetchOutcome::Embedded(frame))
    }
}
