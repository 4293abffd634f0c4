use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub panel: PanelTiming,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

/// Which result source answers a submitted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Embed,
    Mock,
    Json,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Embed => "embed",
            StrategyKind::Mock => "mock",
            StrategyKind::Json => "json",
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "embed" | "iframe" => Ok(StrategyKind::Embed),
            "mock" => Ok(StrategyKind::Mock),
            "json" => Ok(StrategyKind::Json),
            other => bail!("unknown search strategy: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub strategy: StrategyKind,
    pub scope_id: String,
    pub embed_host: String,
    pub json_endpoint: String,
    pub api_key: String,
    pub page_size: u32,
    pub start_index: u32,
    pub request_timeout_secs: u64,
    pub fallback_to_embed: bool,
    pub mock_delay_ms: u64,
    pub embed_reveal_ms: u64,
}

impl SearchConfig {
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    pub fn embed_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.embed_reveal_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PanelTiming {
    /// Delay between the dialog being shown and the input receiving focus.
    pub focus_delay_ms: u64,
}

impl PanelTiming {
    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Embed,
            scope_id: "2440ad3918cf84e2e".to_string(),
            embed_host: "https://cse.google.com/cse".to_string(),
            json_endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            api_key: String::new(),
            page_size: 10,
            start_index: 1,
            request_timeout_secs: 15,
            fallback_to_embed: true,
            mock_delay_ms: 500,
            embed_reveal_ms: 1000,
        }
    }
}

impl Default for PanelTiming {
    fn default() -> Self {
        Self { focus_delay_ms: 100 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5733,
                workers: num_cpus::get(),
            },
            search: SearchConfig::default(),
            panel: PanelTiming::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        // Server configuration
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(workers) = env::var("WORKERS") {
            config.server.workers = workers.parse()?;
        }

        // Search configuration
        if let Ok(strategy) = env::var("SEARCH_STRATEGY") {
            config.search.strategy = strategy.parse()?;
        }
        if let Ok(use_mock) = env::var("USE_MOCK_DATA") {
            if use_mock.parse::<bool>()? {
                config.search.strategy = StrategyKind::Mock;
            }
        }
        if let Ok(scope_id) = env::var("SEARCH_SCOPE_ID") {
            config.search.scope_id = scope_id;
        }
        if let Ok(embed_host) = env::var("SEARCH_EMBED_HOST") {
            config.search.embed_host = embed_host;
        }
        if let Ok(json_endpoint) = env::var("SEARCH_JSON_ENDPOINT") {
            config.search.json_endpoint = json_endpoint;
        }
        if let Ok(api_key) = env::var("SEARCH_API_KEY") {
            config.search.api_key = api_key;
        }
        if let Ok(page_size) = env::var("SEARCH_PAGE_SIZE") {
            config.search.page_size = page_size.parse()?;
        }
        if let Ok(start_index) = env::var("SEARCH_START_INDEX") {
            config.search.start_index = start_index.parse()?;
        }
        if let Ok(timeout) = env::var("SEARCH_REQUEST_TIMEOUT_SECS") {
            config.search.request_timeout_secs = timeout.parse()?;
        }
        if let Ok(fallback) = env::var("SEARCH_FALLBACK_TO_EMBED") {
            config.search.fallback_to_embed = fallback.parse()?;
        }
        if let Ok(delay) = env::var("SEARCH_MOCK_DELAY_MS") {
            config.search.mock_delay_ms = delay.parse()?;
        }
        if let Ok(delay) = env::var("SEARCH_EMBED_REVEAL_MS") {
            config.search.embed_reveal_ms = delay.parse()?;
        }

        // Panel configuration
        if let Ok(delay) = env::var("SEARCH_FOCUS_DELAY_MS") {
            config.panel.focus_delay_ms = delay.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.search.scope_id.trim().is_empty() {
            bail!("SEARCH_SCOPE_ID must not be empty");
        }
        if self.search.strategy == StrategyKind::Json && self.search.api_key.trim().is_empty() {
            bail!("the json search strategy requires SEARCH_API_KEY");
        }
        if self.search.page_size == 0 || self.search.page_size > 10 {
            bail!("SEARCH_PAGE_SIZE must be between 1 and 10");
        }
        if self.search.start_index == 0 {
            bail!("SEARCH_START_INDEX is 1-based");
        }
        Ok(())
    }
}
