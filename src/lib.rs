pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod panel;
pub mod routes;
pub mod services;

use anyhow::Result;
use std::time::Instant;
use tokio::sync::watch;

use config::Config;
use models::PanelSnapshot;
use panel::{PanelHandle, PanelRuntime, PreviewSurface, SearchPanelController};

/// Shared state for the preview server's handlers.
#[derive(Clone)]
pub struct AppState {
    pub panel: PanelHandle,
    pub snapshot: watch::Receiver<PanelSnapshot>,
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    /// Builds the configured result source and starts a panel runtime on the
    /// current tokio runtime.
    pub fn start(config: Config) -> Result<Self> {
        let source = services::build_source(&config.search)?;
        let controller = SearchPanelController::new(config.panel.focus_delay());
        let (surface, snapshot) = PreviewSurface::new();
        let (panel, _task) = PanelRuntime::new(controller, source, surface).spawn();

        Ok(Self {
            panel,
            snapshot,
            config,
            start_time: Instant::now(),
        })
    }

    pub fn current(&self) -> PanelSnapshot {
        self.snapshot.borrow().clone()
    }
}
