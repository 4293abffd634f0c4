use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::models::{FetchOutcome, Query};
use crate::panel::render::{render, PanelView};
use crate::panel::state::PanelState;

/// Identifies one submission. A completion is applied only while its ticket
/// is still the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: Query,
}

/// Side effects the controller asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowDialog,
    HideDialog,
    ClearInput,
    /// Focus the input once `after` has elapsed, unless the open session
    /// identified by `epoch` has ended.
    FocusInput { after: Duration, epoch: u64 },
    Fetch(FetchTicket),
    Repaint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

pub struct SearchPanelController {
    state: PanelState,
    active: Option<FetchTicket>,
    next_seq: u64,
    epoch: u64,
    focus_delay: Duration,
}

impl SearchPanelController {
    pub fn new(focus_delay: Duration) -> Self {
        Self {
            state: PanelState::Closed,
            active: None,
            next_seq: 0,
            epoch: 0,
            focus_delay,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn active_ticket(&self) -> Option<&FetchTicket> {
        self.active.as_ref()
    }

    pub fn view(&self) -> PanelView {
        render(&self.state)
    }

    pub fn open(&mut self) -> Vec<Effect> {
        if self.is_open() {
            return Vec::new();
        }

        self.epoch += 1;
        self.state = PanelState::OpenEmpty;
        debug!(epoch = self.epoch, "search panel opened");

        vec![
            Effect::ShowDialog,
            Effect::Repaint,
            Effect::FocusInput {
                after: self.focus_delay,
                epoch: self.epoch,
            },
        ]
    }

    pub fn close(&mut self) -> Vec<Effect> {
        self.active = None;
        if !self.is_open() {
            return Vec::new();
        }

        self.state = PanelState::Closed;
        debug!(epoch = self.epoch, "search panel closed");

        vec![Effect::HideDialog, Effect::ClearInput, Effect::Repaint]
    }

    pub fn submit(&mut self, raw_query: &str) -> Vec<Effect> {
        if !self.is_open() {
            debug!("ignoring submit while the panel is closed");
            return Vec::new();
        }
        let Some(query) = Query::parse(raw_query) else {
            return Vec::new();
        };

        self.next_seq += 1;
        let ticket = FetchTicket {
            seq: self.next_seq,
            query: query.clone(),
        };
        if let Some(previous) = self.active.replace(ticket.clone()) {
            debug!(
                superseded = %previous.query,
                seq = previous.seq,
                "superseding in-flight search"
            );
        }
        self.state = PanelState::Loading { query };
        info!(query = %ticket.query, seq = ticket.seq, "search submitted");

        vec![Effect::Repaint, Effect::Fetch(ticket)]
    }

    /// Applies the result of a fetch, unless a newer submission or a close
    /// has happened since the ticket was issued.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<FetchOutcome, SearchError>,
    ) -> Completion {
        if self.active.as_ref() != Some(ticket) {
            debug!(query = %ticket.query, seq = ticket.seq, "discarding stale search response");
            return Completion::Stale;
        }
        self.active = None;

        let query = ticket.query.clone();
        self.state = match outcome {
            Ok(FetchOutcome::Results(results)) if results.is_empty() => {
                PanelState::NoResults { query, cause: None }
            }
            Ok(FetchOutcome::Results(results)) => PanelState::Results { query, results },
            Ok(FetchOutcome::Embedded(frame)) => PanelState::Embedded { query, frame },
            Err(err) => {
                warn!(query = %query, error = %err, "search failed");
                PanelState::NoResults {
                    query,
                    cause: Some(err.kind()),
                }
            }
        };

        Completion::Applied
    }

    /// Whether a deferred focus request for `epoch` should still be honoured.
    pub fn focus_due(&self, epoch: u64) -> bool {
        self.is_open() && self.epoch == epoch
    }
}
