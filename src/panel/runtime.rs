use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::error::{PanelError, SearchError};
use crate::models::FetchOutcome;
use crate::panel::controller::{Completion, Effect, FetchTicket, SearchPanelController};
use crate::panel::keyboard::{interpret, KeyInput, PanelCommand};
use crate::panel::render::PanelView;
use crate::panel::state::PanelState;
use crate::services::ResultSource;

/// The dialog and its query input, as seen by the runtime.
pub trait PanelSurface: Send + 'static {
    fn show_dialog(&mut self);
    fn hide_dialog(&mut self);
    fn focus_input(&mut self);
    fn clear_input(&mut self);
    fn paint(&mut self, state: &PanelState, view: &PanelView);

    /// Called with the raw input value when the form is submitted.
    fn sync_input(&mut self, _text: &str) {}
}

/// Events raised by the page around the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TriggerClicked,
    Submitted(String),
    Key(KeyInput),
    /// The dialog finished hiding, for whatever reason.
    DialogHidden,
}

struct Command {
    event: UiEvent,
    ack: oneshot::Sender<()>,
}

enum Deferred {
    Fetched {
        ticket: FetchTicket,
        outcome: Result<FetchOutcome, SearchError>,
    },
    FocusDue {
        epoch: u64,
    },
}

/// Sends UI events to a running panel.
#[derive(Clone)]
pub struct PanelHandle {
    commands: mpsc::Sender<Command>,
}

impl PanelHandle {
    /// Delivers an event and waits until it has been applied.
    pub async fn dispatch(&self, event: UiEvent) -> Result<(), PanelError> {
        let (ack, applied) = oneshot::channel();
        self.commands
            .send(Command { event, ack })
            .await
            .map_err(|_| PanelError::RuntimeGone)?;
        applied.await.map_err(|_| PanelError::RuntimeGone)
    }
}

/// Owns the controller and applies UI events, fetch completions and
/// deferred focus requests one at a time.
pub struct PanelRuntime<S: PanelSurface> {
    controller: SearchPanelController,
    source: Arc<dyn ResultSource>,
    surface: S,
    deferred_tx: mpsc::UnboundedSender<Deferred>,
    deferred_rx: mpsc::UnboundedReceiver<Deferred>,
}

impl<S: PanelSurface> PanelRuntime<S> {
    pub fn new(
        controller: SearchPanelController,
        source: Arc<dyn ResultSource>,
        surface: S,
    ) -> Self {
        let (deferred_tx, deferred_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            source,
            surface,
            deferred_tx,
            deferred_rx,
        }
    }

    /// Starts the event loop on the current tokio runtime. The task ends,
    /// handing back the surface, once every handle has been dropped.
    pub fn spawn(self) -> (PanelHandle, JoinHandle<S>) {
        let (commands, receiver) = mpsc::channel(64);
        let task = tokio::spawn(self.run(receiver));
        (PanelHandle { commands }, task)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> S {
        debug!(source = self.source.name(), "search panel runtime started");
        self.repaint();

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command { event, ack }) => {
                        self.handle_event(event);
                        let _ = ack.send(());
                    }
                    None => break,
                },
                Some(deferred) = self.deferred_rx.recv() => self.handle_deferred(deferred),
            }
        }

        debug!("search panel runtime stopped");
        self.surface
    }

    fn handle_event(&mut self, event: UiEvent) {
        trace!(?event, "ui event");
        let effects = match event {
            UiEvent::TriggerClicked => self.controller.open(),
            UiEvent::Submitted(raw) => {
                // a closed dialog has no input to mirror
                if self.controller.is_open() {
                    self.surface.sync_input(&raw);
                }
                self.controller.submit(&raw)
            }
            UiEvent::Key(input) => match interpret(&input, self.controller.is_open()) {
                Some(PanelCommand::Open) => self.controller.open(),
                Some(PanelCommand::Close) => self.controller.close(),
                None => Vec::new(),
            },
            UiEvent::DialogHidden => self.controller.close(),
        };
        self.apply(effects);
    }

    fn handle_deferred(&mut self, deferred: Deferred) {
        match deferred {
            Deferred::Fetched { ticket, outcome } => {
                if self.controller.complete(&ticket, outcome) == Completion::Applied {
                    self.repaint();
                }
            }
            Deferred::FocusDue { epoch } => {
                if self.controller.focus_due(epoch) {
                    self.surface.focus_input();
                }
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ShowDialog => self.surface.show_dialog(),
                Effect::HideDialog => self.surface.hide_dialog(),
                Effect::ClearInput => self.surface.clear_input(),
                Effect::Repaint => self.repaint(),
                Effect::FocusInput { after, epoch } => {
                    let deferred = self.deferred_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = deferred.send(Deferred::FocusDue { epoch });
                    });
                }
                Effect::Fetch(ticket) => {
                    let source = Arc::clone(&self.source);
                    let deferred = self.deferred_tx.clone();
                    tokio::spawn(async move {
                        let outcome = source.fetch(&ticket.query).await;
                        let _ = deferred.send(Deferred::Fetched { ticket, outcome });
                    });
                }
            }
        }
    }

    fn repaint(&mut self) {
        let view = self.controller.view();
        self.surface.paint(self.controller.state(), &view);
    }
}
