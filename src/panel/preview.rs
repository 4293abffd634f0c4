use tokio::sync::watch;

use crate::models::PanelSnapshot;
use crate::panel::render::PanelView;
use crate::panel::runtime::PanelSurface;
use crate::panel::state::PanelState;

/// Headless surface that publishes what a browser would be showing.
pub struct PreviewSurface {
    current: PanelSnapshot,
    publisher: watch::Sender<PanelSnapshot>,
}

impl PreviewSurface {
    pub fn new() -> (Self, watch::Receiver<PanelSnapshot>) {
        let current = PanelSnapshot {
            state: PanelState::Closed.label().to_string(),
            ..PanelSnapshot::default()
        };
        let (publisher, receiver) = watch::channel(current.clone());
        (Self { current, publisher }, receiver)
    }

    fn publish(&self) {
        self.publisher.send_replace(self.current.clone());
    }
}

impl PanelSurface for PreviewSurface {
    fn show_dialog(&mut self) {
        self.current.dialog_visible = true;
        self.publish();
    }

    fn hide_dialog(&mut self) {
        self.current.dialog_visible = false;
        self.current.input_focused = false;
        self.publish();
    }

    fn focus_input(&mut self) {
        self.current.input_focused = true;
        self.publish();
    }

    fn clear_input(&mut self) {
        self.current.input.clear();
        self.publish();
    }

    fn paint(&mut self, state: &PanelState, view: &PanelView) {
        self.current.state = state.label().to_string();
        self.current.region = view.region;
        self.current.failure = state.failure();
        self.current.html = view.html.clone();
        self.publish();
    }

    fn sync_input(&mut self, text: &str) {
        self.current.input = text.to_string();
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::render::render;
    use crate::panel::Region;

    #[test]
    fn publishes_every_change() {
        let (mut surface, receiver) = PreviewSurface::new();
        assert_eq!(receiver.borrow().state, "closed");

        surface.show_dialog();
        surface.paint(&PanelState::OpenEmpty, &render(&PanelState::OpenEmpty));
        surface.focus_input();
        surface.sync_input("energy");

        let snapshot = receiver.borrow().clone();
        assert!(snapshot.dialog_visible);
        assert!(snapshot.input_focused);
        assert_eq!(snapshot.input, "energy");
        assert_eq!(snapshot.region, Some(Region::EmptyPrompt));

        surface.clear_input();
        surface.hide_dialog();
        let snapshot = receiver.borrow().clone();
        assert!(!snapshot.dialog_visible);
        assert!(!snapshot.input_focused);
        assert!(snapshot.input.is_empty());
    }
}
