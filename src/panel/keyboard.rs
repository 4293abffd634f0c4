/// A key event as delivered by the UI layer. `key` follows the DOM
/// `KeyboardEvent.key` naming ("k", "Escape", ...).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct KeyInput {
    pub key: String,
    pub modifiers: Modifiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Default::default()
        }
    }

    /// Ctrl on most platforms, Cmd on Mac.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

impl KeyInput {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelCommand {
    Open,
    Close,
}

/// Maps a key press to a panel command. Ctrl/Cmd+K opens from anywhere;
/// Escape closes, but only while the panel is open.
pub fn interpret(input: &KeyInput, panel_open: bool) -> Option<PanelCommand> {
    if input.modifiers.command() && input.key == "k" {
        return Some(PanelCommand::Open);
    }
    if input.key == "Escape" && panel_open {
        return Some(PanelCommand::Close);
    }
    None
}

/// Inline hint shown in the query input. Only Mac users get one.
pub fn shortcut_hint(platform: &str) -> Option<&'static str> {
    if platform.contains("Mac") {
        Some("⌘K")
    } else {
        None
    }
}
