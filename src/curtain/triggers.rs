// SPDX-License-Identifier: MPL-2.0
//! Input triggers bound while the curtain is live.
//!
//! The host translates its native events into [`InputEvent`]s. The binder
//! decides which of them open the curtain and which must be swallowed so the
//! page underneath does not scroll.

/// Host-agnostic input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The activation button was pressed.
    ButtonPressed,
    /// A click landed anywhere on the page.
    PageClick,
    /// A key was pressed.
    Key(Key),
    /// Mouse wheel scrolling.
    Wheel,
    /// Touch drag.
    TouchMove,
}

/// Keys the curtain cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Other,
}

/// What the host should do with an event after the curtain saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The curtain has no interest in this event.
    Ignored,
    /// The curtain acted on the event; default handling may continue.
    Consumed,
    /// The curtain acted on (or swallowed) the event; suppress default handling.
    Prevented,
}

/// A single bound listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    ButtonClick,
    KeyDown,
    Wheel,
    TouchMove,
}

/// Action requested by a bound listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
}

/// Tracks the listeners attached for the live overlay.
#[derive(Debug, Default)]
pub struct TriggerBinder {
    listeners: Vec<Listener>,
}

impl TriggerBinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the full listener set, replacing any previous one.
    pub fn bind(&mut self) {
        self.listeners = vec![
            Listener::ButtonClick,
            Listener::KeyDown,
            Listener::Wheel,
            Listener::TouchMove,
        ];
    }

    /// Detaches every listener.
    pub fn unbind(&mut self) {
        self.listeners.clear();
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.listeners.is_empty()
    }

    #[must_use]
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Routes an event through the bound listeners.
    ///
    /// `idle` is true while the curtain is neither open nor animating; keyboard
    /// activation only applies then.
    pub fn route(&self, event: InputEvent, idle: bool) -> (Disposition, Option<Action>) {
        let listening = |listener: Listener| self.listeners.contains(&listener);

        match event {
            InputEvent::ButtonPressed if listening(Listener::ButtonClick) => {
                (Disposition::Consumed, Some(Action::Open))
            }
            InputEvent::Key(Key::Space | Key::Enter) if listening(Listener::KeyDown) && idle => {
                (Disposition::Prevented, Some(Action::Open))
            }
            InputEvent::Key(Key::Escape) if listening(Listener::KeyDown) && idle => {
                (Disposition::Consumed, Some(Action::Open))
            }
            InputEvent::Wheel if listening(Listener::Wheel) => (Disposition::Prevented, None),
            InputEvent::TouchMove if listening(Listener::TouchMove) => {
                (Disposition::Prevented, None)
            }
            _ => (Disposition::Ignored, None),
        }
    }
}
