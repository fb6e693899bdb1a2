// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events are translated into curtain [`InputEvent`]s. The tick only
//! runs while the controller has pending timers.

use super::Message;
use crate::curtain::{InputEvent, Key};
use iced::{event, keyboard, mouse, time, touch, window, Event, Subscription};
use std::time::Duration;

/// Frame interval of the animation tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Routes window and input events.
///
/// Input is forwarded whatever its capture status: a click on the curtain's
/// own button still counts as a page click.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| {
        if let Event::Window(window::Event::Opened { .. }) = &event {
            return Some(Message::WindowOpened(window_id));
        }
        input_from_event(&event).map(Message::Input)
    })
}

/// Creates the animation tick while timers are pending.
pub fn create_tick_subscription(active: bool) -> Subscription<Message> {
    if active {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Translates a native event into a curtain input event.
pub fn input_from_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            Some(InputEvent::PageClick)
        }
        Event::Mouse(mouse::Event::WheelScrolled { .. }) => Some(InputEvent::Wheel),
        Event::Touch(touch::Event::FingerMoved { .. }) => Some(InputEvent::TouchMove),
        Event::Touch(touch::Event::FingerPressed { .. }) => Some(InputEvent::PageClick),
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            Some(InputEvent::Key(key_from(key)))
        }
        _ => None,
    }
}

/// Maps a keyboard key to the keys the curtain reacts to.
pub fn key_from(key: &keyboard::Key) -> Key {
    match key {
        keyboard::Key::Named(keyboard::key::Named::Space) => Key::Space,
        keyboard::Key::Named(keyboard::key::Named::Enter) => Key::Enter,
        keyboard::Key::Named(keyboard::key::Named::Escape) => Key::Escape,
        keyboard::Key::Character(c) if c.as_str() == " " => Key::Space,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Point;

    #[test]
    fn left_click_is_a_page_click() {
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        assert_eq!(input_from_event(&event), Some(InputEvent::PageClick));

        let right = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right));
        assert_eq!(input_from_event(&right), None);
    }

    #[test]
    fn wheel_and_touch_drag_map_to_scroll_gestures() {
        let wheel = Event::Mouse(mouse::Event::WheelScrolled {
            delta: mouse::ScrollDelta::Lines { x: 0.0, y: -1.0 },
        });
        assert_eq!(input_from_event(&wheel), Some(InputEvent::Wheel));

        let drag = Event::Touch(touch::Event::FingerMoved {
            id: touch::Finger(0),
            position: Point::ORIGIN,
        });
        assert_eq!(input_from_event(&drag), Some(InputEvent::TouchMove));
    }

    #[test]
    fn cursor_moves_are_not_forwarded() {
        let event = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::ORIGIN,
        });
        assert_eq!(input_from_event(&event), None);
    }

    #[test]
    fn named_keys_map_to_curtain_keys() {
        use keyboard::key::Named;

        assert_eq!(key_from(&keyboard::Key::Named(Named::Space)), Key::Space);
        assert_eq!(key_from(&keyboard::Key::Named(Named::Enter)), Key::Enter);
        assert_eq!(key_from(&keyboard::Key::Named(Named::Escape)), Key::Escape);
        assert_eq!(key_from(&keyboard::Key::Named(Named::Tab)), Key::Other);
        assert_eq!(key_from(&keyboard::Key::Character("a".into())), Key::Other);
    }
}
