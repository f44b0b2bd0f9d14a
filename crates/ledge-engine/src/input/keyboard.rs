//! Polled keyboard state.
//!
//! The player controller never sees events; it asks `pressed(key)` once per
//! tick through [`InputSource`], so scripted sources can stand in for the
//! browser in tests.

use std::str::FromStr;

use thiserror::Error;

use crate::input::queue::InputEvent;

/// Keys the engine binds, named after DOM `KeyboardEvent.code` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyCode {
    ArrowLeft = 0,
    ArrowRight = 1,
    ArrowUp = 2,
    ArrowDown = 3,
    KeyA = 4,
    KeyD = 5,
    KeyW = 6,
    KeyS = 7,
    KeyR = 8,
    Space = 9,
}

impl KeyCode {
    pub const COUNT: usize = 10;

    pub const ALL: [KeyCode; Self::COUNT] = [
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::KeyA,
        KeyCode::KeyD,
        KeyCode::KeyW,
        KeyCode::KeyS,
        KeyCode::KeyR,
        KeyCode::Space,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KeyCode::ArrowLeft => "ArrowLeft",
            KeyCode::ArrowRight => "ArrowRight",
            KeyCode::ArrowUp => "ArrowUp",
            KeyCode::ArrowDown => "ArrowDown",
            KeyCode::KeyA => "KeyA",
            KeyCode::KeyD => "KeyD",
            KeyCode::KeyW => "KeyW",
            KeyCode::KeyS => "KeyS",
            KeyCode::KeyR => "KeyR",
            KeyCode::Space => "Space",
        }
    }

    /// Keys whose browser default (page scroll) the host should suppress.
    pub fn prevents_default(self) -> bool {
        matches!(
            self,
            KeyCode::ArrowLeft
                | KeyCode::ArrowRight
                | KeyCode::ArrowUp
                | KeyCode::ArrowDown
                | KeyCode::Space
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unbound key code {0:?}")]
pub struct UnknownKey(pub String);

impl FromStr for KeyCode {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCode::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// Anything that can answer "is this key held right now?".
pub trait InputSource {
    fn pressed(&self, key: KeyCode) -> bool;
}

/// Held-key state built from [`InputEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: [bool; KeyCode::COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the held state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => self.held[key as usize] = true,
            InputEvent::KeyUp { key } => self.held[key as usize] = false,
            InputEvent::Blur => self.release_all(),
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn set(&mut self, key: KeyCode, down: bool) {
        self.held[key as usize] = down;
    }

    pub fn release_all(&mut self) {
        self.held = [false; KeyCode::COUNT];
    }
}

impl InputSource for Keyboard {
    fn pressed(&self, key: KeyCode) -> bool {
        self.held[key as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_key() {
        for key in KeyCode::ALL {
            assert_eq!(key.as_str().parse::<KeyCode>(), Ok(key));
        }
        assert!("Enter".parse::<KeyCode>().is_err());
    }

    #[test]
    fn all_table_matches_discriminants() {
        for (i, key) in KeyCode::ALL.iter().enumerate() {
            assert_eq!(*key as usize, i);
        }
    }

    #[test]
    fn held_state_follows_events() {
        let mut kb = Keyboard::new();
        kb.apply(&InputEvent::KeyDown { key: KeyCode::KeyD });
        assert!(kb.pressed(KeyCode::KeyD));
        assert!(!kb.pressed(KeyCode::KeyA));
        kb.apply(&InputEvent::KeyUp { key: KeyCode::KeyD });
        assert!(!kb.pressed(KeyCode::KeyD));
    }

    #[test]
    fn blur_releases_everything() {
        let mut kb = Keyboard::new();
        kb.apply_all(&[
            InputEvent::KeyDown { key: KeyCode::Space },
            InputEvent::KeyDown { key: KeyCode::ArrowLeft },
            InputEvent::Blur,
        ]);
        assert!(KeyCode::ALL.iter().all(|k| !kb.pressed(*k)));
    }

    #[test]
    fn scroll_keys_prevent_default() {
        assert!(KeyCode::Space.prevents_default());
        assert!(!KeyCode::KeyR.prevents_default());
    }
}
