//! Keyboard input: key codes, modifier masks, events and the held-key table

use bitflags::bitflags;

/// Size of the held-key table
pub const MAX_KEYCODES: usize = 512;

/// Platform-neutral key code (values follow the common GLFW/sokol numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(32);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const P: KeyCode = KeyCode(80);
    pub const Q: KeyCode = KeyCode(81);
    pub const S: KeyCode = KeyCode(83);
    pub const W: KeyCode = KeyCode(87);
    pub const RIGHT: KeyCode = KeyCode(262);
    pub const LEFT: KeyCode = KeyCode(263);
    pub const DOWN: KeyCode = KeyCode(264);
    pub const UP: KeyCode = KeyCode(265);
    pub const F1: KeyCode = KeyCode(290);
}

bitflags! {
    /// Modifier keys held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 0x1;
        const CTRL = 0x2;
        const ALT = 0x4;
        const SUPER = 0x8;
    }
}

/// Discrete input delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
        repeat: bool,
    },
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },
    /// Window close / platform quit signal
    QuitRequested,
}

impl InputEvent {
    pub fn key_down(key: KeyCode) -> Self {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::empty(),
            repeat: false,
        }
    }

    pub fn key_up(key: KeyCode) -> Self {
        InputEvent::KeyUp {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Cmd-Q / Ctrl-Q
    pub fn is_quit_chord(&self) -> bool {
        match *self {
            InputEvent::KeyDown { key, modifiers, .. } => {
                key == KeyCode::Q && modifiers.intersects(Modifiers::SUPER | Modifiers::CTRL)
            }
            InputEvent::QuitRequested => true,
            InputEvent::KeyUp { .. } => false,
        }
    }
}

/// Held-key table. Written by event delivery, read by the simulation.
#[derive(Clone, Copy)]
pub struct InputState {
    held: [bool; MAX_KEYCODES],
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            held: [false; MAX_KEYCODES],
        }
    }
}

impl std::fmt::Debug for InputState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let held: Vec<usize> = (0..MAX_KEYCODES).filter(|&i| self.held[i]).collect();
        f.debug_struct("InputState").field("held", &held).finish()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` held. Returns true if it was previously up.
    pub fn press(&mut self, key: KeyCode) -> bool {
        match self.held.get_mut(key.0 as usize) {
            Some(slot) => !std::mem::replace(slot, true),
            None => false,
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        if let Some(slot) = self.held.get_mut(key.0 as usize) {
            *slot = false;
        }
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.held.get(key.0 as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::new();
        assert!(input.press(KeyCode::LEFT));
        assert!(!input.press(KeyCode::LEFT), "second press is a repeat");
        assert!(input.is_down(KeyCode::LEFT));
        input.release(KeyCode::LEFT);
        assert!(!input.is_down(KeyCode::LEFT));
    }

    #[test]
    fn test_out_of_range_key_ignored() {
        let mut input = InputState::new();
        let bogus = KeyCode(9000);
        assert!(!input.press(bogus));
        assert!(!input.is_down(bogus));
        input.release(bogus);
    }

    #[test]
    fn test_quit_chord() {
        let cmd_q = InputEvent::KeyDown {
            key: KeyCode::Q,
            modifiers: Modifiers::SUPER,
            repeat: false,
        };
        assert!(cmd_q.is_quit_chord());
        assert!(!InputEvent::key_down(KeyCode::Q).is_quit_chord());
        assert!(InputEvent::QuitRequested.is_quit_chord());
    }
}
