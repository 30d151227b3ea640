//! Activate-input debouncing
//!
//! Keyboard, pointer and touch all map to one logical "activate" signal.
//! Each source yields exactly one jump per physical press: auto-repeat while a
//! key is held, or a second down event without an up, is swallowed.

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    ArrowUp,
    Char(char),
    Other,
}

/// Raw input from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, repeat: bool },
    KeyUp { key: KeyCode },
    PointerDown,
    PointerUp,
    TouchStart,
    TouchEnd,
}

/// Edge detector for one press source
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivateButton {
    held: bool,
}

impl ActivateButton {
    /// Returns true only on an up→down transition
    pub fn press(&mut self) -> bool {
        let fresh = !self.held;
        self.held = true;
        fresh
    }

    pub fn release(&mut self) {
        self.held = false;
    }
}

/// Collected input between simulation ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keyboard: ActivateButton,
    pointer: ActivateButton,
    touch: ActivateButton,
    /// Pending one-shot jump for the next tick
    jump: bool,
    /// Idle/demo mode toggle (persists across ticks)
    autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_activate_key(key: KeyCode) -> bool {
        matches!(key, KeyCode::Space | KeyCode::ArrowUp)
    }

    /// Feed one host event
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key, repeat } if Self::is_activate_key(key) => {
                if !repeat && self.keyboard.press() {
                    self.jump = true;
                }
            }
            InputEvent::KeyDown {
                key: KeyCode::Char('i' | 'I'),
                repeat: false,
            } => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            InputEvent::KeyDown { .. } => {}
            InputEvent::KeyUp { key } if Self::is_activate_key(key) => self.keyboard.release(),
            InputEvent::KeyUp { .. } => {}
            InputEvent::PointerDown => {
                if self.pointer.press() {
                    self.jump = true;
                }
            }
            InputEvent::PointerUp => self.pointer.release(),
            InputEvent::TouchStart => {
                if self.touch.press() {
                    self.jump = true;
                }
            }
            InputEvent::TouchEnd => self.touch.release(),
        }
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Input for the next tick; clears one-shot flags
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            jump: self.jump,
            autopilot: self.autopilot,
        };
        self.jump = false;
        input
    }

    /// Peek without consuming
    pub fn peek(&self) -> TickInput {
        TickInput {
            jump: self.jump,
            autopilot: self.autopilot,
        }
    }
}
