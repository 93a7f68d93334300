//! # Keyboard Sink
//!
//! Drives a game through plain key presses instead of a virtual pad.
//!
//! Each continuous axis becomes a digital key: the key goes down once the
//! axis leaves the neutral threshold and comes up when it returns. Keys are
//! only emitted on changes, so a held turn produces one press.
//!
//! | Axis | Key (default) | Down when |
//! |------|---------------|-----------|
//! | steer < 0 | `a` | `|steer| >= threshold` |
//! | steer > 0 | `d` | `|steer| >= threshold` |
//! | throttle | `w` | `throttle >= threshold` |
//! | brake | `s` | `brake >= threshold` |
//!
//! The actual key emission goes through a [`KeyEmitter`]; the bundled
//! [`TracingKeyEmitter`] only logs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sink::{Button, ControllerSink};
use super::trigger::{ButtonEdge, EdgeLatch};

/// Axis magnitude below which a key is considered up.
pub const TRIGGER_THRESHOLD: f64 = 0.0001;

/// Digital inputs derived from the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    SteerLeft,
    SteerRight,
    Throttle,
    Brake,
}

impl KeyAction {
    pub const COUNT: usize = 4;

    pub const ALL: [KeyAction; Self::COUNT] = [
        KeyAction::SteerLeft,
        KeyAction::SteerRight,
        KeyAction::Throttle,
        KeyAction::Brake,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Keys bound to each action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "default_left_key")]
    pub left: String,

    #[serde(default = "default_right_key")]
    pub right: String,

    #[serde(default = "default_throttle_key")]
    pub throttle: String,

    #[serde(default = "default_brake_key")]
    pub brake: String,
}

fn default_left_key() -> String { "a".to_string() }
fn default_right_key() -> String { "d".to_string() }
fn default_throttle_key() -> String { "w".to_string() }
fn default_brake_key() -> String { "s".to_string() }

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            left: default_left_key(),
            right: default_right_key(),
            throttle: default_throttle_key(),
            brake: default_brake_key(),
        }
    }
}

impl KeyMap {
    /// Key bound to `action`.
    #[must_use]
    pub fn key(&self, action: KeyAction) -> &str {
        match action {
            KeyAction::SteerLeft => &self.left,
            KeyAction::SteerRight => &self.right,
            KeyAction::Throttle => &self.throttle,
            KeyAction::Brake => &self.brake,
        }
    }
}

/// Emits key transitions to the OS (or wherever).
#[cfg_attr(test, mockall::automock)]
pub trait KeyEmitter {
    fn key_down(&mut self, key: &str);
    fn key_up(&mut self, key: &str);
}

/// Emitter that writes key transitions to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingKeyEmitter;

impl KeyEmitter for TracingKeyEmitter {
    fn key_down(&mut self, key: &str) {
        debug!("Key down '{}'", key);
    }

    fn key_up(&mut self, key: &str) {
        debug!("Key up '{}'", key);
    }
}

/// A [`ControllerSink`] that maps axes onto edge-triggered keys.
///
/// # Examples
///
/// ```
/// use pose_drive::controller::keyboard::{KeyAction, KeyMap, KeyboardSink};
/// use pose_drive::controller::ControllerSink;
///
/// let mut sink = KeyboardSink::new(KeyMap::default());
/// sink.steer(-0.4);
/// assert!(sink.is_held(KeyAction::SteerLeft));
///
/// sink.release_all();
/// assert!(!sink.is_held(KeyAction::SteerLeft));
/// ```
#[derive(Debug)]
pub struct KeyboardSink<E = TracingKeyEmitter> {
    keys: KeyMap,
    held: [EdgeLatch; KeyAction::COUNT],
    emitter: E,
}

impl KeyboardSink {
    /// Creates a sink that logs its key transitions.
    #[must_use]
    pub fn new(keys: KeyMap) -> Self {
        Self::with_emitter(keys, TracingKeyEmitter)
    }
}

impl<E: KeyEmitter> KeyboardSink<E> {
    /// Creates a sink that sends key transitions to `emitter`.
    pub fn with_emitter(keys: KeyMap, emitter: E) -> Self {
        Self {
            keys,
            held: [EdgeLatch::default(); KeyAction::COUNT],
            emitter,
        }
    }

    #[must_use]
    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    #[must_use]
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Whether the key for `action` is currently down.
    #[must_use]
    pub fn is_held(&self, action: KeyAction) -> bool {
        self.held[action.index()].is_pressed()
    }

    fn set(&mut self, action: KeyAction, pressed: bool) {
        let key = self.keys.key(action);
        match self.held[action.index()].update(pressed) {
            Some(ButtonEdge::Pressed) => self.emitter.key_down(key),
            Some(ButtonEdge::Released) => self.emitter.key_up(key),
            None => {}
        }
    }
}

/// Whether an axis value counts as "on". NaN is off.
fn engaged(value: f64) -> bool {
    value >= TRIGGER_THRESHOLD
}

impl<E: KeyEmitter> ControllerSink for KeyboardSink<E> {
    fn steer(&mut self, value: f64) {
        if value.is_nan() || value.abs() < TRIGGER_THRESHOLD {
            self.set(KeyAction::SteerLeft, false);
            self.set(KeyAction::SteerRight, false);
        } else if value < 0.0 {
            // Release the opposite side first so both are never down together
            self.set(KeyAction::SteerRight, false);
            self.set(KeyAction::SteerLeft, true);
        } else {
            self.set(KeyAction::SteerLeft, false);
            self.set(KeyAction::SteerRight, true);
        }
    }

    fn throttle(&mut self, value: f64) {
        self.set(KeyAction::Throttle, engaged(value));
    }

    fn brake(&mut self, value: f64) {
        self.set(KeyAction::Brake, engaged(value));
    }

    fn press_button(&mut self, button: Button) {
        debug!("No key bound to button {}", button);
    }

    fn release_button(&mut self, button: Button) {
        debug!("No key bound to button {}", button);
    }

    fn release_all(&mut self) {
        for action in KeyAction::ALL {
            self.set(action, false);
        }
    }
}
