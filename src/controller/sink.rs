//! # Controller Sink
//!
//! The narrow interface through which control values leave the crate.
//!
//! A sink stands in for a virtual gamepad or keyboard emitter. The crate
//! never talks to HID drivers itself.
//!
//! | Call | Range | Frequency |
//! |------|-------|-----------|
//! | `steer` | -1.0 to 1.0 | every frame |
//! | `throttle` | 0.0 to 1.0 | every frame |
//! | `brake` | 0.0 to 1.0 | every frame |
//! | `press_button` | - | once per rising edge |
//! | `release_button` | - | once per falling edge |
//! | `release_all` | - | once at shutdown |

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Buttons of an XInput-style pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    A,
    B,
    X,
    Y,
    Start,
    Back,
    Guide,
}

impl Button {
    /// Number of buttons.
    pub const COUNT: usize = 11;

    /// All buttons in declaration order.
    pub const ALL: [Button; Self::COUNT] = [
        Button::DpadUp,
        Button::DpadDown,
        Button::DpadLeft,
        Button::DpadRight,
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::Start,
        Button::Back,
        Button::Guide,
    ];

    /// Dense index of the button, `0..COUNT`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Button::DpadUp => "dpad_up",
            Button::DpadDown => "dpad_down",
            Button::DpadLeft => "dpad_left",
            Button::DpadRight => "dpad_right",
            Button::A => "a",
            Button::B => "b",
            Button::X => "x",
            Button::Y => "y",
            Button::Start => "start",
            Button::Back => "back",
            Button::Guide => "guide",
        };
        f.write_str(name)
    }
}

/// Receives axis values and button edges.
#[cfg_attr(test, mockall::automock)]
pub trait ControllerSink {
    /// Steering axis, -1.0 (full left) to 1.0 (full right).
    fn steer(&mut self, value: f64);

    /// Throttle trigger, 0.0 to 1.0.
    fn throttle(&mut self, value: f64);

    /// Brake trigger, 0.0 to 1.0.
    fn brake(&mut self, value: f64);

    /// A button went down.
    fn press_button(&mut self, button: Button);

    /// A button came up.
    fn release_button(&mut self, button: Button);

    /// Drops anything the sink itself still holds. Called once at shutdown.
    fn release_all(&mut self) {}
}

/// Sink that only logs, for running without a virtual controller.
///
/// Axes go to `trace!`, button edges to `debug!`.
#[derive(Debug, Default, Clone)]
pub struct LoggingSink {
    steer: f64,
    throttle: f64,
    brake: f64,
}

impl LoggingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last `(steer, throttle, brake)` received.
    #[must_use]
    pub fn axes(&self) -> (f64, f64, f64) {
        (self.steer, self.throttle, self.brake)
    }
}

impl ControllerSink for LoggingSink {
    fn steer(&mut self, value: f64) {
        self.steer = value;
        trace!(value, "steer");
    }

    fn throttle(&mut self, value: f64) {
        self.throttle = value;
        trace!(value, "throttle");
    }

    fn brake(&mut self, value: f64) {
        self.brake = value;
        trace!(value, "brake");
    }

    fn press_button(&mut self, button: Button) {
        debug!("Press {}", button);
    }

    fn release_button(&mut self, button: Button) {
        debug!("Release {}", button);
    }
}
