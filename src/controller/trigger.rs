//! # Control Trigger
//!
//! Pushes a [`ControlFeature`] into a [`ControllerSink`].
//!
//! Axes are written every frame. Buttons are edge-triggered: a button is
//! pressed once on the frame its input turns on and released once on the
//! frame it turns off. Holding an input does not repeat the press.
//!
//! | Feature | Sink call |
//! |---------|-----------|
//! | `right_pressure - left_pressure` | `steer` |
//! | `throttle_pressure` | `throttle` |
//! | `brake_pressure` | `brake` |
//! | `handbrake_active` | configured button, on edges only |

use tracing::debug;

use super::feature::ControlFeature;
use super::sink::{Button, ControllerSink};

/// Direction of a button state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Pressed,
    Released,
}

/// Press state of a single digital input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeLatch {
    pressed: bool,
}

impl EdgeLatch {
    #[must_use]
    pub fn is_pressed(self) -> bool {
        self.pressed
    }

    /// Records the new level and reports the edge, if any.
    pub fn update(&mut self, pressed: bool) -> Option<ButtonEdge> {
        if self.pressed == pressed {
            return None;
        }
        self.pressed = pressed;
        Some(if pressed {
            ButtonEdge::Pressed
        } else {
            ButtonEdge::Released
        })
    }
}

/// Last known state of every button.
#[derive(Debug, Clone, Default)]
pub struct ButtonEdgeState {
    pressed: [EdgeLatch; Button::COUNT],
}

impl ButtonEdgeState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `button` is currently held.
    #[must_use]
    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()].is_pressed()
    }

    /// Records the new state and reports the edge, if any.
    pub fn update(&mut self, button: Button, pressed: bool) -> Option<ButtonEdge> {
        self.pressed[button.index()].update(pressed)
    }
}

/// Maps features onto controller calls.
///
/// # Examples
///
/// ```
/// use pose_drive::controller::feature::ControlFeature;
/// use pose_drive::controller::sink::{Button, LoggingSink};
/// use pose_drive::controller::trigger::ControlTrigger;
///
/// let mut trigger = ControlTrigger::new(Button::A);
/// let mut sink = LoggingSink::new();
///
/// let feature = ControlFeature { right_pressure: 0.5, throttle_pressure: 1.0, ..Default::default() };
/// trigger.trigger(&feature, &mut sink);
/// assert_eq!(sink.axes(), (0.5, 1.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct ControlTrigger {
    handbrake_button: Button,
    buttons: ButtonEdgeState,
}

impl ControlTrigger {
    /// Creates a trigger that drives `handbrake_button` from the handbrake
    /// gesture.
    #[must_use]
    pub fn new(handbrake_button: Button) -> Self {
        Self {
            handbrake_button,
            buttons: ButtonEdgeState::new(),
        }
    }

    #[must_use]
    pub fn handbrake_button(&self) -> Button {
        self.handbrake_button
    }

    #[must_use]
    pub fn buttons(&self) -> &ButtonEdgeState {
        &self.buttons
    }

    /// Writes one frame of controls to the sink.
    pub fn trigger(&mut self, feature: &ControlFeature, sink: &mut dyn ControllerSink) {
        sink.steer(feature.steer_axis());
        sink.throttle(feature.throttle_pressure);
        sink.brake(feature.brake_pressure);
        self.set_button(self.handbrake_button, feature.handbrake_active, sink);
    }

    /// Sets a button level, emitting a press or release only on change.
    pub fn set_button(&mut self, button: Button, pressed: bool, sink: &mut dyn ControllerSink) {
        match self.buttons.update(button, pressed) {
            Some(ButtonEdge::Pressed) => {
                debug!("Button {} pressed", button);
                sink.press_button(button);
            }
            Some(ButtonEdge::Released) => {
                debug!("Button {} released", button);
                sink.release_button(button);
            }
            None => {}
        }
    }

    /// Releases every held button and zeroes the axes.
    pub fn release_all(&mut self, sink: &mut dyn ControllerSink) {
        for button in Button::ALL {
            self.set_button(button, false, sink);
        }
        sink.steer(0.0);
        sink.throttle(0.0);
        sink.brake(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::sink::MockControllerSink;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn sink_ignoring_axes() -> MockControllerSink {
        let mut sink = MockControllerSink::new();
        sink.expect_steer().return_const(());
        sink.expect_throttle().return_const(());
        sink.expect_brake().return_const(());
        sink
    }

    // ==================== Edge State Tests ====================

    #[test]
    fn test_edge_state_sequence() {
        let mut state = ButtonEdgeState::new();
        let inputs = [false, false, true, true, false];
        let edges: Vec<_> = inputs
            .iter()
            .map(|&pressed| state.update(Button::X, pressed))
            .collect();

        assert_eq!(
            edges,
            vec![None, None, Some(ButtonEdge::Pressed), None, Some(ButtonEdge::Released)]
        );
    }

    #[test]
    fn test_edge_state_buttons_independent() {
        let mut state = ButtonEdgeState::new();
        state.update(Button::A, true);
        assert!(state.is_pressed(Button::A));
        assert!(!state.is_pressed(Button::B));
        assert_eq!(state.update(Button::B, true), Some(ButtonEdge::Pressed));
    }

    // ==================== Trigger Tests ====================

    #[test]
    fn test_trigger_writes_axes() {
        let mut sink = MockControllerSink::new();
        sink.expect_steer().with(eq(-0.25)).times(1).return_const(());
        sink.expect_throttle().with(eq(0.0)).times(1).return_const(());
        sink.expect_brake().with(eq(0.5)).times(1).return_const(());
        sink.expect_press_button().never();

        let feature = ControlFeature {
            left_pressure: 0.5,
            right_pressure: 0.25,
            brake_pressure: 0.5,
            ..Default::default()
        };
        ControlTrigger::new(Button::A).trigger(&feature, &mut sink);
    }

    #[test]
    fn test_handbrake_edges_once() {
        let mut sink = sink_ignoring_axes();
        let mut seq = Sequence::new();
        sink.expect_press_button()
            .with(eq(Button::B))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_release_button()
            .with(eq(Button::B))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut trigger = ControlTrigger::new(Button::B);
        let mut feature = ControlFeature::default();
        for held in [false, false, true, true, false] {
            feature.handbrake_active = held;
            trigger.trigger(&feature, &mut sink);
        }
    }

    #[test]
    fn test_release_all_only_held_buttons() {
        let mut sink = sink_ignoring_axes();
        sink.expect_press_button().times(2).return_const(());
        sink.expect_release_button().with(eq(Button::Y)).times(1).return_const(());
        sink.expect_release_button().with(eq(Button::DpadUp)).times(1).return_const(());

        let mut trigger = ControlTrigger::new(Button::A);
        trigger.set_button(Button::Y, true, &mut sink);
        trigger.set_button(Button::DpadUp, true, &mut sink);
        trigger.release_all(&mut sink);

        assert!(!trigger.buttons().is_pressed(Button::Y));
        assert!(!trigger.buttons().is_pressed(Button::DpadUp));
    }

    #[test]
    fn test_release_all_idle_is_quiet() {
        let mut sink = sink_ignoring_axes();
        sink.expect_press_button().never();
        sink.expect_release_button().never();

        ControlTrigger::new(Button::A).release_all(&mut sink);
    }
}
