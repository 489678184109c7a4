//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! It provides enums and structs for representing the state of input devices.

use std::collections::HashMap;

/// An abstract player action. The host decides which key or button drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Walk along the view direction
    MoveForward,
    /// Walk against the view direction
    MoveBackward,
    /// Strafe left
    MoveLeft,
    /// Strafe right
    MoveRight,
    /// Jump off the ground
    Jump,
    /// Hold to move faster
    Sprint,
    /// Remove the block under the crosshair
    BreakBlock,
    /// Place a block against the block under the crosshair
    PlaceBlock,
}

impl InputAction {
    /// Every action, in declaration order.
    pub const ALL: [InputAction; 8] = [
        InputAction::MoveForward,
        InputAction::MoveBackward,
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Jump,
        InputAction::Sprint,
        InputAction::BreakBlock,
        InputAction::PlaceBlock,
    ];
}

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Determines if the input was just released this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from the previous and current down states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed input states with state transitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedInputState {
    /// Current state of every action
    pub action_states: HashMap<InputAction, RawInputState>,

    /// Mouse movement accumulated since the last frame (x, y), in pixels
    pub mouse_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the state of an action
    pub fn get_action_state(&self, action: InputAction) -> RawInputState {
        self.action_states.get(&action).copied().unwrap_or_default()
    }

    /// Whether an action is down this frame
    pub fn is_active(&self, action: InputAction) -> bool {
        self.get_action_state(action).is_active()
    }

    /// Whether an action went down this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.get_action_state(action).is_just_pressed()
    }

    /// Gets the mouse movement delta since the last frame
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_previous_and_current_state() {
        assert_eq!(RawInputState::from_raw_states(false, true), RawInputState::Pressed);
        assert_eq!(RawInputState::from_raw_states(true, true), RawInputState::Held);
        assert_eq!(RawInputState::from_raw_states(true, false), RawInputState::Released);
        assert!(!RawInputState::Released.is_active());
        assert!(RawInputState::Held.is_active());
    }

    #[test]
    fn missing_actions_read_as_not_pressed() {
        let state = ProcessedInputState::default();
        assert_eq!(
            state.get_action_state(InputAction::Jump),
            RawInputState::NotPressed
        );
    }
}
