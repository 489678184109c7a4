//! # Input Manager
//!
//! This module turns the host's raw "action is down" reports into per-frame transitions:
//! - Action state tracking across frames
//! - Mouse motion accumulation
//! - Input state management

use std::collections::HashMap;

use super::input_state::{InputAction, ProcessedInputState, RawInputState};

/// Tracks the state of every input action between frames.
///
/// The host reports actions as they go down or up with [`InputManager::set_action`]
/// and mouse motion with [`InputManager::intake_mouse_motion`]. Once per frame
/// [`InputManager::get_and_reset_processed_input`] yields the transitions.
#[derive(Debug, Clone)]
pub struct InputManager {
    /// State of every action at the end of the previous frame
    action_inputs_old: HashMap<InputAction, bool>,
    /// Current state of every action
    action_inputs_new: HashMap<InputAction, bool>,
    /// Mouse movement accumulated during this frame
    mouse_delta: Option<(f64, f64)>,
}

impl InputManager {
    /// Creates a new InputManager with every action released.
    pub fn new() -> Self {
        let mut action_inputs_old = HashMap::new();
        let mut action_inputs_new = HashMap::new();
        for action in InputAction::ALL {
            action_inputs_old.insert(action, false);
            action_inputs_new.insert(action, false);
        }

        Self {
            action_inputs_old,
            action_inputs_new,
            mouse_delta: None,
        }
    }

    /// Records whether an action is currently down.
    pub fn set_action(&mut self, action: InputAction, down: bool) {
        self.action_inputs_new.insert(action, down);
    }

    /// Adds mouse movement, in pixels. Motion reported several times in one frame is
    /// summed.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta = Some(match self.mouse_delta {
            Some((x, y)) => (x + delta.0, y + delta.1),
            None => delta,
        });
    }

    /// Creates a processed input state from the current raw boolean states.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let action_states = self
            .action_inputs_new
            .iter()
            .map(|(action, &new_state)| {
                let old_state = self.action_inputs_old.get(action).copied().unwrap_or(false);
                (*action, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            action_states,
            mouse_delta: self.mouse_delta,
        }
    }

    /// Returns the processed input state and prepares for the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.move_old_states();
        self.mouse_delta = None;
        processed_input
    }

    /// Releases every action, e.g. when the window loses focus, so no key stays stuck.
    pub fn reset_inputs(&mut self) {
        for state in self.action_inputs_new.values_mut() {
            *state = false;
        }
        self.mouse_delta = None;
    }

    fn move_old_states(&mut self) {
        for (action, new_state) in self.action_inputs_new.iter() {
            self.action_inputs_old.insert(*action, *new_state);
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_hold_release_cycle() {
        let mut input = InputManager::new();

        input.set_action(InputAction::BreakBlock, true);
        let frame = input.get_and_reset_processed_input();
        assert!(frame.is_just_pressed(InputAction::BreakBlock));

        let frame = input.get_and_reset_processed_input();
        assert_eq!(frame.get_action_state(InputAction::BreakBlock), RawInputState::Held);

        input.set_action(InputAction::BreakBlock, false);
        let frame = input.get_and_reset_processed_input();
        assert!(frame
            .get_action_state(InputAction::BreakBlock)
            .is_just_released());

        let frame = input.get_and_reset_processed_input();
        assert_eq!(
            frame.get_action_state(InputAction::BreakBlock),
            RawInputState::NotPressed
        );
    }

    #[test]
    fn mouse_motion_is_summed_per_frame() {
        let mut input = InputManager::new();
        input.intake_mouse_motion((2.0, -1.0));
        input.intake_mouse_motion((3.0, 4.0));

        let frame = input.get_and_reset_processed_input();
        assert_eq!(frame.get_mouse_delta(), Some((5.0, 3.0)));
        assert_eq!(input.get_and_reset_processed_input().get_mouse_delta(), None);
    }

    #[test]
    fn reset_releases_everything() {
        let mut input = InputManager::new();
        input.set_action(InputAction::MoveForward, true);
        input.get_and_reset_processed_input();

        input.reset_inputs();
        let frame = input.get_and_reset_processed_input();
        assert!(frame
            .get_action_state(InputAction::MoveForward)
            .is_just_released());
    }
}
