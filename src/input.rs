//! Keyboard state
//!
//! Key events arrive on their own path (DOM listeners) and only update the
//! held set. The simulation reads a [`TickInput`] snapshot once per frame, so
//! there is no event queue and no replay: the last known state wins.

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Restart,
}

const ACTION_COUNT: usize = 4;

impl Action {
    /// Map a `KeyboardEvent.code` to an action and the binding slot it occupies
    fn binding(code: &str) -> Option<(Action, u8)> {
        match code {
            "ArrowLeft" => Some((Action::MoveLeft, 0)),
            "KeyA" => Some((Action::MoveLeft, 1)),
            "ArrowRight" => Some((Action::MoveRight, 0)),
            "KeyD" => Some((Action::MoveRight, 1)),
            "Space" => Some((Action::Fire, 0)),
            "KeyK" => Some((Action::Fire, 1)),
            "KeyR" => Some((Action::Restart, 0)),
            _ => None,
        }
    }

    pub fn from_key_code(code: &str) -> Option<Action> {
        Self::binding(code).map(|(action, _)| action)
    }

    const fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Fire => 2,
            Action::Restart => 3,
        }
    }
}

/// Currently held actions.
///
/// Each action keeps one bit per physical key bound to it, so letting go of
/// `KeyA` while `ArrowLeft` is still down keeps `MoveLeft` held.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    held: [u8; ACTION_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; returns the action it maps to, if any
    pub fn press(&mut self, code: &str) -> Option<Action> {
        let (action, slot) = Action::binding(code)?;
        self.held[action.index()] |= 1 << slot;
        Some(action)
    }

    /// Record a key release; returns the action it maps to, if any
    pub fn release(&mut self, code: &str) -> Option<Action> {
        let (action, slot) = Action::binding(code)?;
        self.held[action.index()] &= !(1 << slot);
        Some(action)
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()] != 0
    }

    /// Drop everything (window lost focus, key-ups will never arrive)
    pub fn clear(&mut self) {
        self.held = [0; ACTION_COUNT];
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_held(Action::MoveLeft),
            right: self.is_held(Action::MoveRight),
            fire: self.is_held(Action::Fire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key_code("ArrowLeft"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key_code("KeyA"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key_code("ArrowRight"), Some(Action::MoveRight));
        assert_eq!(Action::from_key_code("KeyD"), Some(Action::MoveRight));
        assert_eq!(Action::from_key_code("Space"), Some(Action::Fire));
        assert_eq!(Action::from_key_code("KeyK"), Some(Action::Fire));
        assert_eq!(Action::from_key_code("KeyR"), Some(Action::Restart));
        assert_eq!(Action::from_key_code("KeyQ"), None);
        // Codes are case sensitive, like the DOM's
        assert_eq!(Action::from_key_code("keya"), None);
    }

    #[test]
    fn test_press_release() {
        let mut input = InputState::new();
        assert_eq!(input.press("Space"), Some(Action::Fire));
        assert!(input.is_held(Action::Fire));
        assert!(input.snapshot().fire);

        input.release("Space");
        assert!(!input.is_held(Action::Fire));
        assert_eq!(input.press("Escape"), None);
    }

    #[test]
    fn test_two_keys_one_action() {
        let mut input = InputState::new();
        input.press("ArrowLeft");
        input.press("KeyA");
        input.release("KeyA");
        assert!(input.is_held(Action::MoveLeft));
        input.release("ArrowLeft");
        assert!(!input.is_held(Action::MoveLeft));
    }

    #[test]
    fn test_snapshot_both_directions() {
        let mut input = InputState::new();
        input.press("KeyA");
        input.press("KeyD");
        let snap = input.snapshot();
        assert!(snap.left && snap.right);
        assert!(!snap.fire);
    }

    #[test]
    fn test_clear() {
        let mut input = InputState::new();
        for code in ["ArrowLeft", "KeyD", "KeyK", "KeyR"] {
            input.press(code);
        }
        input.clear();
        assert!(
            [Action::MoveLeft, Action::MoveRight, Action::Fire, Action::Restart]
                .iter()
                .all(|a| !input.is_held(*a))
        );
    }
}
