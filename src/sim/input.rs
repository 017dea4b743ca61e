//! Input intent: held-key state for the player
//!
//! Raw key events are folded into a small set of held actions. Entities only
//! ever read the intent, never the events.

use serde::{Deserialize, Serialize};

/// Keys the field cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Space
    Shoot,
    /// Left shift
    Run,
    /// P
    Pause,
}

/// Debounced directional/action state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
    pub run: bool,
}

impl InputIntent {
    /// Fold a key-down (`pressed = true`) or key-up event into the held state.
    /// Pause is a screen action and is ignored here.
    pub fn handle_key(&mut self, pressed: bool, key: Key) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Shoot => self.shoot = pressed,
            Key::Run => self.run = pressed,
            Key::Pause => {}
        }
    }

    /// Unit horizontal direction. Left wins when both are held.
    pub fn direction(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }

    pub fn is_moving(&self) -> bool {
        self.left || self.right
    }

    /// Release everything (used when play resumes after a screen change)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Drives the player in the headless demo: walk under the closest front-line
/// enemy and keep the trigger held.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Half-width of the band around the target where the player stops
    pub dead_zone: f32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self { dead_zone: 8.0 }
    }

    pub fn intent(&self, player_x: f32, target_x: Option<f32>) -> InputIntent {
        let mut intent = InputIntent {
            shoot: true,
            ..Default::default()
        };
        if let Some(target) = target_x {
            let delta = target - player_x;
            if delta < -self.dead_zone {
                intent.left = true;
            } else if delta > self.dead_zone {
                intent.right = true;
            }
            intent.run = delta.abs() > 200.0;
        }
        intent
    }
}
