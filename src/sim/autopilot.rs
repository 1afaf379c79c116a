//! Idle/demo mode - the AI plays the game
//!
//! Produces a [`TickInput`] from the current state so headless runs and the
//! browser's idle mode can drive the ship without a keyboard.

use super::state::{Enemy, GameState};
use super::tick::TickInput;

/// Don't chase targets closer than this (prevents left/right jitter)
const DEAD_ZONE: f32 = 4.0;

/// Pick an input for this tick.
///
/// Always fires. Lines up under the lowest enemy the ship can still reach
/// before it lands; with nothing worth chasing, drifts back to the center.
pub fn steer(state: &GameState) -> TickInput {
    let player = &state.player;
    let target_x = state
        .enemies
        .iter()
        .filter(|e| reachable(state, e))
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal))
        .map(|e| e.pos.x)
        .unwrap_or(state.playfield.width / 2.0);

    let delta = target_x - player.pos.x;
    TickInput {
        left: delta < -DEAD_ZONE,
        right: delta > DEAD_ZONE,
        fire: true,
    }
}

/// Whether the ship can get under `enemy` before it reaches the ship's row
fn reachable(state: &GameState, enemy: &Enemy) -> bool {
    let player = &state.player;
    let gap = (player.pos.y - player.half_size().y) - (enemy.pos.y + enemy.half_size().y);
    if gap <= 0.0 || enemy.speed <= 0.0 {
        return false;
    }
    let time_to_land = gap / enemy.speed;
    (enemy.pos.x - player.pos.x).abs() <= player.speed * time_to_land
}
