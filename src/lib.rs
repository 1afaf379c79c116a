//! Skyfall - A minimal vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation step (movement, firing, spawning, collisions, game over)
//! - `input`: Held-key state and per-frame input snapshots
//! - `platform`: Frame clock and playfield sizing
//! - `game`: Frame driver tying input, simulation and rendering together
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, Renderer};
pub use input::{Action, InputState};
pub use platform::{FrameClock, Playfield, fit_playfield};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest simulation step the frame driver will hand to the sim (seconds)
    pub const MAX_DT: f32 = 0.05;

    /// Reference playfield; the canvas is fitted to this aspect ratio
    pub const BASE_WIDTH: f32 = 800.0;
    pub const BASE_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 36.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 320.0;
    /// Distance from the bottom edge to the player's center
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;
    /// Seconds between shots
    pub const FIRE_INTERVAL: f32 = 0.18;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 480.0;
    /// Bullets spawn this far above the player's center
    pub const BULLET_SPAWN_OFFSET: f32 = 12.0;
    /// Bullets are dropped once their lower edge is this far above the top
    pub const BULLET_TOP_MARGIN: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 28.0;
    pub const ENEMY_HEIGHT: f32 = 18.0;
    pub const ENEMY_BASE_SPEED: f32 = 60.0;
    pub const ENEMY_RANDOM_SPEED: f32 = 120.0;
    /// Extra downward speed per point of score (uncapped)
    pub const ENEMY_SPEED_PER_SCORE: f32 = 0.2;
    /// Enemies are dropped once they are this far below the bottom
    pub const ENEMY_BOTTOM_MARGIN: f32 = 50.0;

    /// Spawn pacing: interval = max(FLOOR, BASE - score * RAMP)
    pub const SPAWN_INTERVAL_BASE: f32 = 1.2;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.45;
    pub const SPAWN_INTERVAL_PER_SCORE: f32 = 0.01;

    /// Points per destroyed enemy
    pub const KILL_SCORE: u64 = 10;
}
