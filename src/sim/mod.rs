//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - Time only enters as a `dt` argument
//! - Seeded RNG only
//! - Input only enters as a `TickInput` snapshot

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{bullet_hits_enemy, enemy_hits_player, point_in_rect};
pub use state::{Bullet, Enemy, GameState, Player};
pub use tick::{TickInput, cull_offscreen_enemies, resolve_collisions, tick};
