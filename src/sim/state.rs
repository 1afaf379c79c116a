//! Game state and core simulation types
//!
//! Everything the simulation step reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::Playfield;
use crate::tuning::Tuning;

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Full width/height
    pub size: Vec2,
    /// Horizontal speed (pixels/sec)
    pub speed: f32,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
}

impl Player {
    pub fn new(playfield: &Playfield, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                playfield.width / 2.0,
                playfield.height - tuning.player_bottom_offset,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            cooldown: 0.0,
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Keep the ship fully inside the playfield horizontally
    pub fn clamp_to(&mut self, playfield: &Playfield) {
        let half_w = self.size.x / 2.0;
        let max_x = playfield.width - half_w;
        self.pos.x = if max_x < half_w {
            // Playfield narrower than the ship
            playfield.width / 2.0
        } else {
            self.pos.x.clamp(half_w, max_x)
        };
    }
}

/// A player projectile (moves straight up)
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub radius: f32,
    /// Upward speed (pixels/sec)
    pub speed: f32,
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Center position
    pub pos: Vec2,
    /// Full width/height
    pub size: Vec2,
    /// Downward speed (pixels/sec)
    pub speed: f32,
}

impl Enemy {
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Balance values
    pub tuning: Tuning,
    /// Current playfield; resized from outside, read-only to the step
    pub playfield: Playfield,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    /// False once an enemy reaches the player; only `restart` clears it
    pub alive: bool,
    /// Seconds since the last enemy spawn
    pub spawn_timer: f32,
    /// Simulation steps taken this session (diagnostics)
    pub time_ticks: u64,
    /// Enemies destroyed this session (diagnostics)
    pub kills: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64, playfield: Playfield) -> Self {
        Self::with_tuning(seed, playfield, Tuning::default())
    }

    pub fn with_tuning(seed: u64, playfield: Playfield, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&playfield, &tuning),
            tuning,
            playfield,
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            alive: true,
            spawn_timer: 0.0,
            time_ticks: 0,
            kills: 0,
        }
    }

    /// Start a new session after death.
    ///
    /// Does nothing while alive and returns false. Player height and size are
    /// left alone; only the horizontal position is re-centered.
    pub fn restart(&mut self) -> bool {
        if self.alive {
            return false;
        }
        log::info!(
            "Restarting (previous session: score {}, {} kills, {} ticks)",
            self.score,
            self.kills,
            self.time_ticks
        );
        self.bullets.clear();
        self.enemies.clear();
        self.score = 0;
        self.alive = true;
        self.player.pos.x = self.playfield.width / 2.0;
        self.player.cooldown = 0.0;
        self.spawn_timer = 0.0;
        self.time_ticks = 0;
        self.kills = 0;
        true
    }

    /// Adopt a new playfield size. Entities are not moved.
    pub fn set_playfield(&mut self, playfield: Playfield) {
        self.playfield = playfield;
    }

    /// Spawn one enemy just above the top edge at a random column
    pub fn spawn_enemy(&mut self) {
        let size = Vec2::new(self.tuning.enemy_width, self.tuning.enemy_height);
        let span = self.playfield.width - 2.0 * size.x;
        let x = if span > 0.0 {
            self.rng.random::<f32>() * span + size.x
        } else {
            self.playfield.width / 2.0
        };
        let roll: f32 = self.rng.random();
        let speed = self.tuning.enemy_speed(roll, self.score);
        log::debug!("Spawned enemy at x={x:.1} speed={speed:.1}");
        self.enemies.push(Enemy {
            pos: Vec2::new(x, -size.y),
            size,
            speed,
        });
    }

    /// Spawn a bullet just above the player's nose
    pub fn spawn_bullet(&mut self) {
        self.bullets.push(Bullet {
            pos: Vec2::new(
                self.player.pos.x,
                self.player.pos.y - self.tuning.bullet_spawn_offset,
            ),
            radius: self.tuning.bullet_radius,
            speed: self.tuning.bullet_speed,
        });
    }
}
