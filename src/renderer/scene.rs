//! Scene assembly
//!
//! Projects a [`GameState`] into a flat triangle list in playfield pixels.
//! Pure: reads the state, never writes it.

use glam::Vec2;

use super::shapes::{circle, rect};
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

/// Segments per bullet circle
const BULLET_SEGMENTS: u32 = 12;
/// Gun block on top of the ship
const GUN_SIZE: f32 = 8.0;

/// Build every vertex for one frame, back to front
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let playfield = Vec2::new(state.playfield.width, state.playfield.height);
    let mut vertices = Vec::with_capacity(
        12 + 12
            + state.bullets.len() * (BULLET_SEGMENTS as usize * 3)
            + state.enemies.len() * 6,
    );

    // Background
    vertices.extend(rect(playfield / 2.0, playfield, colors::BACKGROUND));

    // Player body and gun
    let player = &state.player;
    vertices.extend(rect(player.pos, player.size, colors::PLAYER));
    let gun_center = Vec2::new(
        player.pos.x,
        player.pos.y - player.half_size().y - GUN_SIZE / 2.0,
    );
    vertices.extend(rect(gun_center, Vec2::splat(GUN_SIZE), colors::PLAYER_GUN));

    for bullet in &state.bullets {
        vertices.extend(circle(bullet.pos, bullet.radius, colors::BULLET, BULLET_SEGMENTS));
    }

    for enemy in &state.enemies {
        vertices.extend(rect(enemy.pos, enemy.size, colors::ENEMY));
    }

    // Game over dimming (message text lives in the HUD)
    if !state.alive {
        vertices.extend(rect(playfield / 2.0, playfield, colors::OVERLAY));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Playfield;
    use crate::sim::state::{Bullet, Enemy};

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_empty_world() {
        let state = GameState::new(1, Playfield::default());
        let vertices = build_scene(&state);
        // Background + player + gun
        assert_eq!(vertices.len(), 18);
        assert_eq!(count_color(&vertices, colors::OVERLAY), 0);
    }

    #[test]
    fn test_entities_drawn() {
        let mut state = GameState::new(1, Playfield::default());
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 100.0),
            radius: 5.0,
            speed: 480.0,
        });
        state.enemies.push(Enemy {
            pos: Vec2::new(200.0, 100.0),
            size: Vec2::new(28.0, 18.0),
            speed: 80.0,
        });
        state.enemies.push(Enemy {
            pos: Vec2::new(300.0, 100.0),
            size: Vec2::new(28.0, 18.0),
            speed: 80.0,
        });
        let vertices = build_scene(&state);
        assert_eq!(count_color(&vertices, colors::BULLET), 36);
        assert_eq!(count_color(&vertices, colors::ENEMY), 12);
    }

    #[test]
    fn test_overlay_only_when_dead() {
        let mut state = GameState::new(1, Playfield::default());
        state.alive = false;
        let vertices = build_scene(&state);
        assert_eq!(count_color(&vertices, colors::OVERLAY), 6);
        // Overlay is drawn last
        assert_eq!(vertices.last().map(|v| v.color), Some(colors::OVERLAY));
    }

    #[test]
    fn test_gun_sits_on_top_of_ship() {
        let state = GameState::new(1, Playfield::new(800.0, 600.0));
        let vertices = build_scene(&state);
        let gun_ys: Vec<f32> = vertices
            .iter()
            .filter(|v| v.color == colors::PLAYER_GUN)
            .map(|v| v.position[1])
            .collect();
        // Ship top edge at 530, gun spans 522..530
        assert!(gun_ys.iter().all(|y| (522.0..=530.0).contains(y)));
    }
}
