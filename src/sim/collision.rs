//! Collision tests for the shooter
//!
//! All shapes are axis-aligned. Positions are centers; sizes are full
//! width/height.

use glam::Vec2;

use super::state::{Bullet, Enemy, Player};

/// Whether an enemy has reached the player.
///
/// Vertically this only checks that the enemy's lower edge is at or past the
/// player's upper edge; an enemy that has slipped below the ship still
/// counts. Horizontally the centers must be closer than half the summed
/// widths.
pub fn enemy_hits_player(enemy: &Enemy, player: &Player) -> bool {
    let enemy_bottom = enemy.pos.y + enemy.size.y / 2.0;
    let player_top = player.pos.y - player.size.y / 2.0;
    enemy_bottom >= player_top
        && (enemy.pos.x - player.pos.x).abs() < (enemy.size.x + player.size.x) / 2.0
}

/// Strict point-in-rectangle test (points on the border are outside)
pub fn point_in_rect(point: Vec2, center: Vec2, size: Vec2) -> bool {
    let half = size / 2.0;
    point.x > center.x - half.x
        && point.x < center.x + half.x
        && point.y > center.y - half.y
        && point.y < center.y + half.y
}

/// Bullets are treated as points at their center; the radius is ignored
pub fn bullet_hits_enemy(bullet: &Bullet, enemy: &Enemy) -> bool {
    point_in_rect(bullet.pos, enemy.pos, enemy.size)
}
