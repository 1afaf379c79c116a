//! Simulation tick
//!
//! Advances the game by one step. The order of the phases matters and is
//! fixed: movement, firing, bullets, spawning, enemies, collisions, cleanup.

use super::collision::{bullet_hits_enemy, enemy_hits_player};
use super::state::GameState;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Advance the game state by `dt` seconds.
///
/// Negative or non-finite `dt` is treated as 0. The upper bound is the frame
/// driver's job; a caller stepping the sim directly gets exactly the step it
/// asks for. Once the player is dead this is a no-op until `restart`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    if !state.alive {
        return;
    }

    state.time_ticks += 1;

    move_player(state, input, dt);
    update_firing(state, input, dt);
    advance_bullets(state, dt);
    update_spawning(state, dt);
    advance_enemies(state, dt);
    resolve_collisions(state);
    cull_offscreen_enemies(state);
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let step = state.player.speed * dt;
    if input.left {
        state.player.pos.x -= step;
    }
    if input.right {
        state.player.pos.x += step;
    }
    state.player.clamp_to(&state.playfield);
}

/// Cooldown always runs down; holding fire yields at most one shot per tick
fn update_firing(state: &mut GameState, input: &TickInput, dt: f32) {
    state.player.cooldown -= dt;
    if input.fire && state.player.cooldown <= 0.0 {
        state.spawn_bullet();
        state.player.cooldown = state.tuning.fire_interval;
    }
}

fn advance_bullets(state: &mut GameState, dt: f32) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed * dt;
    }
    let margin = state.tuning.bullet_top_margin;
    state.bullets.retain(|b| b.pos.y + b.radius > -margin);
}

fn update_spawning(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer > state.tuning.spawn_interval(state.score) {
        state.spawn_timer = 0.0;
        state.spawn_enemy();
    }
}

fn advance_enemies(state: &mut GameState, dt: f32) {
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed * dt;
    }
}

/// Resolve enemy/player and bullet/enemy contacts in one pass.
///
/// Enemies are visited from the highest index down, and for each one the
/// bullets are searched from the highest index down. The player check comes
/// first: an enemy that reaches the ship ends the session and is not tested
/// against bullets, even if one is inside it this frame. Other enemies in the
/// same pass are still resolved.
///
/// Hits are marked during the pass and compacted afterwards, so survivors
/// keep their relative order.
pub fn resolve_collisions(state: &mut GameState) {
    let mut enemy_destroyed = vec![false; state.enemies.len()];
    let mut bullet_consumed = vec![false; state.bullets.len()];

    for i in (0..state.enemies.len()).rev() {
        let enemy = &state.enemies[i];

        if enemy_hits_player(enemy, &state.player) {
            if state.alive {
                log::info!(
                    "Player destroyed at x={:.1}, final score {}",
                    state.player.pos.x,
                    state.score
                );
            }
            state.alive = false;
            continue;
        }

        let hit = (0..state.bullets.len())
            .rev()
            .find(|&j| !bullet_consumed[j] && bullet_hits_enemy(&state.bullets[j], enemy));

        if let Some(j) = hit {
            enemy_destroyed[i] = true;
            bullet_consumed[j] = true;
            state.score += state.tuning.kill_score;
            state.kills += 1;
            log::debug!("Enemy destroyed, score {}", state.score);
        }
    }

    let mut index = 0;
    state.enemies.retain(|_| {
        let keep = !enemy_destroyed[index];
        index += 1;
        keep
    });

    let mut index = 0;
    state.bullets.retain(|_| {
        let keep = !bullet_consumed[index];
        index += 1;
        keep
    });
}

/// Drop enemies whose top edge is past the bottom margin
pub fn cull_offscreen_enemies(state: &mut GameState) {
    let limit = state.playfield.height + state.tuning.enemy_bottom_margin;
    state.enemies.retain(|e| e.pos.y - e.size.y < limit);
}
