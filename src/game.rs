//! Frame driver
//!
//! Owns the session and everything that feeds it: held keys, the frame clock
//! and the idle-mode switch. The platform layer only forwards events and
//! timestamps here, which keeps the browser loop and the headless runner on
//! the same code path.

use crate::input::{Action, InputState};
use crate::platform::{FrameClock, Playfield, fit_playfield};
use crate::sim::{GameState, autopilot, tick};
use crate::tuning::Tuning;

/// Key that toggles idle mode (the autopilot takes over)
pub const IDLE_TOGGLE_CODE: &str = "KeyI";

/// Anything that can present a session. Gets read-only access.
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// One running game: simulation state plus its inputs
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub clock: FrameClock,
    /// When set, the autopilot replaces keyboard input
    pub idle_mode: bool,
}

impl Game {
    pub fn new(seed: u64, playfield: Playfield, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, playfield, tuning),
            input: InputState::new(),
            clock: FrameClock::new(),
            idle_mode: false,
        }
    }

    /// Run one update+render for the frame stamped `timestamp_ms`.
    ///
    /// Returns the dt handed to the simulation.
    pub fn frame<R: Renderer + ?Sized>(&mut self, timestamp_ms: f64, renderer: &mut R) -> f32 {
        let dt = self.clock.advance(timestamp_ms);
        let input = if self.idle_mode {
            autopilot::steer(&self.state)
        } else {
            self.input.snapshot()
        };
        tick(&mut self.state, &input, dt);
        renderer.render(&self.state);
        dt
    }

    /// Handle a key press by its physical code.
    ///
    /// Returns true if the key means something to the game, so the caller
    /// can suppress the browser's default handling (scrolling on arrows and
    /// space).
    pub fn key_down(&mut self, code: &str) -> bool {
        if code == IDLE_TOGGLE_CODE {
            self.idle_mode = !self.idle_mode;
            log::info!("Idle mode: {}", self.idle_mode);
            return true;
        }

        match self.input.press(code) {
            Some(Action::Restart) => {
                if !self.state.alive {
                    self.state.restart();
                }
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.release(code).is_some()
    }

    /// Focus lost: key-up events will never arrive, so forget held keys.
    /// The clock restarts too, so the first frame back steps by 0.
    pub fn blur(&mut self) {
        self.input.clear();
        self.clock.reset();
    }

    /// Refit the playfield to a new viewport and return it
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) -> Playfield {
        let playfield = fit_playfield(viewport_width, viewport_height);
        if playfield != self.state.playfield {
            log::debug!("Playfield resized to {}x{}", playfield.width, playfield.height);
            self.state.set_playfield(playfield);
        }
        playfield
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullRenderer;

    fn game() -> Game {
        Game::new(7, Playfield::default(), Tuning::default())
    }

    #[test]
    fn test_first_frame_is_zero_dt() {
        let mut game = game();
        let mut renderer = NullRenderer::new();
        assert_eq!(game.frame(1000.0, &mut renderer), 0.0);
        assert_eq!(renderer.frames, 1);
        assert!(renderer.last_vertex_count > 0);
    }

    #[test]
    fn test_frame_dt_is_capped() {
        let mut game = game();
        let mut renderer = NullRenderer::new();
        game.frame(0.0, &mut renderer);
        // A long stall (tab in background) only advances one capped step
        let dt = game.frame(5000.0, &mut renderer);
        assert_eq!(dt, crate::consts::MAX_DT);
    }

    #[test]
    fn test_held_key_moves_player() {
        let mut game = game();
        let mut renderer = NullRenderer::new();
        game.frame(0.0, &mut renderer);
        assert!(game.key_down("ArrowLeft"));
        let start = game.state.player.pos.x;
        game.frame(16.0, &mut renderer);
        assert!(game.state.player.pos.x < start);

        assert!(game.key_up("ArrowLeft"));
        let after = game.state.player.pos.x;
        game.frame(32.0, &mut renderer);
        assert_eq!(game.state.player.pos.x, after);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut game = game();
        assert!(!game.key_down("KeyZ"));
        assert!(!game.key_up("KeyZ"));
    }

    #[test]
    fn test_blur_releases_keys() {
        let mut game = game();
        game.key_down("Space");
        game.key_down("KeyD");
        game.blur();
        assert_eq!(game.input.snapshot(), crate::sim::TickInput::default());
    }

    #[test]
    fn test_blur_restarts_clock() {
        let mut game = game();
        let mut renderer = NullRenderer::new();
        game.frame(0.0, &mut renderer);
        game.frame(16.0, &mut renderer);
        game.blur();
        assert_eq!(game.frame(48.0, &mut renderer), 0.0);
        let dt = game.frame(64.0, &mut renderer);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_restart_only_when_dead() {
        let mut game = game();
        game.state.score = 30;
        game.key_down("KeyR");
        assert_eq!(game.state.score, 30);

        game.state.alive = false;
        game.key_up("KeyR");
        game.key_down("KeyR");
        assert!(game.state.alive);
        assert_eq!(game.state.score, 0);
    }

    #[test]
    fn test_idle_toggle() {
        let mut game = game();
        assert!(game.key_down("KeyI"));
        assert!(game.idle_mode);

        let mut renderer = NullRenderer::new();
        game.frame(0.0, &mut renderer);
        game.frame(16.0, &mut renderer);
        // Autopilot always holds fire
        assert_eq!(game.state.bullets.len(), 1);

        game.key_down("KeyI");
        assert!(!game.idle_mode);
    }

    #[test]
    fn test_resize_keeps_entities() {
        let mut game = game();
        let before = game.state.player.pos;
        let field = game.resize(400.0, 400.0);
        assert_eq!(field, Playfield::new(400.0, 300.0));
        assert_eq!(game.state.playfield, field);
        assert_eq!(game.state.player.pos, before);
    }
}
