//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (timestamps in, clamped dt out)
//! - Playfield sizing (viewport in, 4:3 playfield out)

use crate::consts::{BASE_HEIGHT, BASE_WIDTH, MAX_DT};

/// Turns monotonic frame timestamps into simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a frame timestamp (milliseconds) and return the step in seconds.
    ///
    /// The first frame has nothing to measure against and yields 0. Later
    /// frames yield the elapsed time capped at [`MAX_DT`], so a stalled tab
    /// resumes with one small step instead of a jump. Timestamps that go
    /// backwards or are not finite yield 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        if timestamp_ms.is_finite() {
            self.last_timestamp = Some(timestamp_ms);
        }
        if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 }
    }

    /// Forget the previous timestamp (next frame yields 0)
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

/// Simulation/render area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: BASE_WIDTH,
            height: BASE_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size in whole pixels, for surface configuration
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.max(1.0) as u32, self.height.max(1.0) as u32)
    }
}

/// Largest 800:600 playfield that fits the viewport, floor-rounded
pub fn fit_playfield(viewport_width: f64, viewport_height: f64) -> Playfield {
    // Checked per axis: `f64::min` would hide a NaN on one side
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(viewport_width) || !usable(viewport_height) {
        return Playfield::new(1.0, 1.0);
    }
    let ratio = (viewport_width / BASE_WIDTH as f64).min(viewport_height / BASE_HEIGHT as f64);
    let width = (BASE_WIDTH as f64 * ratio).floor().max(1.0);
    let height = (BASE_HEIGHT as f64 * ratio).floor().max(1.0);
    Playfield::new(width as f32, height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12_345.0), 0.0);
        let dt = clock.advance(12_361.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        // Tab was hidden for five seconds
        assert_eq!(clock.advance(5_000.0), MAX_DT);
        // Normal cadence resumes from the new timestamp
        let dt = clock.advance(5_010.0);
        assert!((dt - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_bad_timestamps() {
        let mut clock = FrameClock::new();
        clock.advance(1_000.0);
        assert_eq!(clock.advance(900.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        // NaN did not poison the stored timestamp
        let dt = clock.advance(920.0);
        assert!((dt - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(40.0), 0.0);
    }

    #[test]
    fn test_fit_playfield_keeps_aspect() {
        assert_eq!(fit_playfield(800.0, 600.0), Playfield::new(800.0, 600.0));
        // Wide viewport: height limits
        assert_eq!(fit_playfield(1920.0, 900.0), Playfield::new(1200.0, 900.0));
        // Tall viewport: width limits
        assert_eq!(fit_playfield(500.0, 1000.0), Playfield::new(500.0, 375.0));
        // Floor rounding (750.75 -> 750, 801.33 -> 801)
        assert_eq!(fit_playfield(1001.0, 2000.0).height, 750.0);
        assert_eq!(fit_playfield(2000.0, 601.0).width, 801.0);
    }

    #[test]
    fn test_fit_playfield_degenerate() {
        assert_eq!(fit_playfield(0.0, 600.0), Playfield::new(1.0, 1.0));
        assert_eq!(fit_playfield(f64::NAN, 600.0), Playfield::new(1.0, 1.0));
        assert_eq!(fit_playfield(800.0, f64::NAN), Playfield::new(1.0, 1.0));
        assert_eq!(fit_playfield(f64::INFINITY, 600.0), Playfield::new(1.0, 1.0));
        assert_eq!(fit_playfield(800.0, f64::INFINITY), Playfield::new(1.0, 1.0));
        assert_eq!(fit_playfield(-800.0, 600.0), Playfield::new(1.0, 1.0));
        // Tiny but valid viewport still gets at least one pixel per axis
        assert_eq!(fit_playfield(1.0, 1.0), Playfield::new(1.0, 1.0));
    }
}
