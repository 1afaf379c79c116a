//! Rendering module
//!
//! The scene is built as plain triangles in playfield pixels, then handed to
//! a [`Renderer`]: the WebGPU pipeline in the browser, [`NullRenderer`] when
//! headless.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::build_scene;
pub use vertex::Vertex;

use crate::game::Renderer;
use crate::sim::GameState;

/// Renderer that draws nothing but remembers what it was asked to draw
#[derive(Debug, Default, Clone)]
pub struct NullRenderer {
    pub frames: u64,
    pub last_vertex_count: usize,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, state: &GameState) {
        self.frames += 1;
        self.last_vertex_count = build_scene(state).len();
    }
}
