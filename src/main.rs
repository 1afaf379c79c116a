//! Skyfall entry point
//!
//! Browser: sizes the canvas, brings up WebGPU and drives the game from
//! requestAnimationFrame. Native: runs a headless autopilot session on a
//! synthetic 60 Hz clock and logs a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent};

    use skyfall::renderer::{RenderInitError, RenderState};
    use skyfall::{Game, Tuning, fit_playfield};

    #[derive(Debug, Error)]
    pub enum StartupError {
        #[error("no global window")]
        NoWindow,

        #[error("window has no document")]
        NoDocument,

        #[error("missing #{0} element")]
        MissingElement(&'static str),

        #[error("#canvas is not a canvas element")]
        NotACanvas,

        #[error("failed to create surface: {0}")]
        Surface(#[from] wgpu::CreateSurfaceError),

        #[error("no suitable GPU adapter: {0}")]
        Adapter(#[from] wgpu::RequestAdapterError),

        #[error(transparent)]
        Render(#[from] RenderInitError),
    }

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        renderer: RenderState,
        canvas: HtmlCanvasElement,
        score_el: Option<Element>,
        game_over_el: Option<Element>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let App { game, renderer, .. } = self;
            game.frame(time, renderer);
            self.update_hud();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&format!("Score: {}", self.game.state.score)));
            }
            if let Some(el) = &self.game_over_el {
                let class = if self.game.state.alive { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }
        }

        fn resize_to_viewport(&mut self, window: &web_sys::Window) {
            let (vw, vh) = viewport_size(window);
            let playfield = self.game.resize(vw, vh);
            let (width, height) = playfield.pixel_size();
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.renderer.resize(width, height);
        }
    }

    fn viewport_size(window: &web_sys::Window) -> (f64, f64) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (width, height)
    }

    pub async fn run() -> Result<(), StartupError> {
        log::info!("Skyfall starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(StartupError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| StartupError::NotACanvas)?;

        // Size the canvas to the largest 4:3 playfield that fits
        let (vw, vh) = viewport_size(&window);
        let playfield = fit_playfield(vw, vh);
        let (width, height) = playfield.pixel_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, playfield, Tuning::default());
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = RenderState::new(surface, &adapter, width, height).await?;

        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            canvas,
            score_el: document.get_element_by_id("score"),
            game_over_el: document.get_element_by_id("game-over"),
        }));
        app.borrow().update_hud();

        setup_input_handlers(&window, app.clone());
        setup_window_handlers(&window, app.clone());

        request_animation_frame(app);

        log::info!("Skyfall running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        // Resize: refit playfield, canvas and surface
        {
            let app = app.clone();
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize_to_viewport(&window_clone);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.blur();
                log::debug!("Window blurred, released held keys");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use serde::Serialize;
    use thiserror::Error;

    use skyfall::renderer::NullRenderer;
    use skyfall::{Game, Playfield, Tuning, TuningError};

    /// Synthetic frame interval (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    const USAGE: &str = "usage: skyfall [--seed N] [--frames N] [--tuning PATH]";

    #[derive(Debug, Error)]
    pub enum CliError {
        #[error("unknown argument `{0}` (try --help)")]
        UnknownArgument(String),

        #[error("missing value for {0}")]
        MissingValue(&'static str),

        #[error("invalid value `{value}` for {flag}")]
        InvalidNumber { flag: &'static str, value: String },

        #[error(transparent)]
        Tuning(#[from] TuningError),

        #[error("failed to encode summary: {0}")]
        Summary(#[from] serde_json::Error),
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Args {
        pub seed: u64,
        pub frames: u64,
        pub tuning: Option<PathBuf>,
        pub help: bool,
    }

    impl Default for Args {
        fn default() -> Self {
            Self {
                seed: 1,
                frames: 60 * 60,
                tuning: None,
                help: false,
            }
        }
    }

    impl Args {
        pub fn parse<I, S>(args: I) -> Result<Self, CliError>
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            let mut parsed = Args::default();
            let mut iter = args.into_iter().map(|s| -> String { s.into() });
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--seed" => parsed.seed = number(&mut iter, "--seed")?,
                    "--frames" => parsed.frames = number(&mut iter, "--frames")?,
                    "--tuning" => {
                        let path = iter.next().ok_or(CliError::MissingValue("--tuning"))?;
                        parsed.tuning = Some(PathBuf::from(path));
                    }
                    "-h" | "--help" => parsed.help = true,
                    _ => return Err(CliError::UnknownArgument(arg)),
                }
            }
            Ok(parsed)
        }
    }

    fn number(iter: &mut impl Iterator<Item = String>, flag: &'static str) -> Result<u64, CliError> {
        let value = iter.next().ok_or(CliError::MissingValue(flag))?;
        value
            .parse()
            .map_err(|_| CliError::InvalidNumber { flag, value })
    }

    /// What a headless session achieved
    #[derive(Debug, Clone, Serialize)]
    pub struct SessionSummary {
        pub seed: u64,
        pub frames: u64,
        pub simulated_seconds: f64,
        pub score: u64,
        pub kills: u32,
        pub alive: bool,
        pub enemies_on_screen: usize,
        pub bullets_in_flight: usize,
    }

    /// Drive an autopilot session until it dies or runs out of frames
    pub fn simulate(args: &Args, tuning: Tuning) -> SessionSummary {
        let mut game = Game::new(args.seed, Playfield::default(), tuning);
        game.idle_mode = true;
        let mut renderer = NullRenderer::new();
        let mut simulated = 0.0f64;

        for frame in 0..args.frames {
            simulated += f64::from(game.frame(frame as f64 * FRAME_MS, &mut renderer));
            if !game.state.alive {
                log::info!("Autopilot died on frame {}", frame);
                break;
            }
        }

        SessionSummary {
            seed: args.seed,
            frames: renderer.frames,
            simulated_seconds: simulated,
            score: game.state.score,
            kills: game.state.kills,
            alive: game.state.alive,
            enemies_on_screen: game.state.enemies.len(),
            bullets_in_flight: game.state.bullets.len(),
        }
    }

    pub fn run(raw_args: impl IntoIterator<Item = String>) -> Result<(), CliError> {
        let args = Args::parse(raw_args)?;
        if args.help {
            println!("{USAGE}");
            return Ok(());
        }

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        log::info!(
            "Skyfall (native) headless run: seed={} frames={}",
            args.seed,
            args.frames
        );

        let summary = simulate(&args, tuning);
        log::info!("Session summary: {}", serde_json::to_string(&summary)?);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_defaults() {
            let args = Args::parse(Vec::<String>::new()).unwrap();
            assert_eq!(args, Args::default());
        }

        #[test]
        fn test_parse_flags() {
            let args = Args::parse(["--seed", "99", "--frames", "10", "--tuning", "t.json"]).unwrap();
            assert_eq!(args.seed, 99);
            assert_eq!(args.frames, 10);
            assert_eq!(args.tuning, Some(PathBuf::from("t.json")));
        }

        #[test]
        fn test_parse_errors() {
            assert!(matches!(
                Args::parse(["--seed"]),
                Err(CliError::MissingValue("--seed"))
            ));
            assert!(matches!(
                Args::parse(["--frames", "lots"]),
                Err(CliError::InvalidNumber { flag: "--frames", .. })
            ));
            assert!(matches!(
                Args::parse(["--fast"]),
                Err(CliError::UnknownArgument(_))
            ));
        }

        #[test]
        fn test_simulate_is_deterministic() {
            let args = Args {
                frames: 600,
                ..Args::default()
            };
            let a = simulate(&args, Tuning::default());
            let b = simulate(&args, Tuning::default());
            assert_eq!(a.score, b.score);
            assert_eq!(a.kills, b.kills);
            assert_eq!(a.frames, b.frames);
            assert!(a.frames <= 600);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match native::run(std::env::args().skip(1)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
