//! Swing Stack entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

    use swing_stack::consts::*;
    use swing_stack::physics::RapierWorld;
    use swing_stack::renderer::{RenderState, scene_vertices};
    use swing_stack::sim::GameController;
    use swing_stack::ui::DomUi;
    use swing_stack::{Error, Result, Tuning};

    /// Page element holding an optional JSON tuning document
    const TUNING_ELEMENT_ID: &str = "tuning";

    /// Game instance holding all state
    struct Game {
        controller: GameController<RapierWorld, DomUi>,
        render_state: Option<RenderState>,
        last_time: f64,
    }

    impl Game {
        /// Feed the frame delta to the controller
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0).clamp(0.0, MAX_FRAME_DT)
            } else {
                SIM_DT as f64
            };
            self.last_time = time;
            self.controller.advance(Duration::from_secs_f64(dt));
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(
                    &self.controller.render_bodies(),
                    self.controller.pendulum_line(),
                );
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    /// Tuning from the page, falling back to defaults
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id(TUNING_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from #{}", TUNING_ELEMENT_ID);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    async fn init_renderer(canvas: HtmlCanvasElement, width: u32, height: u32) -> Result<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| Error::Graphics(format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::Graphics(format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Swing Stack starting...");

        let window = web_sys::window().ok_or_else(|| Error::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::MissingElement("document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| Error::MissingElement("canvas".into()))?
            .dyn_into()
            .map_err(|_| Error::MissingElement("canvas".into()))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let tuning = load_tuning(&document);
        let physics = RapierWorld::new(Vec2::new(0.0, tuning.gravity));
        let ui = DomUi::new(&document)?;
        let controller = GameController::new(physics, ui, tuning)?;

        // The game still runs (score and panels) without a GPU
        let render_state = match init_renderer(canvas, width, height).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Rendering disabled: {}", e);
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            controller,
            render_state,
            last_time: 0.0,
        }));

        setup_input_handlers(&window, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Swing Stack running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut g = game.borrow_mut();
                // Keep the action key from scrolling the page
                if code == g.controller.tuning().action_key {
                    event.prevent_default();
                }
                g.controller.on_key_down(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().controller.on_key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Swing Stack failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Swing Stack (native) starting...");
    log::info!("Native mode plays one scripted round headless - run with `trunk serve` for the web version");

    if let Err(e) = headless::run(std::env::args().nth(1)) {
        log::error!("Headless round failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted round: drop a box whenever the last one has landed
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;
    use std::time::Duration;

    use glam::Vec2;

    use swing_stack::physics::RapierWorld;
    use swing_stack::sim::{BoxState, GameController, GamePhase};
    use swing_stack::ui::HeadlessUi;
    use swing_stack::{Result, Tuning};

    const FRAME: Duration = Duration::from_micros(16_667);
    const TIME_LIMIT: Duration = Duration::from_secs(180);
    const REPORT_EVERY: Duration = Duration::from_secs(5);

    pub fn run(tuning_path: Option<String>) -> Result<()> {
        let tuning = match tuning_path {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::load(Path::new(&path))?
            }
            None => Tuning::default(),
        };
        let action_key = tuning.action_key.clone();

        let physics = RapierWorld::new(Vec2::new(0.0, tuning.gravity));
        let mut game = GameController::new(physics, HeadlessUi::new(), tuning)?;

        let press = |game: &mut GameController<RapierWorld, HeadlessUi>| {
            game.on_key_down(&action_key);
            game.on_key_up(&action_key);
        };

        press(&mut game);

        let mut elapsed = Duration::ZERO;
        let mut last_report = Duration::ZERO;
        while game.phase() == GamePhase::Game && elapsed < TIME_LIMIT {
            if game.box_state() == BoxState::Idle {
                press(&mut game);
            }
            game.advance(FRAME);
            elapsed += FRAME;

            if elapsed - last_report >= REPORT_EVERY {
                last_report = elapsed;
                log::info!(
                    "{:>4.0}s: score {}, {} boxes dropped",
                    elapsed.as_secs_f32(),
                    game.ui().score_text(),
                    game.dropped_boxes().len()
                );
            }
        }

        match game.last_outcome() {
            Some(outcome) => log::info!(
                "Round finished after {:.1}s: {:?} with {} points",
                elapsed.as_secs_f32(),
                outcome,
                game.score()
            ),
            None => log::info!("Time limit reached with {} points", game.score()),
        }

        game.shutdown();
        Ok(())
    }
}
