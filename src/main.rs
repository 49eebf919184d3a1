//! Flappy Circle entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use flappy_circle::GameConfig;
    use flappy_circle::platform::FrameClock;
    use flappy_circle::renderer::RenderState;
    use flappy_circle::sim::{GamePhase, Simulation, TickOutcome, should_flap};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        clock: FrameClock,
        render_state: Option<RenderState>,
        /// Autopilot plays (and restarts) the game
        demo: bool,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(sim: Simulation) -> Self {
            Self {
                sim,
                clock: FrameClock::new(),
                render_state: None,
                demo: false,
                last_phase: GamePhase::Idle,
            }
        }

        /// A tap, click or key press
        fn press(&mut self) {
            let command = self.sim.press();
            log::debug!("Press -> {:?}", command);
        }

        /// Run the simulation ticks due by `time`
        fn update(&mut self, time: f64) {
            let ticks = self.clock.advance_to(time);
            for _ in 0..ticks {
                if self.demo {
                    if self.sim.phase() != GamePhase::Playing {
                        self.sim.start_run();
                    } else if should_flap(self.sim.state(), self.sim.config()) {
                        self.sim.jump();
                    }
                }
                if let TickOutcome::Ended(collision) = self.sim.tick() {
                    log::info!(
                        "Game over ({:?}), score {}",
                        collision,
                        self.sim.score()
                    );
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.sim.state(), self.sim.config()) {
                    Ok(()) => {}
                    Err(flappy_circle::RenderError::Frame(wgpu::SurfaceError::Lost)) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(flappy_circle::RenderError::Frame(wgpu::SurfaceError::OutOfMemory)) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = document() else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.sim.score().to_string()));
            }

            let phase = self.sim.phase();
            if phase == self.last_phase {
                return;
            }
            self.last_phase = phase;

            set_hidden(&document, "start-prompt", phase != GamePhase::Idle);
            set_hidden(&document, "game-over", phase != GamePhase::Ended);
            if phase == GamePhase::Ended {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.sim.score().to_string()));
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Circle starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store matches the playfield at device resolution
        let config = GameConfig::default();
        let dpr = window.device_pixel_ratio();
        let width = (config.width as f64 * dpr) as u32;
        let height = (config.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let _ = canvas.set_attribute(
            "style",
            &format!("width: {}px; height: {}px", config.width, config.height),
        );

        let seed = js_sys::Date::now() as u64;
        let playfield = glam::Vec2::new(config.width, config.height);
        let sim = Simulation::from_seed(config, seed).map_err(js_err)?;
        let game = Rc::new(RefCell::new(Game::new(sim)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, playfield)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;
        setup_restart_button(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }
        set_hidden(&document, "start-prompt", false);

        request_animation_frame(game);

        log::info!("Flappy Circle running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press();
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start; suppress the synthesized mousedown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press();
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.press();
                        }
                    }
                    "i" | "I" => {
                        g.demo = !g.demo;
                        log::info!("Demo mode: {}", g.demo);
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
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
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.sim.start_run();
                g.clock.reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Circle (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    if let Err(e) = native::run(std::env::args().skip(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flappy_circle::sim::{Simulation, play_run};
    use flappy_circle::{ConfigError, GameConfig};

    /// Autopilot runs played per invocation
    const RUNS: u32 = 3;
    /// Two simulated minutes per run
    const MAX_TICKS: u64 = 60 * 120;

    /// Usage: `flappy-circle [config.json] [seed]`
    pub fn run(mut args: impl Iterator<Item = String>) -> Result<(), ConfigError> {
        let config = match args.next() {
            Some(path) => GameConfig::load(&path)?,
            None => GameConfig::default(),
        };
        let seed = match args.next().map(|s| s.parse::<u64>()) {
            Some(Ok(seed)) => seed,
            Some(Err(e)) => {
                log::warn!("Ignoring invalid seed: {}", e);
                clock_seed()
            }
            None => clock_seed(),
        };

        log::info!(
            "Playfield {}x{}, {} pipes, seed {}",
            config.width,
            config.height,
            config.pipe_count(),
            seed
        );

        let mut sim = Simulation::from_seed(config, seed)?;
        let mut best = 0;
        for _ in 0..RUNS {
            let report = play_run(&mut sim, MAX_TICKS);
            match report.collision {
                Some(hit) => log::info!(
                    "Run {}: score {} after {} ticks ({:?})",
                    sim.state().runs,
                    report.score,
                    report.ticks,
                    hit
                ),
                None => log::info!(
                    "Run {}: score {}, still flying at the {} tick cap",
                    sim.state().runs,
                    report.score,
                    report.ticks
                ),
            }
            best = best.max(report.score);
        }
        log::info!("Best score: {}", best);
        Ok(())
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
