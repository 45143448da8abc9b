//! Road Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use road_rush::frame::{InputState, Key};
    use road_rush::renderer::{RenderState, tessellate};
    use road_rush::renderer::scene::{lives_label, overtakes_label};
    use road_rush::sim::Viewport;
    use road_rush::{Frame, FrameDriver, Settings};

    /// Game wrapper for WASM
    struct Game {
        driver: FrameDriver,
        render_state: Option<RenderState>,
        input: InputState,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport, settings: Settings) -> Self {
            Self {
                driver: FrameDriver::new(seed, viewport, settings),
                render_state: None,
                input: InputState::default(),
            }
        }

        /// Run one frame and present it
        fn update(&mut self, time: f64) -> Frame {
            let input = self.input.snapshot();
            let frame = self.driver.frame(&input, time);

            if let Some(ref mut render_state) = self.render_state {
                let vertices = tessellate(&frame.commands);
                let viewport = self.driver.viewport;
                match render_state.render(&vertices, (viewport.width, viewport.height)) {
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

            frame
        }

        /// Match the surface and the scene to the canvas' current size
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            if client_w <= 0 || client_h <= 0 {
                return;
            }
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            self.driver
                .set_viewport(Viewport::new(client_w as f32, client_h as f32));
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
            log::info!("Resized to {}x{} ({}x{} device px)", client_w, client_h, width, height);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, frame: &Frame) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(hud) = document.get_element_by_id("hud") {
                let class = if self.driver.settings.show_hud { "" } else { "hidden" };
                let _ = hud.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("hud-overtakes") {
                el.set_text_content(Some(&overtakes_label(frame.overtakes)));
            }
            if let Some(el) = document.get_element_by_id("hud-lives") {
                el.set_text_content(Some(&lives_label(frame.lives)));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Road Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Scene is laid out in CSS pixels, the surface uses device pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings_json = canvas.get_attribute("data-settings");
        let settings = Settings::from_json_or_default(settings_json.as_deref());

        let seed = js_sys::Date::now() as u64;
        let viewport = Viewport::new(client_w as f32, client_h as f32);
        let game = Rc::new(RefCell::new(Game::new(seed, viewport, settings)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone(), canvas);

        request_animation_frame(game);

        log::info!("Road Rush running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: steering presses and held accelerate/brake
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release held flags
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>, canvas: HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let game_over = {
            let mut g = game.borrow_mut();
            let frame = g.update(time);
            g.update_hud(&frame);
            frame.game_over
        };

        // Blocking notification; the state has already been reset
        if let Some(overtakes) = game_over {
            let window = web_sys::window().unwrap();
            let _ = window.alert_with_message(&format!("Game Over! Cars overtaken: {}", overtakes));
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Road Rush (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(2024);

    let summary = headless_run(seed, 60 * 60);
    println!("{}", summary);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the simulation with a scripted player and summarize the session
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, ticks: u64) -> serde_json::Value {
    use road_rush::consts::STEER_STEP;
    use road_rush::sim::{GameEvent, GameState, Lane, TickInput, Viewport, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const LANE_CHANGE_EVERY: u64 = 120;

    let viewport = Viewport::default();
    let mut state = GameState::new(seed);
    let mut collisions = 0u32;
    let mut lane = Lane::Right;

    for n in 0..ticks {
        // Swap lanes periodically, one key press per steering step
        let steer = if n % LANE_CHANGE_EVERY == 0 {
            lane = match lane {
                Lane::Left => Lane::Right,
                Lane::Right => Lane::Left,
            };
            ((lane.offset() - state.player.x) / STEER_STEP).round() as i32
        } else {
            0
        };
        let input = TickInput {
            accelerating: true,
            accelerate_pressed: !state.race.started,
            braking: false,
            steer,
        };

        for event in tick(&mut state, &input, &viewport, n as f64 * FRAME_MS) {
            match event {
                GameEvent::Collision { .. } => collisions += 1,
                GameEvent::GameOver { overtakes } => {
                    log::info!("Run {} finished with {} overtakes", state.runs, overtakes);
                }
                GameEvent::Overtake { .. } => {}
            }
        }
    }

    serde_json::json!({
        "seed": seed,
        "ticks": state.time_ticks,
        "overtakes": state.race.overtakes,
        "lives": state.player.lives,
        "collisions": collisions,
        "runs_completed": state.runs,
        "best_overtakes": state.best_overtakes.max(state.race.overtakes),
    })
}
