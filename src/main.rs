//! Highway Survival entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use highway_survival::audio::{AudioManager, AudioSink, play_events};
    use highway_survival::consts::*;
    use highway_survival::platform::{Key, KeyState, measure_hitboxes, poll_input};
    use highway_survival::renderer::{RenderState, WebSurface};
    use highway_survival::sim::{GamePhase, GameState, tick};
    use highway_survival::{GameConfig, Preset, ui};

    /// Game instance holding all state
    struct Game {
        config: GameConfig,
        state: GameState,
        surface: WebSurface,
        audio: AudioManager,
        keys: KeyState,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        /// Run simulation ticks at a fixed 60 Hz
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.25);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = poll_input(&self.keys);
                let events = tick(&mut self.state, &input, &self.config);
                play_events(&mut self.audio, &events);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot presses after processing
                self.keys.end_frame();
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            self.audio.update_music();
        }

        fn render(&mut self) {
            ui::draw_frame(&mut self.surface, &self.state, &self.config);
        }
    }

    /// Config embedded in the page as `<script type="application/json" id="game-config">`,
    /// or a preset named by `?preset=` in the URL
    fn load_config(document: &web_sys::Document) -> GameConfig {
        if let Some(el) = document.get_element_by_id("game-config") {
            let json = el.text_content().unwrap_or_default();
            if !json.trim().is_empty() {
                match GameConfig::from_json(&json) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("Ignoring page config: {}", e),
                }
            }
        }

        let preset = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| {
                search
                    .trim_start_matches('?')
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("preset=").map(str::to_string))
            })
            .and_then(|name| Preset::from_str(&name))
            .unwrap_or_default();
        log::info!("Using {} preset", preset.as_str());
        preset.config()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Highway Survival starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let overlay: HtmlElement = document
            .get_element_by_id("overlay")
            .expect("no overlay")
            .dyn_into()
            .expect("overlay is not an HTML element");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
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

        let render = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        let surface = WebSurface::new(render, overlay);

        let config = load_config(&document);
        let seed = config.seed.unwrap_or(js_sys::Date::now() as u64);
        let state = GameState::new(&config, measure_hitboxes(&surface), seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            audio: AudioManager::new(config.audio),
            config,
            state,
            surface,
            keys: KeyState::new(),
            accumulator: 0.0,
            last_time: 0.0,
        }));

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Highway Survival running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.keys.key_down(key);
                    // Browsers only allow audio after a user gesture
                    g.audio.resume();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().keys.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Drop held keys and queue a pause press if a round is running
    fn auto_pause(game: &RefCell<Game>, reason: &str) {
        let mut g = game.borrow_mut();
        g.keys.reset();
        if g.state.phase == GamePhase::Playing {
            g.keys.tap(Key::Pause);
            log::info!("Auto-paused ({})", reason);
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&game, "window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            // Track canvas size changes
            if let Some(canvas) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("canvas"))
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            {
                let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
                let w = (canvas.client_width() as f64 * dpr) as u32;
                let h = (canvas.client_height() as f64 * dpr) as u32;
                if (w, h) != g.surface.render.size && w > 0 && h > 0 {
                    canvas.set_width(w);
                    canvas.set_height(h);
                    g.surface.resize(w, h);
                }
            }

            g.update(dt);
            g.render();
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
    use highway_survival::audio::{NullAudio, play_events};
    use highway_survival::consts::TARGET_FPS;
    use highway_survival::sim::{Autopilot, Difficulty, GamePhase, GameState, Hitboxes, tick};

    env_logger::init();
    log::info!("Highway Survival (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the playable web version");

    let config = load_native_config();
    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Autopilot runs with seed {}", seed);

    // Two minutes of play per tier at most
    let frame_limit = 120 * TARGET_FPS as u64;

    println!("\nAutopilot results (seed {}):", seed);
    for difficulty in Difficulty::ALL {
        let mut state = GameState::new(&config, Hitboxes::default(), seed);
        let pilot = Autopilot::new(difficulty);
        let mut audio = NullAudio::default();

        while state.phase != GamePhase::GameOver && state.frame_counter < frame_limit {
            let input = pilot.next_input(&state);
            let events = tick(&mut state, &input, &config);
            play_events(&mut audio, &events);
        }

        let outcome = if state.phase == GamePhase::GameOver {
            "crashed"
        } else {
            "survived"
        };
        println!(
            "  {:<6} {} after {:>5} frames, score {:>4}",
            difficulty.as_str(),
            outcome,
            state.frame_counter,
            state.score
        );
    }
}

/// Config from the JSON file named by `HIGHWAY_CONFIG`, else the preset
/// named by `HIGHWAY_PRESET`, else the highway preset
#[cfg(not(target_arch = "wasm32"))]
fn load_native_config() -> highway_survival::GameConfig {
    use highway_survival::{GameConfig, Preset};

    if let Ok(path) = std::env::var("HIGHWAY_CONFIG") {
        match std::fs::read_to_string(&path) {
            Ok(json) => match GameConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path);
                    return config;
                }
                Err(e) => log::error!("{}: {}", path, e),
            },
            Err(e) => log::error!("Failed to read {}: {}", path, e),
        }
    }

    let preset = std::env::var("HIGHWAY_PRESET")
        .ok()
        .and_then(|name| {
            let preset = Preset::from_str(&name);
            if preset.is_none() {
                log::warn!("Unknown preset '{}', using default", name);
            }
            preset
        })
        .unwrap_or_default();
    log::info!("Using {} preset", preset.as_str());
    preset.config()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
