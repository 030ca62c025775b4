//! Carom Table entry point
//!
//! Handles platform-specific initialization and runs the table loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, MouseEvent, TouchEvent};

    use carom_table::consts::*;
    use carom_table::error::RenderError;
    use carom_table::renderer::shapes::RAIL_THICKNESS;
    use carom_table::renderer::{RenderState, table_vertices};
    use carom_table::settings::Settings;
    use carom_table::sim::{
        FixedStep, InputEvent, InputQueue, TableBounds, TableEvent, TableSnapshot, TableState,
        tick,
    };

    /// Table instance holding all host-side state
    struct Game {
        state: TableState,
        render_state: Option<RenderState>,
        clock: FixedStep,
        last_time: f64,
        input: InputQueue,
    }

    impl Game {
        fn new(state: TableState) -> Self {
            Self {
                state,
                render_state: None,
                clock: FixedStep::new(),
                last_time: 0.0,
                input: InputQueue::new(),
            }
        }

        /// Run simulation ticks. Queued pointer events go to the first tick.
        fn update(&mut self, dt: f32) {
            let steps = self.clock.advance(dt);
            if steps == 0 {
                // Inputs wait in the queue for the next tick
                return;
            }

            let mut pending = self.input.drain();
            for _ in 0..steps {
                let events = tick(&mut self.state, &pending);
                pending.clear();

                for event in events {
                    if let TableEvent::CaromScored { count } = event {
                        log::info!("Carom! total {}", count);
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = TableSnapshot::capture(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&table_vertices(&snapshot)) {
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
            update_hud(&snapshot);
        }
    }

    fn update_hud(snapshot: &TableSnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("carom-count") {
            el.set_text_content(Some(&snapshot.score_label()));
        }
    }

    /// Canvas-relative CSS pixels to table coordinates
    fn to_table(canvas: &HtmlCanvasElement, bounds: &TableBounds, x: f32, y: f32) -> Vec2 {
        let full_w = bounds.width + 2.0 * RAIL_THICKNESS;
        let client_w = canvas.client_width().max(1) as f32;
        let scale = full_w / client_w;
        Vec2::new(x * scale - RAIL_THICKNESS, y * scale - RAIL_THICKNESS)
    }

    /// Host-provided settings from the canvas `data-settings` attribute
    fn read_settings(canvas: &HtmlCanvasElement) -> Settings {
        let Some(json) = canvas.get_attribute("data-settings") else {
            return Settings::default();
        };
        match Settings::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Settings::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Carom Table starting...");

        match start().await {
            Ok(game) => {
                request_animation_frame(game);
                log::info!("Carom Table running!");
            }
            Err(e) => log::error!("Failed to start: {}", e),
        }
    }

    async fn start() -> Result<Rc<RefCell<Game>>, RenderError> {
        let window = web_sys::window().ok_or(RenderError::MissingCanvas)?;
        let document = window.document().ok_or(RenderError::MissingCanvas)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(RenderError::MissingCanvas)?;

        let window_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(800.0);
        let settings = read_settings(&canvas);
        let state = match TableBounds::from_window_width(window_width)
            .and_then(|bounds| TableState::new(bounds, settings))
        {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Falling back to default table: {}", e);
                TableState::new(TableBounds::from_window_width(800.0)?, Settings::default())?
            }
        };
        let bounds = state.bounds;

        // Backing store in device pixels, rails included
        let dpr = window.device_pixel_ratio();
        let full_w = (bounds.width + 2.0 * RAIL_THICKNESS) as f64;
        let full_h = (bounds.height + 2.0 * RAIL_THICKNESS) as f64;
        let width = (full_w * dpr) as u32;
        let height = (full_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        log::info!(
            "Table {:.0}x{:.0}, cue power {}, shots travel {} the pointer",
            bounds.width,
            bounds.height,
            state.settings().cue_power,
            state.settings().shot_direction.as_str()
        );
        let game = Rc::new(RefCell::new(Game::new(state)));

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

        let render_state =
            RenderState::new(surface, &adapter, width, height, (bounds.width, bounds.height))
                .await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_power_slider(&document, game.clone());

        Ok(game)
    }

    type PointerCtor = fn(f32, f32) -> InputEvent;

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        let mouse: [(&str, PointerCtor); 3] = [
            ("mousedown", |x, y| InputEvent::PointerDown { x, y }),
            ("mousemove", |x, y| InputEvent::PointerMove { x, y }),
            ("mouseup", |x, y| InputEvent::PointerUp { x, y }),
        ];
        for (name, make) in mouse {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let p = to_table(
                    &canvas_clone,
                    &g.state.bounds,
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                );
                g.input.push(make(p.x, p.y));
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch. `touchend` has no active touches, so read the changed ones.
        let touch: [(&str, PointerCtor); 3] = [
            ("touchstart", |x, y| InputEvent::PointerDown { x, y }),
            ("touchmove", |x, y| InputEvent::PointerMove { x, y }),
            ("touchend", |x, y| InputEvent::PointerUp { x, y }),
        ];
        for (name, make) in touch {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    let p = to_table(&canvas_clone, &g.state.bounds, x, y);
                    g.input.push(make(p.x, p.y));
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// `#power` range input adjusts the cue power ceiling
    fn setup_power_slider(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(slider) = document
            .get_element_by_id("power")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::debug!("No power slider found");
            return;
        };
        slider.set_value(&game.borrow().state.settings().cue_power.to_string());

        let slider_clone = slider.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok(cue_power) = slider_clone.value().parse::<f32>() else {
                return;
            };
            let mut g = game.borrow_mut();
            let settings = g.state.settings().with_ceiling(cue_power);
            match settings.and_then(|settings| g.state.apply_settings(settings)) {
                Ok(()) => log::debug!("Cue power set to {}", cue_power),
                Err(e) => log::warn!("Rejected cue power: {}", e),
            }
        });
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

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
fn main() -> Result<(), carom_table::ConfigError> {
    env_logger::init();

    log::info!("Carom Table (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web table");

    demo_break()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Fire one shot from the opening layout and report how the table settles
#[cfg(not(target_arch = "wasm32"))]
fn demo_break() -> Result<(), carom_table::ConfigError> {
    use carom_table::Settings;
    use carom_table::sim::{InputEvent, TableBounds, TableEvent, TableState, run_until_rest, tick};

    let bounds = TableBounds::new(800.0, 400.0)?;
    let mut state = TableState::new(bounds, Settings::with_cue_power(25.0)?)?;

    let cue = state.cue_ball().pos;
    let target = state.balls[1].pos;
    let aim = cue + (target - cue) * 4.0;
    let mut events = tick(
        &mut state,
        &[
            InputEvent::PointerDown { x: cue.x, y: cue.y },
            InputEvent::PointerMove { x: aim.x, y: aim.y },
            InputEvent::PointerUp { x: aim.x, y: aim.y },
        ],
    );

    let (ticks, rest) = run_until_rest(&mut state, 20_000);
    events.extend(rest);

    for event in &events {
        match event {
            TableEvent::ShotFired { velocity } => {
                log::info!("Shot fired at ({:.2}, {:.2})", velocity.x, velocity.y)
            }
            TableEvent::BallsCollided { a, b } => {
                log::info!("{} hit {}", a.as_str(), b.as_str())
            }
            TableEvent::ShotEnded { caromed } => log::info!("Shot ended, carom: {}", caromed),
            _ => {}
        }
    }

    println!(
        "Table settled after {} ticks with {} carom(s)",
        ticks,
        state.carom_count()
    );
    Ok(())
}
