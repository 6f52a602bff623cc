//! Browser host (wasm32)
//!
//! Wires `devicemotion` to the tilt port, taps to `fire`, the restart button
//! to `Scheduler::restart`, and requestAnimationFrame to `Scheduler::advance`.
//! Expects a page with `#canvas`, `#hud-score`, `#hud-fps`, `#tilt-hint`,
//! `#game-over`, `#final-score` and `#restart-btn`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    DeviceMotionEvent, Document, HtmlCanvasElement, MouseEvent, PageTransitionEvent, TouchEvent,
};

use crate::consts::STANDARD_GRAVITY;
use crate::hud::HudModel;
use crate::input::SharedTilt;
use crate::renderer::canvas::CanvasRenderer;
use crate::renderer::draw_list;
use crate::scheduler::Scheduler;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState};

/// Game instance holding all state
struct Game {
    state: GameState,
    scheduler: Scheduler,
    tilt: SharedTilt,
    renderer: CanvasRenderer,
    settings: Settings,
    last_time: f64,
    /// A requestAnimationFrame callback is pending
    loop_running: bool,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Game {
    /// Run due timers for the time since the previous frame
    fn update(&mut self, time: f64) {
        let elapsed_ms = if self.last_time > 0.0 {
            (time - self.last_time).max(0.0)
        } else {
            0.0
        };
        self.last_time = time;

        let mut tilt = self.tilt.clone();
        self.scheduler.advance(
            &mut self.state,
            Duration::from_secs_f64(elapsed_ms / 1000.0),
            &mut tilt,
        );

        for event in self.state.drain_events() {
            if let GameEvent::GameOver { score } = event {
                log::info!("Final score: {}", score);
            }
        }

        // Track frame times for FPS
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (60000.0 / elapsed).round() as u32;
            }
        }
    }

    fn render(&self) {
        let rects = draw_list(&self.state.snapshot(), &self.state.tuning);
        self.renderer.render(&rects);
    }

    /// Update HUD elements in DOM
    fn update_hud(&self, document: &Document) {
        let hud = HudModel::from_snapshot(&self.state.snapshot());

        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&hud.score));
        }

        if let Some(el) = document.get_element_by_id("hud-fps") {
            if self.settings.show_fps {
                let _ = el.set_attribute("class", "");
                el.set_text_content(Some(&format!("{} fps", self.fps)));
            } else {
                let _ = el.set_attribute("class", "hidden");
            }
        }

        if let Some(el) = document.get_element_by_id("tilt-hint") {
            match hud.hint {
                Some(hint) => {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(hint));
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        if let Some(el) = document.get_element_by_id("game-over") {
            match hud.game_over {
                Some(overlay) => {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&overlay.final_score));
                    }
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Tap anywhere fires; after game over only the restart button acts
    fn on_tap(&mut self) {
        if let Some(id) = self.state.fire() {
            log::debug!("Fired projectile {}", id);
        }
    }

    fn restart(&mut self) {
        self.scheduler.restart(&mut self.state);
        self.state.drain_events();
        self.last_time = 0.0;
    }

    /// Replace a torn-down scheduler; the game picks up where it stopped
    fn resume(&mut self) {
        self.scheduler = Scheduler::new(&self.state.tuning);
        self.last_time = 0.0;
        log::info!("Resumed from page cache");
    }
}

/// Browser entry point
pub fn run() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&JsValue::from_str(&format!("logger init failed: {e}")));
    }

    log::info!("Tilt Shooter starting...");
    if let Err(e) = start() {
        log::error!("Startup failed: {:?}", e);
    }
}

fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into()?;

    // Logical pixels map 1:1 to simulation units
    let settings = Settings::load();
    let mut tuning = settings.tuning.clone();
    tuning.screen_width = canvas.client_width() as f32;
    tuning.screen_height = canvas.client_height() as f32;
    let tuning = tuning.validated();
    canvas.set_width(tuning.screen_width as u32);
    canvas.set_height(tuning.screen_height as u32);

    let renderer = CanvasRenderer::new(&canvas, settings.high_contrast)?;
    let seed = settings.seed_or(js_sys::Date::now() as u64);
    log::info!("Game initialized with seed: {}", seed);

    let game = Rc::new(RefCell::new(Game {
        state: GameState::new(seed, tuning.clone()),
        scheduler: Scheduler::new(&tuning),
        tilt: SharedTilt::new(),
        renderer,
        settings,
        last_time: 0.0,
        loop_running: true,
        frame_times: [0.0; 60],
        frame_index: 0,
        fps: 0,
    }));

    setup_sensor(&window, game.borrow().tilt.clone());
    setup_input_handlers(&canvas, game.clone());
    setup_restart_button(&document, game.clone());
    setup_teardown(&window, game.clone());

    request_animation_frame(game);
    log::info!("Tilt Shooter running!");
    Ok(())
}

/// Feed accelerometer x (in g) into the shared tilt slot
fn setup_sensor(window: &web_sys::Window, tilt: SharedTilt) {
    let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceMotionEvent| {
        if let Some(x) = event
            .acceleration_including_gravity()
            .and_then(|a| a.x())
        {
            tilt.set(x as f32 / STANDARD_GRAVITY);
        }
    });
    let _ = window.add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
    // Touch start (fire)
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            game.borrow_mut().on_tap();
        });
        let _ = canvas
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Mouse click (fire, for desktop browsers)
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().on_tap();
        });
        let _ = canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
    if let Some(btn) = document.get_element_by_id("restart-btn") {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().restart();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Stop every timer when the page goes away; start fresh timers if the
/// browser brings the page back from its back/forward cache
fn setup_teardown(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.scheduler.teardown();
            g.tilt.clear();
        });
        let _ = window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
        if !event.persisted() {
            return;
        }
        let restart_loop = {
            let mut g = game.borrow_mut();
            if !g.scheduler.is_torn_down() {
                return;
            }
            g.resume();
            !std::mem::replace(&mut g.loop_running, true)
        };
        // A frame queued before the page was hidden keeps the old loop alive
        if restart_loop {
            request_animation_frame(game.clone());
        }
    });
    let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
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
        if g.scheduler.is_torn_down() {
            g.loop_running = false;
            return;
        }
        g.update(time);
        g.render();
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            g.update_hud(&document);
        }
    }

    request_animation_frame(game);
}
