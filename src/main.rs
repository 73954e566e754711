//! Pudding Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use pudding_run::game::{FrameOutcome, InputOutcome};
    use pudding_run::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use pudding_run::platform::{InputSignal, SettingsToggle, TouchResponse};
    use pudding_run::renderer::{WebSurface, draw_frame};
    use pudding_run::{Game, HighScore, Settings, Tuning};

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        surface: WebSurface,
        store: Box<dyn KeyValueStore>,
        /// Pending animation frame, if any
        raf_id: Option<i32>,
        /// The frame callback; kept alive for re-arming
        frame_cb: Option<Closure<dyn FnMut(f64)>>,
    }

    impl App {
        fn redraw(&mut self) {
            draw_frame(&mut self.surface, &self.game);
        }

        fn toggle(&mut self, toggle: SettingsToggle) {
            let settings = toggle.apply(&self.game.settings);
            if let Err(e) = settings.save(self.store.as_mut()) {
                log::warn!("Settings not saved: {}", e);
            }
            log::info!("{:?} toggled", toggle);
            self.game.set_settings(settings);
            self.redraw();
        }

        fn save_high_score(&mut self) {
            if let Err(e) = self.game.high_score.save(self.store.as_mut()) {
                log::warn!("High score not saved: {}", e);
            }
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pudding Run starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let mut surface = WebSurface::new(&canvas).ok_or("no 2d context")?;
        surface.load_images();

        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        };
        let high_score = HighScore::load(store.as_ref());
        let settings = Settings::load(store.as_ref());

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, Tuning::default(), settings, high_score);
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            store,
            raf_id: None,
            frame_cb: None,
        }));

        install_frame_callback(&app);
        setup_input_handlers(&canvas, &document, &app)?;

        app.borrow_mut().redraw();
        log::info!("Pudding Run ready");
        Ok(())
    }

    fn install_frame_callback(app: &Rc<RefCell<App>>) {
        let weak = Rc::downgrade(app);
        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(app) = weak.upgrade() {
                game_loop(&app, time);
            }
        });
        app.borrow_mut().frame_cb = Some(closure);
    }

    /// Cancel any pending frame and schedule a fresh one
    fn arm_frame(app: &mut App) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(id) = app.raf_id.take() {
            let _ = window.cancel_animation_frame(id);
        }
        if let Some(cb) = app.frame_cb.as_ref() {
            match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => app.raf_id = Some(id),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }

    fn game_loop(app: &Rc<RefCell<App>>, time: f64) {
        let mut a = app.borrow_mut();
        a.raf_id = None;

        match a.game.frame(time) {
            FrameOutcome::Continue => {
                a.redraw();
                arm_frame(&mut a);
            }
            FrameOutcome::GameOver { new_best } => {
                if new_best {
                    a.save_high_score();
                }
                a.redraw();
            }
            FrameOutcome::Stopped => {}
        }
    }

    fn handle_signal(app: &Rc<RefCell<App>>, signal: InputSignal) {
        let mut a = app.borrow_mut();
        let outcome = a.game.handle_input(signal, now());
        if outcome == InputOutcome::Started {
            hide_start_message();
            a.redraw();
            arm_frame(&mut a);
        }
    }

    /// The page may carry its own start prompt outside the canvas
    fn hide_start_message() {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("startMsg"))
        else {
            return;
        };
        let _ = el.class_list().add_1("hidden");
        if let Ok(html) = el.dyn_into::<web_sys::HtmlElement>() {
            let _ = html.style().set_property("display", "none");
        }
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        document: &web_sys::Document,
        app: &Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(signal) = InputSignal::from_key(&event.code(), down, event.repeat()) {
                    event.prevent_default();
                    handle_signal(&app, signal);
                } else if let Some(toggle) =
                    SettingsToggle::from_key(&event.code(), down, event.repeat())
                {
                    app.borrow_mut().toggle(toggle);
                }
            });
            document.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch anywhere plays; non-passive so touches on the canvas do not scroll
        for (event_name, start) in [("touchstart", true), ("touchend", false)] {
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let on_canvas = event
                    .target()
                    .is_some_and(|t| t.dyn_ref::<HtmlCanvasElement>() == Some(&canvas));
                let response = TouchResponse::new(start, on_canvas);
                if response.prevent_default {
                    event.prevent_default();
                }
                handle_signal(&app, response.signal);
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            document.add_event_listener_with_callback_and_add_event_listener_options(
                event_name,
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main via #[wasm_bindgen(start)]
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pudding_run::consts::OPTIMAL_FRAME_MS;
    use pudding_run::game::{FrameOutcome, InputOutcome};
    use pudding_run::platform::InputSignal;
    use pudding_run::sim::autopilot_input;
    use pudding_run::{Game, HighScore, Settings, Tuning};
    use rand::SeedableRng;

    env_logger::init();
    log::info!("Pudding Run (native) starting headless autoplay...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut game = Game::new(seed, tuning, Settings::default(), HighScore::default());
    let mut pilot = rand_pcg::Pcg32::seed_from_u64(seed);
    const SESSIONS: u32 = 3;
    // About ten minutes of play per session at 60 Hz
    const MAX_FRAMES: u32 = 36_000;

    let mut now = 0.0;
    for _ in 0..SESSIONS {
        if game.handle_input(InputSignal::Press, now) != InputOutcome::Started {
            now += 1000.0;
            game.handle_input(InputSignal::Press, now);
        }
        for _ in 0..MAX_FRAMES {
            now += OPTIMAL_FRAME_MS;
            if autopilot_input(&game.state, &mut pilot).press {
                game.handle_input(InputSignal::Press, now);
            }
            match game.frame(now) {
                FrameOutcome::Continue => {}
                FrameOutcome::GameOver { .. } | FrameOutcome::Stopped => break,
            }
        }
        log::info!(
            "Autoplay session {} (seed {}): score {}, {:?}, top speed {:.2}, handoff {}",
            game.sessions(),
            game.state.seed,
            game.state.score,
            game.stats.reached,
            game.stats.top_speed,
            game.stats.handed_off
        );
        now += 1000.0;
    }
    log::info!("Best score: {}", game.high_score.best());
}
