//! Dino Valentine entry point
//!
//! In the browser: sets up the page, the WebGPU renderer and the frame loop.
//! Natively: runs a headless autopilot game through to the celebration.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, Element, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use dino_valentine::platform::dom::{self, PhraseOverlay};
    use dino_valentine::platform::{DomPanels, iso_timestamp, send_notification};
    use dino_valentine::renderer::{RenderState, build_scene};
    use dino_valentine::sim::{Answer, GameEvent, GameState};
    use dino_valentine::ui::KeyAction;
    use dino_valentine::{Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session<DomPanels>,
        render_state: Option<RenderState>,
        phrase: PhraseOverlay,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(session: Session<DomPanels>, phrase: PhraseOverlay) -> Self {
            Self {
                session,
                render_state: None,
                phrase,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One simulation step
        fn update(&mut self, time: f64) {
            for event in self.session.frame(time) {
                match event {
                    GameEvent::WordRevealed { word, cleared } => {
                        log::debug!("Word {cleared}: {word}")
                    }
                    GameEvent::ProposalReady => log::info!("Proposal shown"),
                    _ => {}
                }
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    let fps = (60000.0 / elapsed).round() as u32;
                    if fps != self.fps {
                        log::debug!("FPS: {fps}");
                    }
                    self.fps = fps;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = build_scene(self.session.state());
            self.phrase.update(&scene);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let viewport = render_state.viewport;
                        render_state.resize(w, h, viewport);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn answer(&mut self, answer: Answer) {
            if let Some(notification) = self.session.respond(answer, iso_timestamp()) {
                send_notification(notification);
            }
        }
    }

    /// Same clock as the animation frame timestamps
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or_else(js_sys::Date::now, |p| p.now())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dino Valentine starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = dom::canvas(&document).ok_or("no canvas")?;
        let (width, height, css_w, css_h) = dom::fit_canvas(&canvas);

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::with_tuning(seed, Tuning::load());
        state.set_viewport(css_w, css_h);
        let session = Session::new(state, DomPanels::new(document.clone()));
        let game = Rc::new(RefCell::new(Game::new(
            session,
            PhraseOverlay::new(&document),
        )));
        log::info!("Game initialized with seed: {}", seed);

        match init_renderer(&canvas, width, height, css_w, css_h).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("WebGPU unavailable, running without graphics: {e:#}"),
        }

        setup_keyboard(game.clone());
        setup_touch(game.clone());
        setup_buttons(game.clone());
        setup_resize(canvas, game.clone());

        request_animation_frame(game);

        log::info!("Dino Valentine running!");
        Ok(())
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        css_w: f32,
        css_h: f32,
    ) -> anyhow::Result<RenderState> {
        use anyhow::Context;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to get adapter")?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, glam::Vec2::new(css_w, css_h)).await
    }

    fn add_listener<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not listen for {event}");
        }
        closure.forget();
    }

    /// Non-passive listener, so the handler may call `prevent_default`
    fn add_active_listener<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        if target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .is_err()
        {
            log::warn!("Could not listen for {event}");
        }
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        add_listener(&window, "keydown", move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match KeyAction::from_key(&event.key()) {
                Some(KeyAction::Jump) => {
                    event.prevent_default();
                    g.session.jump();
                }
                Some(KeyAction::ToggleAutopilot) => {
                    g.session.autopilot = !g.session.autopilot;
                    log::info!("Autopilot: {}", g.session.autopilot);
                }
                None => {}
            }
        });
    }

    fn setup_touch(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        add_active_listener(&window, "touchstart", move |event: TouchEvent| {
            // Buttons handle their own touches
            let on_button = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("button").ok().flatten())
                .is_some();
            if !on_button {
                // No double-tap zoom or scroll
                event.prevent_default();
                game.borrow_mut().session.jump();
            }
        });
    }

    /// Button press by click or touch
    fn on_press(game: &Rc<RefCell<Game>>, id: &str, action: fn(&mut Game)) {
        let Some(btn) = dom::document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Missing button #{id}");
            return;
        };
        for event in ["click", "touchstart"] {
            let game = game.clone();
            add_listener(&btn, event, move |event: web_sys::Event| {
                // A touch would otherwise also fire a click
                event.prevent_default();
                event.stop_propagation();
                action(&mut game.borrow_mut());
            });
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        on_press(&game, "start-btn", |g| {
            g.session.start(now_ms());
        });
        on_press(&game, "retry-btn", |g| {
            g.session.start(now_ms());
        });
        on_press(&game, "restart-btn", |g| {
            g.session.restart(now_ms());
        });
        on_press(&game, "yes-btn", |g| g.answer(Answer::Yes));
        on_press(&game, "no-btn", |g| g.answer(Answer::No));
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        add_listener(&window, "resize", move |_event: web_sys::Event| {
            let (width, height, css_w, css_h) = dom::fit_canvas(&canvas);
            let mut g = game.borrow_mut();
            g.session.set_viewport(css_w, css_h);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height, glam::Vec2::new(css_w, css_h));
            }
        });
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
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_valentine::consts::FRAME_MS;
    use dino_valentine::sim::{Answer, GameEvent, GamePhase, GameState};
    use dino_valentine::ui::PanelSet;
    use dino_valentine::{Session, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dino Valentine (headless) starting...");
    log::info!("The browser build is the real game; this runs the autopilot to the end");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(14);
    let mut session = Session::new(GameState::with_tuning(seed, Tuning::load()), PanelSet::new());
    session.autopilot = true;
    session.start(0.0);

    let mut frame = 0u32;
    while session.phase() == GamePhase::Playing && frame < 10_000 {
        frame += 1;
        for event in session.frame(frame as f64 * FRAME_MS) {
            match event {
                GameEvent::WordRevealed { word, cleared } => {
                    log::info!("frame {frame}: cleared #{cleared}, revealed {word:?}")
                }
                GameEvent::PhraseComplete => {
                    log::info!("frame {frame}: \"{}\"", session.state().phrase.revealed_text())
                }
                GameEvent::ProposalReady => log::info!("frame {frame}: proposal on screen"),
                GameEvent::GameOver => log::warn!("frame {frame}: autopilot crashed"),
                _ => {}
            }
        }
    }

    if session.phase() != GamePhase::Proposal {
        log::error!("Run ended in {:?} after {frame} frames", session.phase());
        std::process::exit(1);
    }

    if let Some(notification) = session.respond(Answer::Yes, "headless") {
        match notification.to_json() {
            Ok(json) => log::info!("Would POST {json}"),
            Err(e) => log::warn!("Could not encode notification: {e}"),
        }
    }

    let mut celebration = 0u32;
    while !session.state().particles.is_empty() {
        celebration += 1;
        session.frame((frame + celebration) as f64 * FRAME_MS);
    }
    log::info!(
        "Celebration faded after {celebration} frames; panels: {:?}",
        session.panels().visible()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
