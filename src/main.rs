//! Neon Intro entry point
//!
//! Wires the deterministic sim layer to the browser: one RAF loop drives
//! every component, event listeners feed pointer/keyboard input in.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, InputEvent, KeyboardEvent, MouseEvent};

    use neon_intro::audio::{AudioManager, SoundCue};
    use neon_intro::consts::*;
    use neon_intro::painter::Painter;
    use neon_intro::sim::{
        Blink, BootPhase, Dialogue, DialogueCue, FieldConfig, GlitchPulse, LoadingProgress,
        MotionField, Ripple, Timeline, TriggerBuffer,
    };
    use neon_intro::stage::Stage;
    use neon_intro::tuning::Tuning;

    /// Loading-screen hand-off to the boot timeline
    #[derive(Clone, Copy)]
    enum BootGate {
        /// Progress bar still ticking
        Loading,
        /// Hit 100%, settling before the fade-out class
        Settling { until: f64 },
        /// Fading out before the host is removed
        Fading { until: f64 },
        /// Timeline active
        Running,
    }

    /// Everything the page animates, behind one RefCell
    struct App {
        stage: Stage,
        audio: AudioManager,
        loading: LoadingProgress,
        gate: BootGate,
        timeline: Option<Timeline>,
        dialogue: Dialogue,
        nodes: MotionField,
        particles: MotionField,
        node_painter: Option<Painter>,
        particle_painter: Option<Painter>,
        /// Node canvas only animates once its boot phase reveals it
        nodes_active: bool,
        ripple: Ripple,
        blink: Blink,
        glitch: GlitchPulse,
        easter: TriggerBuffer,
        /// Last text mirrored into the dialogue element
        shown_text: String,
    }

    impl App {
        /// Advance every component that has come due and repaint
        fn frame(&mut self, now: f64) {
            self.poll_loading(now);

            let due = match self.timeline.as_mut() {
                Some(timeline) => timeline.poll(now),
                None => Vec::new(),
            };
            for phase in due {
                apply_phase(self, phase, now);
            }

            for cue in self.dialogue.poll(now) {
                match cue {
                    DialogueCue::IndicatorShown => {
                        self.stage.set_style("typingIndicator", "display", "flex")
                    }
                    DialogueCue::IndicatorHidden => {
                        self.stage.set_style("typingIndicator", "display", "none")
                    }
                    DialogueCue::Keystroke => self.audio.play(SoundCue::Keystroke),
                    DialogueCue::RevealWelcome => self.stage.add_class("welcomeText", "visible"),
                    DialogueCue::RevealCtas => self.stage.add_class("ctaContainer", "visible"),
                }
            }
            if self.dialogue.display() != self.shown_text {
                self.shown_text = self.dialogue.display().to_string();
                self.stage.set_text("dialogueText", &self.shown_text);
            }

            self.particles.step();
            if let Some(painter) = &self.particle_painter {
                painter.draw(&self.particles);
            }
            if self.nodes_active {
                self.nodes.step();
                if let Some(painter) = &self.node_painter {
                    painter.draw(&self.nodes);
                }
            }

            if self.ripple.poll_expired(now) {
                self.stage.set_style("cursorRipple", "width", "0");
                self.stage.set_style("cursorRipple", "height", "0");
                self.stage.set_style("cursorRipple", "opacity", "0");
            }
            match self.blink.poll(now) {
                Some(true) => self
                    .stage
                    .set_style_sel(".smarty-pfp", "transform", "scaleY(0.1)"),
                Some(false) => self.stage.set_style_sel(".smarty-pfp", "transform", ""),
                None => {}
            }
            if self.glitch.poll_expired(now) {
                self.stage.set_style_sel(".smarty-pfp", "filter", "");
                self.stage.set_style_sel(
                    ".smarty-pfp",
                    "animation",
                    "floatIdle 4s ease-in-out infinite",
                );
            }
        }

        fn poll_loading(&mut self, now: f64) {
            match self.gate {
                BootGate::Loading => {
                    if let Some(tick) = self.loading.poll(now) {
                        self.stage.set_width_pct("loadingProgress", tick.percent);
                        self.stage
                            .set_text("loadingStatus", &format!("{}%", tick.percent.floor() as u32));
                        if tick.completed {
                            self.gate = BootGate::Settling {
                                until: now + LOADING_SETTLE_MS,
                            };
                        }
                    }
                }
                BootGate::Settling { until } if now >= until => {
                    self.stage.add_class("loadingScreen", "hidden");
                    self.gate = BootGate::Fading {
                        until: now + LOADING_FADE_MS,
                    };
                }
                BootGate::Fading { until } if now >= until => {
                    self.stage.set_style("loadingScreen", "display", "none");
                    self.timeline = Some(Timeline::start(now));
                    self.gate = BootGate::Running;
                    log::info!("Boot timeline started");
                }
                _ => {}
            }
        }

        /// Ripple when the pointer passes near the avatar container
        fn pointer_moved(&mut self, x: f32, y: f32, now: f64) {
            let Some((cx, cy)) = self.stage.center_of("smartyPants") else {
                return;
            };
            let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            if self.ripple.trigger(dist, now) {
                let px = format!("{RIPPLE_SIZE_PX}px");
                self.stage.set_style("cursorRipple", "width", &px);
                self.stage.set_style("cursorRipple", "height", &px);
                self.stage.set_style("cursorRipple", "opacity", "0.6");
            }
        }

        /// Hidden-input characters feed the trigger buffer
        fn input_received(&mut self, data: &str, now: f64) {
            if !self.easter.push(data) {
                return;
            }
            self.stage.clear_input("hiddenInput");
            self.dialogue.easter_egg(now);
            // The glitch pulse fires on every match, whether or not the
            // dialogue response was dropped by its guard.
            self.glitch.fire(now);
            self.stage.set_style_sel(".smarty-pfp", "animation", "none");
            self.stage.set_style_sel(
                ".smarty-pfp",
                "filter",
                "hue-rotate(180deg) saturate(3)",
            );
            log::info!("Easter egg triggered");
        }

        fn resized(&mut self) {
            if let Some(painter) = &self.particle_painter {
                let (w, h) = painter.resize_to_viewport();
                self.particles.resize(w, h);
            }
            if let Some(painter) = &self.node_painter {
                let (w, h) = painter.resize_to_viewport();
                self.nodes.resize(w, h);
            }
        }
    }

    /// One-time UI mutations per boot phase; missing targets are no-ops
    fn apply_phase(app: &mut App, phase: BootPhase, now: f64) {
        match phase {
            BootPhase::DataStream => app.stage.add_class("dataStream", "active"),
            BootPhase::HoloRings => app.stage.add_class("holoRings", "active"),
            BootPhase::NeuralCanvas => {
                app.stage.add_class("neuralCanvas", "active");
                app.nodes_active = true;
            }
            BootPhase::BlurBackdrop => {
                for id in ["dataStream", "holoRings", "neuralCanvas"] {
                    app.stage.add_class(id, "blur-background");
                }
            }
            BootPhase::MainContent => app.stage.add_class("mainContent", "visible"),
            BootPhase::DialogueWrapper => {
                app.stage.add_class_sel(".smarty-dialogue-wrapper", "appear")
            }
            BootPhase::DialogueStart => app.dialogue.begin(now),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Intro starting...");

        let now = js_sys::Date::now();
        let seed = now as u64;
        let tuning = Tuning::load();

        let particle_painter = Painter::attach("particleCanvas");
        let node_painter = Painter::attach("neuralCanvas");
        let (w, h) = particle_painter
            .as_ref()
            .map(|p| p.resize_to_viewport())
            .unwrap_or((0.0, 0.0));
        if let Some(painter) = &node_painter {
            painter.resize_to_viewport();
        }

        let app = Rc::new(RefCell::new(App {
            stage: Stage::new(),
            audio: AudioManager::new(),
            loading: LoadingProgress::new(seed, now),
            gate: BootGate::Loading,
            timeline: None,
            dialogue: Dialogue::new(tuning.script.clone(), seed.wrapping_add(1)),
            nodes: MotionField::new(FieldConfig::nodes(), w, h, seed.wrapping_add(2)),
            particles: MotionField::new(FieldConfig::particles(), w, h, seed.wrapping_add(3)),
            node_painter,
            particle_painter,
            nodes_active: false,
            ripple: Ripple::default(),
            blink: Blink::new(seed.wrapping_add(4), now),
            glitch: GlitchPulse::default(),
            easter: TriggerBuffer::new(&tuning.script.easter_trigger),
            shown_text: String::new(),
        }));

        {
            let a = app.borrow();
            a.audio.play(SoundCue::Boot);
            a.stage.focus("hiddenInput");
        }

        setup_resize(app.clone());
        setup_pointer(app.clone());
        setup_cta_buttons(app.clone());
        setup_easter_egg(app.clone());

        request_animation_frame(app);

        log::info!("Neon Intro running (seed {seed})");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, _raf_time: f64) {
        // Date::now keeps one clock across RAF, events, and the sim layer
        app.borrow_mut().frame(js_sys::Date::now());
        request_animation_frame(app);
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resized();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            app.borrow_mut().pointer_moved(
                event.client_x() as f32,
                event.client_y() as f32,
                js_sys::Date::now(),
            );
        });
        let _ =
            document.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_cta_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(buttons) = document.query_selector_all(".cta-button") else {
            return;
        };

        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i) else {
                continue;
            };
            let Ok(button) = button.dyn_into::<Element>() else {
                continue;
            };
            let protocol = button.get_attribute("data-protocol").unwrap_or_default();

            {
                let app = app.clone();
                let protocol = protocol.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    app.borrow_mut()
                        .dialogue
                        .hover_enter(&protocol, js_sys::Date::now());
                });
                let _ = button
                    .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    app.borrow_mut().dialogue.hover_leave();
                });
                let _ = button
                    .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    event.prevent_default();
                    app.borrow_mut().dialogue.click(js_sys::Date::now());
                });
                let _ = button
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_easter_egg(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(input) = document.get_element_by_id("hiddenInput") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: InputEvent| {
                if let Some(data) = event.data() {
                    app.borrow_mut().input_received(&data, js_sys::Date::now());
                }
            });
            let _ =
                input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keep the hidden field focused so capture is continuous
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: KeyboardEvent| {
                app.borrow().stage.focus("hiddenInput");
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Intro (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning headless boot sequence...");
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the full boot choreography on a synthetic clock
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use neon_intro::consts::LOADING_TICK_MS;
    use neon_intro::sim::{
        BootPhase, Dialogue, DialogueCue, LoadingPhase, LoadingProgress, Timeline,
    };
    use neon_intro::tuning::Tuning;

    let tuning = Tuning::load();
    let mut now = 0.0;

    let mut loading = LoadingProgress::new(7, now);
    while loading.phase == LoadingPhase::Running {
        now += LOADING_TICK_MS;
        let _ = loading.poll(now);
    }
    println!("✓ loading completed at t={now}ms");

    let mut timeline = Timeline::start(now);
    let mut dialogue = Dialogue::new(tuning.script, 7);
    loop {
        now += 16.0;
        for phase in timeline.poll(now) {
            if phase == BootPhase::DialogueStart {
                dialogue.begin(now);
            }
        }
        for cue in dialogue.poll(now) {
            if cue == DialogueCue::RevealCtas {
                println!("✓ dialogue finished: {}", dialogue.display());
                return;
            }
        }
        assert!(now < 300_000.0, "dialogue never finished");
    }
}
