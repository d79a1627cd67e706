//! Tilt Bounce entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, DeviceOrientationEvent, HtmlCanvasElement, HtmlElement,
        KeyboardEvent, MouseEvent, PointerEvent,
    };

    use tilt_bounce::renderer::{CircleInstance, as_floats, colors, css_rgba};
    use tilt_bounce::sim::{
        GravityReceiver, GravitySender, Scene, TickInput, gravity_channel,
        gravity_from_orientation, tick,
    };
    use tilt_bounce::{Settings, canvas_to_ndc};

    // iOS gates orientation events behind a permission prompt
    #[wasm_bindgen(inline_js = "
        export function request_motion_permission() {
            if (typeof DeviceMotionEvent !== 'undefined' &&
                typeof DeviceMotionEvent.requestPermission === 'function') {
                return DeviceMotionEvent.requestPermission()
                    .then(p => p === 'granted')
                    .catch(() => false);
            }
            return Promise.resolve(true);
        }

        export function draw_circles(ctx, data, stride, width, height) {
            for (let i = 0; i + stride <= data.length; i += stride) {
                const cx = (data[i] + 1) * 0.5 * width;
                const cy = (1 - data[i + 1]) * 0.5 * height;
                const r = data[i + 2];
                const rgb = [data[i + 3], data[i + 4], data[i + 5]]
                    .map(c => Math.round(Math.min(Math.max(c, 0), 1) * 255));
                ctx.fillStyle = `rgba(${rgb[0]}, ${rgb[1]}, ${rgb[2]}, ${data[i + 6]})`;
                ctx.beginPath();
                ctx.ellipse(cx, cy, r * width * 0.5, r * height * 0.5, 0, 0, 2 * Math.PI);
                ctx.fill();
            }
        }
    ")]
    extern "C" {
        fn request_motion_permission() -> js_sys::Promise;
        fn draw_circles(
            ctx: &CanvasRenderingContext2d,
            data: &js_sys::Float32Array,
            stride: u32,
            width: f64,
            height: f64,
        );
    }

    /// Everything the frame loop owns
    struct Game {
        settings: Settings,
        scene: Scene,
        gravity_rx: GravityReceiver,
        gravity_tx: Rc<GravitySender>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        /// Body under the pointer while dragging
        held: Option<usize>,
        /// Set when the current press grabbed a body, so the click doesn't spawn
        grabbed_this_press: bool,
        motion_enabled: bool,
        total_collisions: u64,
    }

    impl Game {
        fn restart(&mut self, seed: u64) {
            self.held = None;
            self.scene.reset(seed);
        }

        /// Pointer position in normalized device coordinates
        fn pointer_ndc(&self, event: &MouseEvent) -> glam::Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            canvas_to_ndc(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
                rect.width() as f32,
                rect.height() as f32,
            )
        }

        fn resize(&self) {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            let dpr = window.device_pixel_ratio();
            let w = (self.canvas.client_width() as f64 * dpr) as u32;
            let h = (self.canvas.client_height() as f64 * dpr) as u32;
            if w != self.canvas.width() || h != self.canvas.height() {
                self.canvas.set_width(w);
                self.canvas.set_height(h);
                log::debug!("Canvas resized to {}x{}", w, h);
            }
        }

        /// Run one simulation tick
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).clamp(0.0, self.settings.max_frame_dt)
            } else {
                0.0
            };
            self.last_time = time;

            let input = TickInput::new(dt, self.gravity_rx.latest());
            let report = tick(&mut self.scene, &input);
            self.total_collisions += report.collisions as u64;

            if self.scene.time_ticks % 600 == 0 {
                log::debug!(
                    "{} ticks, {} bodies, {} collisions so far",
                    self.scene.time_ticks,
                    self.scene.len(),
                    self.total_collisions
                );
            }
        }

        /// Draw the current frame
        ///
        /// The whole snapshot crosses into JS once instead of once per circle.
        fn render(&self) {
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;

            self.ctx.set_fill_style_str(&css_rgba(colors::BACKGROUND));
            self.ctx.fill_rect(0.0, 0.0, w, h);

            let snapshot = self.scene.snapshot();
            let data = js_sys::Float32Array::from(as_floats(&snapshot));
            draw_circles(&self.ctx, &data, CircleInstance::FLOATS as u32, w, h);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tilt Bounce starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas = document
            .get_element_by_id("canvas")
            .expect("no #canvas element")
            .dyn_into::<HtmlCanvasElement>()
            .expect("#canvas is not a canvas");
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .expect("2d context unavailable");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let scene = match Scene::new(&settings, seed) {
            Ok(scene) => scene,
            Err(e) => {
                log::warn!("{} - falling back to defaults", e);
                Scene::new(&Settings::default(), seed).expect("default settings are valid")
            }
        };
        log::info!("Scene initialized with seed {} ({} bodies)", seed, scene.len());

        let (gravity_tx, gravity_rx) = gravity_channel(settings.initial_gravity());
        let use_device_gravity = settings.use_device_gravity;

        let game = Rc::new(RefCell::new(Game {
            settings,
            scene,
            gravity_rx,
            gravity_tx: Rc::new(gravity_tx),
            canvas: canvas.clone(),
            ctx,
            last_time: 0.0,
            held: None,
            grabbed_this_press: false,
            motion_enabled: false,
            total_collisions: 0,
        }));

        game.borrow().resize();
        setup_pointer_handlers(&canvas, game.clone());
        setup_resize(game.clone());
        setup_keyboard(game.clone());
        setup_motion_button(game.clone());
        if use_device_gravity {
            enable_motion(game.clone());
        }

        request_animation_frame(game);
        log::info!("Tilt Bounce running!");
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Grab a body
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let point = g.pointer_ndc(&event);
                g.held = g.scene.pick(point);
                g.grabbed_this_press = g.held.is_some();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drag it
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if let Some(index) = g.held {
                    let point = g.pointer_ndc(&event);
                    g.scene.drag_to(index, point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().held = None;
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            let _ = canvas.add_event_listener_with_callback(
                "pointercancel",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Click on empty space spawns a body
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.grabbed_this_press {
                    g.grabbed_this_press = false;
                    return;
                }
                let point = g.pointer_ndc(&event);
                g.scene.spawn_at(point);
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                "r" | "R" => {
                    let seed = js_sys::Date::now() as u64;
                    game.borrow_mut().restart(seed);
                }
                "g" | "G" => {
                    // Back to the static gravity setting
                    let g = game.borrow();
                    g.gravity_tx.send(g.settings.initial_gravity());
                    log::info!("Gravity reset to {:?}", g.settings.initial_gravity());
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_motion_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("enable-motion") {
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    g.settings.use_device_gravity = true;
                    g.settings.save();
                }
                enable_motion(game.clone());
                if let Some(el) = btn_clone.dyn_ref::<HtmlElement>() {
                    let _ = el.style().set_property("display", "none");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Ask for sensor permission, then route orientation events into the gravity channel
    fn enable_motion(game: Rc<RefCell<Game>>) {
        if game.borrow().motion_enabled {
            return;
        }

        let on_permission = Closure::once(move |granted: JsValue| {
            if !granted.as_bool().unwrap_or(false) {
                log::warn!("Motion permission denied");
                return;
            }

            let sender = {
                let mut g = game.borrow_mut();
                g.motion_enabled = true;
                g.gravity_tx.clone()
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
                if let Some(gravity) = gravity_from_orientation(event.beta(), event.gamma()) {
                    sender.send(gravity);
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window.add_event_listener_with_callback(
                    "deviceorientation",
                    closure.as_ref().unchecked_ref(),
                );
            }
            closure.forget();
            log::info!("Device orientation gravity enabled");
        });

        let _ = request_motion_permission().then(&on_permission);
        on_permission.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(game: Rc<RefCell<Game>>, time: f64) {
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tilt Bounce (native) starting...");
    log::info!("The interactive toy runs in the browser - build for wasm32 and serve with `trunk serve`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);

    if let Err(e) = run_headless(seed, 600) {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate `ticks` frames at 60 Hz while slowly tilting gravity around
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64, ticks: u32) -> Result<(), tilt_bounce::Error> {
    use tilt_bounce::Settings;
    use tilt_bounce::consts::NOMINAL_FRAME_DT;
    use tilt_bounce::sim::{Scene, TickInput, gravity_channel, gravity_from_orientation, tick};

    let settings = Settings::load();
    let mut scene = Scene::new(&settings, seed)?;
    let (gravity_tx, gravity_rx) = gravity_channel(settings.initial_gravity());
    log::info!("Scene initialized with seed {} ({} bodies)", seed, scene.len());

    let mut total_collisions = 0u64;
    for step in 0..ticks {
        // Fake a device rocking left and right
        let gamma = (step as f64 * NOMINAL_FRAME_DT as f64).sin() * 45.0;
        if let Some(g) = gravity_from_orientation(Some(60.0), Some(gamma)) {
            gravity_tx.send(g);
        }

        let input = TickInput::new(NOMINAL_FRAME_DT, gravity_rx.latest());
        let report = tick(&mut scene, &input);
        total_collisions += report.collisions as u64;
    }

    let escaped = scene
        .bodies()
        .iter()
        .filter(|b| !b.is_valid() || !scene.bounds.contains(b.pos, b.radius() - 1e-5))
        .count();

    log::info!(
        "{} ticks, {} collisions, {} bodies out of bounds",
        scene.time_ticks,
        total_collisions,
        escaped
    );
    println!("✓ Simulated {} ticks with {} collisions", scene.time_ticks, total_collisions);
    Ok(())
}
