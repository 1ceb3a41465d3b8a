#![cfg(target_arch = "wasm32")]
use chaos_core::{Config, Scene};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use audio::MicInput;
use constants::DEFAULT_CANVAS_ID;

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// Everything owned by one mount of the effect. Dropping it cancels the frame
/// loop, removes the listeners and releases the microphone.
struct Mounted {
    scene: Rc<RefCell<Scene>>,
    mic: Rc<RefCell<Option<MicInput>>>,
    alive: Rc<Cell<bool>>,
    frame_loop: frame::FrameLoop,
    _listeners: Vec<dom::Listener>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.alive.set(false);
        self.frame_loop.cancel();
        if let Some(mic) = self.mic.borrow_mut().take() {
            mic.close();
        }
        self.scene.borrow_mut().unmount();
        if let Some(doc) = dom::window_document() {
            if !overlay::is_hidden(&doc) {
                overlay::hide_status(&doc);
            }
        }
        log::info!("[mount] stopped");
    }
}

fn load_config(window: &web::Window) -> Config {
    let mut config = Config::default();
    let query = window.location().search().unwrap_or_default();
    let params = match web::UrlSearchParams::new_with_str(&query) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[config] unreadable query {:?}: {:?}", query, e);
            return config;
        }
    };
    let pairs = Config::KEYS
        .iter()
        .filter_map(|key| params.get(key).map(|value| (*key, value)));
    for e in config.apply_pairs(pairs) {
        log::warn!("[config] {}, keeping default", e);
    }
    config
}

fn spawn_audio(
    scene: Rc<RefCell<Scene>>,
    mic: Rc<RefCell<Option<MicInput>>>,
    alive: Rc<Cell<bool>>,
) {
    spawn_local(async move {
        match audio::acquire_microphone().await {
            Ok(input) if alive.get() => {
                *mic.borrow_mut() = Some(input);
                scene.borrow_mut().audio_ready();
            }
            // unmounted while the permission prompt was open
            Ok(input) => input.close(),
            Err(e) => {
                log::error!("Error initializing audio: {}", e);
                if alive.get() {
                    scene.borrow_mut().audio_failed();
                    if let Some(doc) = dom::window_document() {
                        overlay::show_status(&doc, &e.to_string());
                    }
                }
            }
        }
    });
}

fn mount_canvas(canvas_id: &str) -> anyhow::Result<Mounted> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let surface = render::CanvasSurface::new(&canvas)?;

    let config = load_config(&window);
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "[mount] #{} drive={:?} idle={:?} count={} seed={}",
        canvas_id,
        config.drive,
        config.idle,
        config.particle_count,
        seed
    );

    let bounds = dom::sync_canvas_to_viewport(&canvas);
    let scene = Rc::new(RefCell::new(Scene::new(config, bounds, seed)));
    scene.borrow_mut().mount(bounds);

    let mut listeners = events::wire_taps(&canvas, &scene);
    listeners.extend(events::wire_resize(&canvas, &scene));

    let mic = Rc::new(RefCell::new(None));
    let alive = Rc::new(Cell::new(true));
    if scene.borrow().wants_audio() {
        spawn_audio(scene.clone(), mic.clone(), alive.clone());
    }

    // frames run from the start; without an analyser they take the idle branch
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene: scene.clone(),
        surface,
        mic: mic.clone(),
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    Ok(Mounted {
        scene,
        mic,
        alive,
        frame_loop,
        _listeners: listeners,
    })
}

/// Mount the effect onto the canvas with the given element id, replacing any
/// previous mount.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<(), JsValue> {
    unmount();
    let mounted = mount_canvas(canvas_id).map_err(|e| JsValue::from_str(&e.to_string()))?;
    MOUNTED.with(|m| *m.borrow_mut() = Some(mounted));
    Ok(())
}

/// Stop the running effect, if any.
#[wasm_bindgen]
pub fn unmount() {
    let previous = MOUNTED.with(|m| m.borrow_mut().take());
    drop(previous);
}

/// Whether a mount currently has a live frame loop.
#[wasm_bindgen]
pub fn is_running() -> bool {
    MOUNTED.with(|m| {
        m.borrow()
            .as_ref()
            .map(|mounted| mounted.frame_loop.is_running())
            .unwrap_or(false)
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("chaos-web starting");

    let has_default_canvas = dom::window_document()
        .and_then(|d| d.get_element_by_id(DEFAULT_CANVAS_ID))
        .is_some();
    if has_default_canvas {
        if let Err(e) = mount(DEFAULT_CANVAS_ID) {
            log::error!("mount error: {:?}", e);
        }
    }
    Ok(())
}
