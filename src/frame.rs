use crate::audio::MicInput;
use crate::render::CanvasSurface;
use chaos_core::{FrameInput, Scene};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub surface: CanvasSurface,
    pub mic: Rc<RefCell<Option<MicInput>>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now_ms = instant::now();
        let mut mic = self.mic.borrow_mut();
        let bins = mic.as_mut().map(|m| m.read_bins());
        self.scene
            .borrow_mut()
            .advance(&mut self.surface, FrameInput { bins, now_ms });
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running requestAnimationFrame loop.
pub struct FrameLoop {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancel the scheduled frame and drop the tick closure.
    pub fn cancel(&self) {
        self.running.set(false);
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // breaks the closure's self-reference
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request(tick: &Tick, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else { return };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let running = Rc::new(Cell::new(true));

    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    let running_clone = running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        if !running_clone.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        request(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));

    request(&tick, &pending);
    FrameLoop {
        tick,
        pending,
        running,
    }
}
