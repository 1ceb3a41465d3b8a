use crate::constants::{EVENT_CLICK, EVENT_TOUCHSTART};
use crate::dom::Listener;
use chaos_core::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Feed canvas clicks and touches into the scene's tap drive.
///
/// `touchstart` cancels its default so a touch is not counted a second time
/// through the emulated click that follows it.
pub fn wire_taps(canvas: &web::HtmlCanvasElement, scene: &Rc<RefCell<Scene>>) -> Vec<Listener> {
    let mut listeners = Vec::with_capacity(2);

    let scene_click = scene.clone();
    listeners.extend(Listener::new(canvas, EVENT_CLICK, move |_ev| {
        on_tap(&scene_click, "click");
    }));

    let scene_touch = scene.clone();
    listeners.extend(Listener::new(canvas, EVENT_TOUCHSTART, move |ev| {
        ev.prevent_default();
        on_tap(&scene_touch, "touch");
    }));

    listeners
}

fn on_tap(scene: &Rc<RefCell<Scene>>, source: &str) {
    let mut scene = scene.borrow_mut();
    let before = scene.drive();
    let after = scene.tap(instant::now());
    if scene.wants_audio() {
        log::debug!("[tap] {} ignored in microphone mode", source);
    } else if after != before {
        log::debug!("[tap] {} drive {:.2} -> {:.2}", source, before, after);
    }
}
