use crate::constants::EVENT_RESIZE;
use crate::dom::{self, Listener};
use chaos_core::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Keep the canvas matched to the viewport and respawn particles against the
/// new bounds.
pub fn wire_resize(
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<Scene>>,
) -> Option<Listener> {
    let window = web::window()?;
    let canvas = canvas.clone();
    let scene = scene.clone();
    Listener::new(&window, EVENT_RESIZE, move |_ev| {
        let bounds = dom::sync_canvas_to_viewport(&canvas);
        log::info!("[resize] {}x{}", bounds.width, bounds.height);
        scene.borrow_mut().resize(bounds);
    })
}
