use crate::constants::MIN_CANVAS_PX;
use chaos_core::Bounds;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(
    document: &web::Document,
    id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

/// Viewport size in CSS pixels, falling back to the minimum canvas size when
/// the window reports nothing usable.
pub fn viewport_size() -> (u32, u32) {
    let dims = web::window().map(|w| {
        let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
        };
        (px(w.inner_width()), px(w.inner_height()))
    });
    let (w, h) = dims.unwrap_or((0, 0));
    (w.max(MIN_CANVAS_PX), h.max(MIN_CANVAS_PX))
}

/// Resize the canvas backing store to the viewport and return the new bounds.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> Bounds {
    let (w, h) = viewport_size();
    canvas.set_width(w);
    canvas.set_height(h);
    Bounds::new(w as f32, h as f32)
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                kind,
                closure,
            }),
            Err(e) => {
                log::error!("addEventListener({}) failed: {:?}", kind, e);
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}
