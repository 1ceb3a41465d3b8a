/// DOM wiring constants for the web front-end.
///
/// Effect tuning lives in `chaos_core::constants`; these only name the page
/// elements and canvas text settings the front-end relies on.
// Canvas the start hook mounts onto when present
pub const DEFAULT_CANVAS_ID: &str = "chaos-canvas";

// Status line shown when the microphone cannot be acquired
pub const STATUS_OVERLAY_ID: &str = "status-overlay";
pub const STATUS_HIDDEN_CLASS: &str = "hidden";

// Canvas text anchor for the centered idle prompt
pub const PROMPT_ALIGN: &str = "center";
pub const PROMPT_BASELINE: &str = "middle";

// Event names
pub const EVENT_RESIZE: &str = "resize";
pub const EVENT_CLICK: &str = "click";
pub const EVENT_TOUCHSTART: &str = "touchstart";

// Smallest backing size accepted for the canvas, in pixels
pub const MIN_CANVAS_PX: u32 = 1;
