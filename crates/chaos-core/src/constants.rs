// Shared tuning constants for the chaos field. Ranges are half-open `[min, max)`
// unless noted.

// Particle set
pub const DEFAULT_PARTICLE_COUNT: usize = 100;
pub const MAX_PARTICLE_COUNT: usize = 5_000; // upper bound accepted from config

// Per-particle attribute ranges applied on reset
pub const SIZE_RANGE: (f32, f32) = (1.0, 100.0);
pub const SPEED_RANGE: (f32, f32) = (-10.0, 10.0);
pub const ROTATION_SPEED_RANGE: (f32, f32) = (-0.1, 0.1);
pub const HUE_RANGE: (f32, f32) = (0.0, 360.0);
pub const SATURATION_RANGE: (f32, f32) = (50.0, 100.0);
pub const LIGHTNESS_RANGE: (f32, f32) = (30.0, 70.0);
pub const ALPHA_RANGE: (f32, f32) = (0.1, 0.9);

// Organic growth: size random-walk per update (scaled by drive)
pub const GROWTH_STEP: f32 = 5.0;
pub const MIN_ALIVE_SIZE: f32 = 1.0;

// Hue advance per update (scaled by drive), inclusive
pub const DEFAULT_HUE_STEP: (f32, f32) = (1.0, 5.0);

// Shapes
pub const STAR_POINTS: usize = 5;
pub const POLYGON_MIN_SIDES: usize = 3;
pub const POLYGON_MAX_SIDES: usize = 7; // inclusive

// Frame loop
pub const TRAIL_ALPHA: f32 = 0.05; // low-alpha black fill each frame
pub const ACTIVATION_THRESHOLD: f32 = 0.1; // drive must exceed this to animate
pub const STROBE_PROBABILITY_PER_DRIVE: f32 = 0.05;
pub const STROBE_ALPHA: f32 = 0.8;

// Prompt shown while idle
pub const PROMPT_TEXT: &str = "Make some noise!";
pub const PROMPT_FONT: &str = "24px sans-serif";

// Microphone drive
pub const FFT_SIZE: u32 = 256;
pub const DRIVE_NORMALIZER: f32 = 128.0; // mean byte energy mapped so ~1.0 is moderate

// Touch drive
pub const NEUTRAL_DRIVE: f32 = 1.0;
pub const TAP_REPEAT_WINDOW_MS: f64 = 1000.0;
pub const TAP_DECAY_DELAY_MS: f64 = 1000.0;
pub const TAP_DRIVE_STEP: f32 = 0.1;
pub const TAP_DRIVE_MAX: f32 = 5.0;
