use crate::constants::*;
use crate::surface::{Color, Surface};
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

/// Drawing-surface extent in surface pixels. Positions are valid inside
/// `[0, width] x [0, height]`, edges included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Rectangle,
    Triangle,
    Star,
    Polygon,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Circle,
        Shape::Rectangle,
        Shape::Triangle,
        Shape::Star,
        Shape::Polygon,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Per-update knobs that differ between effect variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// Random-walk the size every update and reset on underflow.
    pub growth: bool,
    /// Inclusive hue advance range, scaled by the drive signal.
    pub hue_step: (f32, f32),
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            growth: true,
            hue_step: DEFAULT_HUE_STEP,
        }
    }
}

/// One chaotic element. Always holds a freshly sampled or in-bounds state.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
    pub size: f32,
    pub shape: Shape,
}

#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    rng.gen_range(min..max)
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        let mut p = Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            hue: 0.0,
            saturation: 0.0,
            lightness: 0.0,
            alpha: 0.0,
            size: SIZE_RANGE.0,
            shape: Shape::Circle,
        };
        p.reset(bounds, rng);
        p
    }

    /// Resample every attribute uniformly within its range.
    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) {
        self.position = Vec2::new(
            sample_upto(rng, bounds.width),
            sample_upto(rng, bounds.height),
        );
        self.size = sample(rng, SIZE_RANGE);
        self.velocity = Vec2::new(sample(rng, SPEED_RANGE), sample(rng, SPEED_RANGE));
        self.rotation = rng.gen_range(0.0..TAU);
        self.rotation_speed = sample(rng, ROTATION_SPEED_RANGE);
        self.hue = sample(rng, HUE_RANGE);
        self.saturation = sample(rng, SATURATION_RANGE);
        self.lightness = sample(rng, LIGHTNESS_RANGE);
        self.alpha = sample(rng, ALPHA_RANGE);
        self.shape = Shape::random(rng);
    }

    /// Advance one frame scaled by `drive`. Returns `true` when the particle
    /// left the bounds or shrank below the minimum size and was reset.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        drive: f32,
        bounds: Bounds,
        motion: Motion,
        rng: &mut R,
    ) -> bool {
        self.position += self.velocity * drive;
        self.rotation += self.rotation_speed * drive;
        let (lo, hi) = motion.hue_step;
        let step = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
        self.hue = (self.hue + step * drive).rem_euclid(HUE_RANGE.1);
        if self.hue >= HUE_RANGE.1 {
            self.hue = 0.0;
        }
        if motion.growth {
            self.size += rng.gen_range(-GROWTH_STEP..GROWTH_STEP) * drive;
        }

        if !bounds.contains(self.position) || self.size < MIN_ALIVE_SIZE {
            self.reset(bounds, rng);
            return true;
        }
        false
    }

    pub fn color(&self) -> Color {
        Color::Hsla {
            h: self.hue,
            s: self.saturation,
            l: self.lightness,
            a: self.alpha,
        }
    }

    /// Paint the particle. The polygon side count is drawn from `rng` on every
    /// call, so polygons flicker between side counts frame to frame.
    pub fn draw<S: Surface + ?Sized, R: Rng + ?Sized>(&self, surface: &mut S, rng: &mut R) {
        surface.save();
        surface.translate(self.position.x, self.position.y);
        surface.rotate(self.rotation);
        surface.set_fill(self.color());
        surface.begin_path();

        let r = self.size / 2.0;
        match self.shape {
            Shape::Circle => surface.arc(0.0, 0.0, r, 0.0, TAU),
            Shape::Rectangle => surface.rect(-r, -r, self.size, self.size),
            shape => {
                let sides = match shape {
                    Shape::Polygon => rng.gen_range(POLYGON_MIN_SIDES..=POLYGON_MAX_SIDES),
                    _ => 0,
                };
                trace(surface, &outline(shape, self.size, sides));
            }
        }

        surface.close_path();
        surface.fill();
        surface.restore();
    }
}

// Uniform in [0, extent); a zero-sized surface pins the coordinate to 0.
#[inline]
fn sample_upto<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

/// Vertices of the polyline shapes, centered on the origin. `sides` is only
/// read for [`Shape::Polygon`]. Circles and rectangles are traced natively and
/// yield no vertices.
pub fn outline(shape: Shape, size: f32, sides: usize) -> SmallVec<[Vec2; 8]> {
    let r = size / 2.0;
    let mut pts = SmallVec::new();
    match shape {
        Shape::Circle | Shape::Rectangle => {}
        Shape::Triangle => {
            pts.push(Vec2::new(0.0, -r));
            pts.push(Vec2::new(r, r));
            pts.push(Vec2::new(-r, r));
        }
        Shape::Star => {
            // stepping two pentagon vertices at a time gives the pentagram
            for i in 0..STAR_POINTS {
                let a = i as f32 * 4.0 * PI / STAR_POINTS as f32;
                pts.push(Vec2::new(a.cos() * r, a.sin() * r));
            }
        }
        Shape::Polygon => {
            for i in 0..sides {
                let a = i as f32 * TAU / sides as f32;
                pts.push(Vec2::new(a.cos() * r, a.sin() * r));
            }
        }
    }
    pts
}

fn trace<S: Surface + ?Sized>(surface: &mut S, pts: &[Vec2]) {
    if let Some((first, rest)) = pts.split_first() {
        surface.move_to(first.x, first.y);
        for p in rest {
            surface.line_to(p.x, p.y);
        }
    }
}
