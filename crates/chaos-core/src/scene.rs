use crate::config::{Config, DriveMode, IdleBehavior, ResizePolicy};
use crate::constants::*;
use crate::drive::{DriveSource, TapDrive};
use crate::lifecycle::{LifecycleEvent, Phase};
use crate::particle::{Bounds, Particle};
use crate::surface::{Color, Surface};
use rand::prelude::*;

/// Per-frame inputs gathered by the host before calling [`Scene::advance`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput<'a> {
    /// Analyser magnitude bins, `None` while no analyser is attached.
    pub bins: Option<&'a [u8]>,
    /// Host clock in milliseconds, used to drain tap decay deadlines.
    pub now_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub drive: f32,
    /// Particles were updated and drawn this frame.
    pub animated: bool,
    pub strobe: bool,
    pub prompt: bool,
    /// Particles that were re-randomized during the update pass.
    pub resets: usize,
}

/// The whole effect: a constant-size particle set, its drive signal and the
/// mount lifecycle.
pub struct Scene {
    config: Config,
    bounds: Bounds,
    particles: Vec<Particle>,
    drive: DriveSource,
    phase: Phase,
    last_drive: f32,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: Config, bounds: Bounds, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..config.particle_count.clamp(1, MAX_PARTICLE_COUNT))
            .map(|_| Particle::new(bounds, &mut rng))
            .collect();
        let drive = match config.drive {
            DriveMode::Microphone => DriveSource::Microphone,
            DriveMode::Touch => DriveSource::Touch(TapDrive::new()),
        };
        Self {
            config,
            bounds,
            particles,
            drive,
            phase: Phase::Uninitialized,
            last_drive: 0.0,
            rng,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drive signal computed by the most recent frame.
    pub fn drive(&self) -> f32 {
        self.last_drive
    }

    pub fn drive_source(&self) -> &DriveSource {
        &self.drive
    }

    pub fn wants_audio(&self) -> bool {
        self.drive.is_microphone()
    }

    fn transition(&mut self, event: LifecycleEvent) {
        let next = self.phase.on(event);
        if next != self.phase {
            log::info!("[scene] {:?} -> {:?} on {:?}", self.phase, next, event);
            self.phase = next;
        }
    }

    /// Start a mount against `bounds`. In microphone mode the scene waits in
    /// `AcquiringAudio` until [`Scene::audio_ready`] or [`Scene::audio_failed`].
    pub fn mount(&mut self, bounds: Bounds) {
        if self.phase.is_mounted() {
            return;
        }
        self.bounds = bounds;
        for p in &mut self.particles {
            p.reset(bounds, &mut self.rng);
        }
        let wants_audio = self.wants_audio();
        self.transition(LifecycleEvent::Mount { wants_audio });
    }

    pub fn audio_ready(&mut self) {
        self.transition(LifecycleEvent::PermissionGranted);
    }

    pub fn audio_failed(&mut self) {
        self.transition(LifecycleEvent::PermissionDenied);
    }

    /// Stop the mount. Queued tap decays are discarded with the drive state.
    pub fn unmount(&mut self) {
        if let DriveSource::Touch(taps) = &mut self.drive {
            taps.clear();
        }
        self.last_drive = 0.0;
        self.transition(LifecycleEvent::Unmount);
    }

    /// Feed a pointer tap. Only the touch drive reacts; returns the drive
    /// value after the tap.
    pub fn tap(&mut self, now_ms: f64) -> f32 {
        if !self.phase.is_mounted() {
            return self.last_drive;
        }
        self.transition(LifecycleEvent::Tap);
        match &mut self.drive {
            DriveSource::Touch(taps) => taps.tap(now_ms),
            DriveSource::Microphone => self.last_drive,
        }
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        let rng = &mut self.rng;
        match self.config.resize {
            ResizePolicy::ResetAll => {
                for p in &mut self.particles {
                    p.reset(bounds, rng);
                }
            }
            ResizePolicy::RespawnOutside => {
                self.particles
                    .iter_mut()
                    .filter(|p| !bounds.contains(p.position))
                    .for_each(|p| p.reset(bounds, rng));
            }
        }
        self.transition(LifecycleEvent::Resize);
    }

    /// Paint one frame onto `surface`.
    ///
    /// Trails the previous frame with translucent black, then either animates
    /// every particle (drive above the activation threshold, with a chance of
    /// a full-surface strobe) or falls back to the idle behavior.
    pub fn advance<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        input: FrameInput<'_>,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.phase.is_mounted() {
            return report;
        }

        surface.cover(Color::black(TRAIL_ALPHA));

        let drive = self.drive.sample(input.bins, input.now_ms);
        self.last_drive = drive;
        report.drive = drive;

        let active = drive > ACTIVATION_THRESHOLD;
        if active {
            let motion = self.config.motion;
            for p in &mut self.particles {
                if p.update(drive, self.bounds, motion, &mut self.rng) {
                    report.resets += 1;
                }
                p.draw(surface, &mut self.rng);
            }
            report.animated = true;

            if self.rng.gen::<f32>() < strobe_probability(drive) {
                let flash = Color::Rgba {
                    r: self.rng.gen::<f32>() * 255.0,
                    g: self.rng.gen::<f32>() * 255.0,
                    b: self.rng.gen::<f32>() * 255.0,
                    a: STROBE_ALPHA,
                };
                surface.cover(flash);
                report.strobe = true;
            }
        } else if self.config.idle == IdleBehavior::Prompt {
            draw_prompt(surface);
            report.prompt = true;
        }

        self.transition(LifecycleEvent::Frame { active });
        report
    }
}

/// Chance of a strobe flash in one frame at the given drive.
pub fn strobe_probability(drive: f32) -> f32 {
    (STROBE_PROBABILITY_PER_DRIVE * drive).clamp(0.0, 1.0)
}

fn draw_prompt<S: Surface + ?Sized>(surface: &mut S) {
    let (cx, cy) = (surface.width() / 2.0, surface.height() / 2.0);
    surface.set_fill(Color::white());
    surface.fill_text(PROMPT_TEXT, cx, cy, PROMPT_FONT);
}
