// Host-side tests for the frame step: activation threshold, strobe rate,
// idle behaviors, resize and unmount.

mod common;

use chaos_core::constants::*;
use chaos_core::{
    strobe_probability, Bounds, Config, DriveMode, FrameInput, IdleBehavior, Phase,
    ResizePolicy, Scene,
};
use common::{Op, RecordingSurface};

const W: f32 = 800.0;
const H: f32 = 600.0;

fn mounted(config: Config) -> Scene {
    let mut scene = Scene::new(config, Bounds::new(W, H), 42);
    scene.mount(Bounds::new(W, H));
    scene
}

fn frame(
    scene: &mut Scene,
    surface: &mut RecordingSurface,
    bins: Option<&[u8]>,
) -> chaos_core::FrameReport {
    surface.clear();
    scene.advance(surface, FrameInput { bins, now_ms: 0.0 })
}

fn has_prompt(surface: &RecordingSurface) -> bool {
    surface
        .ops
        .iter()
        .any(|op| matches!(op, Op::Text(t, ..) if t == PROMPT_TEXT))
}

#[test]
fn mic_mount_waits_for_audio_and_prompts() {
    let mut scene = mounted(Config::default());
    assert_eq!(scene.phase(), Phase::AcquiringAudio);

    let mut s = RecordingSurface::new(W, H);
    let report = frame(&mut scene, &mut s, None);
    assert!(!report.animated);
    assert!(report.prompt);
    assert!(has_prompt(&s));
    assert_eq!(s.fills(), 0);
    assert_eq!(s.covers_with_alpha(TRAIL_ALPHA), 1);
}

#[test]
fn loud_audio_animates_every_particle() {
    let mut scene = mounted(Config::default());
    scene.audio_ready();
    assert_eq!(scene.phase(), Phase::Idle);

    let mut s = RecordingSurface::new(W, H);
    let bins = [128u8; 128];
    let report = frame(&mut scene, &mut s, Some(&bins[..]));
    assert_eq!(report.drive, 1.0);
    assert!(report.animated);
    assert_eq!(s.fills(), DEFAULT_PARTICLE_COUNT);
    assert_eq!(scene.particles().len(), DEFAULT_PARTICLE_COUNT);
    assert_eq!(scene.phase(), Phase::Active);
    assert!(!has_prompt(&s));
}

#[test]
fn drive_at_threshold_is_idle() {
    let mut scene = mounted(Config::default());
    scene.audio_ready();
    let mut s = RecordingSurface::new(W, H);

    // mean 12.8 -> exactly the threshold
    let at = [12u8, 13, 13, 13, 13];
    let report = frame(&mut scene, &mut s, Some(&at[..]));
    assert_eq!(report.drive, ACTIVATION_THRESHOLD);
    assert!(!report.animated);
    assert_eq!(s.fills(), 0);
    assert_eq!(scene.phase(), Phase::Idle);

    let above = [13u8; 8];
    let report = frame(&mut scene, &mut s, Some(&above[..]));
    assert!(report.drive > ACTIVATION_THRESHOLD);
    assert!(report.animated);
    assert_eq!(s.fills(), DEFAULT_PARTICLE_COUNT);
}

#[test]
fn blank_idle_draws_only_the_trail() {
    let config = Config {
        idle: IdleBehavior::Blank,
        ..Config::default()
    };
    let mut scene = mounted(config);
    scene.audio_ready();
    let mut s = RecordingSurface::new(W, H);
    let report = frame(&mut scene, &mut s, Some(&[0u8; 128][..]));
    assert!(!report.prompt);
    assert_eq!(s.ops.len(), 2, "set fill + trail rect only: {:?}", s.ops);
}

#[test]
fn denied_audio_keeps_rendering_prompt() {
    let mut scene = mounted(Config::default());
    scene.audio_failed();
    assert_eq!(scene.phase(), Phase::Failed);
    let mut s = RecordingSurface::new(W, H);
    let report = frame(&mut scene, &mut s, None);
    assert!(report.prompt);
    assert_eq!(scene.phase(), Phase::Failed);
}

fn strobe_rate(scene: &mut Scene, bins: Option<&[u8]>) -> f32 {
    let mut s = RecordingSurface::new(W, H);
    let n = 20_000;
    let mut flashes = 0;
    for _ in 0..n {
        let report = frame(scene, &mut s, bins);
        assert!(report.animated);
        if report.strobe {
            flashes += 1;
        }
    }
    flashes as f32 / n as f32
}

#[test]
fn strobe_rate_tracks_drive() {
    let config = Config {
        particle_count: 1,
        ..Config::default()
    };

    let mut scene = mounted(config.clone());
    scene.audio_ready();
    let bins = [255u8, 1]; // mean 128 -> drive 1.0
    let rate = strobe_rate(&mut scene, Some(&bins[..]));
    assert!((rate - 0.05).abs() < 0.01, "strobe rate {}", rate);

    // loudest possible analyser frame, drive 255/128
    let mut scene = mounted(config.clone());
    scene.audio_ready();
    let bins = [255u8; 16];
    let rate = strobe_rate(&mut scene, Some(&bins[..]));
    let expected = strobe_probability(255.0 / 128.0);
    assert!((rate - expected).abs() < 0.012, "strobe rate {} vs {}", rate, expected);

    // tap drive pinned at its cap
    let mut scene = mounted(Config {
        drive: DriveMode::Touch,
        ..config
    });
    for i in 0..60 {
        scene.tap(i as f64);
    }
    let rate = strobe_rate(&mut scene, None);
    assert!((rate - 0.25).abs() < 0.015, "strobe rate {}", rate);
}

#[test]
fn strobe_covers_surface_at_high_alpha() {
    let config = Config {
        particle_count: 1,
        ..Config::default()
    };
    let mut scene = mounted(config);
    scene.audio_ready();
    let mut s = RecordingSurface::new(W, H);
    let bins = [255u8; 16];
    for _ in 0..500 {
        if frame(&mut scene, &mut s, Some(&bins[..])).strobe {
            assert_eq!(s.covers_with_alpha(STROBE_ALPHA), 1);
            return;
        }
    }
    panic!("no strobe in 500 loud frames");
}

#[test]
fn strobe_probability_is_bounded() {
    assert_eq!(strobe_probability(0.0), 0.0);
    assert!((strobe_probability(2.0) - 0.1).abs() < 1e-6);
    assert_eq!(strobe_probability(40.0), 1.0);
}

#[test]
fn unmount_stops_painting() {
    let mut scene = mounted(Config::default());
    scene.audio_ready();
    scene.unmount();
    assert_eq!(scene.phase(), Phase::Uninitialized);
    let mut s = RecordingSurface::new(W, H);
    let report = frame(&mut scene, &mut s, Some(&[200u8; 128][..]));
    assert_eq!(report, Default::default());
    assert!(s.ops.is_empty());
}

#[test]
fn resize_keeps_every_particle_inside_new_bounds() {
    for policy in [ResizePolicy::ResetAll, ResizePolicy::RespawnOutside] {
        let config = Config {
            resize: policy,
            ..Config::default()
        };
        let mut scene = mounted(config);
        let small = Bounds::new(120.0, 90.0);
        scene.resize(small);
        assert_eq!(scene.bounds(), small);
        assert!(scene.particles().iter().all(|p| small.contains(p.position)));
    }
}

#[test]
fn respawn_policy_leaves_inside_particles_alone() {
    let config = Config {
        resize: ResizePolicy::RespawnOutside,
        ..Config::default()
    };
    let mut scene = mounted(config);
    let before = scene.particles().to_vec();
    scene.resize(Bounds::new(W * 2.0, H * 2.0));
    assert_eq!(scene.particles(), before.as_slice());
}

#[test]
fn touch_mode_taps_ramp_and_decay() {
    let config = Config {
        drive: DriveMode::Touch,
        ..Config::default()
    };
    let mut scene = mounted(config);
    assert_eq!(scene.phase(), Phase::Active);
    assert!(!scene.wants_audio());

    scene.tap(0.0);
    scene.tap(200.0);
    scene.tap(400.0);

    let mut s = RecordingSurface::new(W, H);
    let r = scene.advance(&mut s, FrameInput { bins: None, now_ms: 500.0 });
    assert!((r.drive - 1.2).abs() < 1e-6);
    assert!(r.animated);

    let r = scene.advance(&mut s, FrameInput { bins: None, now_ms: 1400.0 });
    assert_eq!(r.drive, 1.0);
}

#[test]
fn unmount_discards_pending_tap_decays() {
    let config = Config {
        drive: DriveMode::Touch,
        ..Config::default()
    };
    let mut scene = mounted(config);
    scene.tap(0.0);
    scene.tap(10.0);
    scene.unmount();
    match scene.drive_source() {
        chaos_core::DriveSource::Touch(t) => assert_eq!(t.pending_decays(), 0),
        other => panic!("unexpected source {:?}", other),
    }
}

#[test]
fn seeded_scenes_are_reproducible() {
    let run = || {
        let mut scene = mounted(Config::default());
        scene.audio_ready();
        let mut s = RecordingSurface::new(W, H);
        let bins = [180u8; 128];
        for _ in 0..30 {
            scene.advance(&mut s, FrameInput { bins: Some(&bins[..]), now_ms: 0.0 });
        }
        (scene.particles().to_vec(), s.ops)
    };
    assert_eq!(run(), run());
}

#[test]
fn resets_are_counted_only_while_animating() {
    let mut scene = mounted(Config::default());
    scene.audio_ready();
    let mut s = RecordingSurface::new(W, H);

    let quiet = [0u8; 16];
    for _ in 0..20 {
        assert_eq!(frame(&mut scene, &mut s, Some(&quiet[..])).resets, 0);
    }

    let loud = [255u8; 16];
    let mut total = 0;
    for _ in 0..100 {
        let report = frame(&mut scene, &mut s, Some(&loud[..]));
        assert!(report.resets <= scene.particles().len());
        total += report.resets;
    }
    assert!(total > 0, "no particle left the field in 100 loud frames");
}

#[test]
fn oversized_count_is_capped_at_construction() {
    let config = Config {
        particle_count: MAX_PARTICLE_COUNT * 4,
        ..Config::default()
    };
    let scene = Scene::new(config, Bounds::new(W, H), 1);
    assert_eq!(scene.particles().len(), MAX_PARTICLE_COUNT);
}
