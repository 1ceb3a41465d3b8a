//! The drive signal: one scalar per frame scaling all particle motion.

use crate::constants::*;
use std::collections::VecDeque;

/// Mean frequency-bin energy normalized so that ~1.0 reads as moderate
/// loudness. An empty buffer yields 0.0.
pub fn audio_drive(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    (sum as f32 / bins.len() as f32) / DRIVE_NORMALIZER
}

/// Tap-driven multiplier that ramps up under rapid repeated taps and falls
/// back to neutral once tapping stops.
///
/// Each tap queues a decrement deadline instead of arming a timer; deadlines
/// are drained by [`TapDrive::poll`], so dropping the value discards them.
#[derive(Clone, Debug)]
pub struct TapDrive {
    value: f32,
    count: u32,
    last_tap_ms: Option<f64>,
    pending: VecDeque<f64>,
}

impl Default for TapDrive {
    fn default() -> Self {
        Self {
            value: NEUTRAL_DRIVE,
            count: 0,
            last_tap_ms: None,
            pending: VecDeque::new(),
        }
    }
}

impl TapDrive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tap at `now_ms` and return the updated drive.
    pub fn tap(&mut self, now_ms: f64) -> f32 {
        self.poll(now_ms);
        let rapid = self
            .last_tap_ms
            .map(|last| now_ms - last < TAP_REPEAT_WINDOW_MS)
            .unwrap_or(false);
        if rapid {
            self.count += 1;
            self.value = (self.value + TAP_DRIVE_STEP).min(TAP_DRIVE_MAX);
        } else {
            self.count = 1;
        }
        self.last_tap_ms = Some(now_ms);
        self.pending.push_back(now_ms + TAP_DECAY_DELAY_MS);
        self.value
    }

    /// Apply every decrement due at or before `now_ms` and return the drive.
    pub fn poll(&mut self, now_ms: f64) -> f32 {
        while let Some(&due) = self.pending.front() {
            if due > now_ms {
                break;
            }
            self.pending.pop_front();
            self.count = self.count.saturating_sub(1);
            if self.count == 0 {
                self.value = NEUTRAL_DRIVE;
            }
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn repeat_count(&self) -> u32 {
        self.count
    }

    /// Number of decrements still waiting for their deadline.
    pub fn pending_decays(&self) -> usize {
        self.pending.len()
    }

    /// Drop all queued decrements and return to neutral.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Which producer owns the drive signal for a mount.
#[derive(Clone, Debug)]
pub enum DriveSource {
    /// Polls the analyser bins handed to each frame; no analyser means 0.0.
    Microphone,
    Touch(TapDrive),
}

impl DriveSource {
    pub fn sample(&mut self, bins: Option<&[u8]>, now_ms: f64) -> f32 {
        match self {
            DriveSource::Microphone => bins.map(audio_drive).unwrap_or(0.0),
            DriveSource::Touch(taps) => taps.poll(now_ms),
        }
    }

    pub fn is_microphone(&self) -> bool {
        matches!(self, DriveSource::Microphone)
    }
}
