//! Mount lifecycle of the chaos field.
//!
//! ```text
//! Uninitialized --Mount(mic)--> AcquiringAudio --PermissionGranted--> Active <-> Idle
//!       |                              |
//!       +--Mount(touch)--> Active      +--PermissionDenied--> Failed
//! any --Unmount--> Uninitialized
//! ```
//! `Active` and `Idle` flip per frame depending on whether the drive signal
//! clears the activation threshold.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    AcquiringAudio,
    Active,
    Idle,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LifecycleEvent {
    Mount { wants_audio: bool },
    PermissionGranted,
    PermissionDenied,
    Unmount,
    Tap,
    Resize,
    /// Per-frame activation outcome.
    Frame { active: bool },
}

impl Phase {
    /// Next phase after `event`. Events that do not apply to the current
    /// phase leave it unchanged.
    pub fn on(self, event: LifecycleEvent) -> Phase {
        use LifecycleEvent as E;
        use Phase as P;
        match (self, event) {
            (_, E::Unmount) => P::Uninitialized,
            (P::Uninitialized, E::Mount { wants_audio: true }) => P::AcquiringAudio,
            (P::Uninitialized, E::Mount { wants_audio: false }) => P::Active,
            (P::AcquiringAudio, E::PermissionGranted) => P::Idle,
            (P::AcquiringAudio, E::PermissionDenied) => P::Failed,
            (P::Active | P::Idle, E::Frame { active }) => {
                if active {
                    P::Active
                } else {
                    P::Idle
                }
            }
            (phase, _) => phase,
        }
    }

    pub fn is_mounted(self) -> bool {
        self != Phase::Uninitialized
    }
}
