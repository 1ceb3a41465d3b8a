//! Runtime configuration selecting between the effect variants.
//!
//! Defaults reproduce the canonical microphone-driven field. The web
//! front-end overlays values from the page query string, e.g.
//! `?drive=touch&idle=blank&count=60`.

use crate::constants::*;
use crate::particle::Motion;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveMode {
    Microphone,
    Touch,
}

/// What the frame step shows while the drive sits at or below the
/// activation threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleBehavior {
    Blank,
    Prompt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Re-randomize every particle against the new bounds.
    ResetAll,
    /// Only reset particles that fall outside the new bounds.
    RespawnOutside,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown value {value:?} for `{key}`")]
    UnknownValue { key: String, value: String },
    #[error("`{key}` expects a number, got {value:?}")]
    InvalidNumber { key: String, value: String },
    #[error("hue step range {min}..={max} is empty")]
    EmptyRange { min: f32, max: f32 },
    #[error("hue step range {min}..={max} must not go backwards")]
    NegativeStep { min: f32, max: f32 },
    #[error("particle count must be at least 1")]
    ZeroCount,
    #[error("particle count {0} exceeds {max}", max = MAX_PARTICLE_COUNT)]
    CountTooLarge(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub drive: DriveMode,
    pub idle: IdleBehavior,
    pub resize: ResizePolicy,
    pub motion: Motion,
    pub particle_count: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drive: DriveMode::Microphone,
            idle: IdleBehavior::Prompt,
            resize: ResizePolicy::ResetAll,
            motion: Motion::default(),
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: None,
        }
    }
}

impl Config {
    /// Keys understood by [`Config::set`].
    pub const KEYS: &'static [&'static str] =
        &["drive", "idle", "resize", "growth", "hue", "count", "seed"];

    /// Apply already-decoded `(key, value)` pairs in order. Unknown keys are
    /// skipped. Every malformed pair is reported and leaves the corresponding
    /// field untouched.
    pub fn apply_pairs<K, V>(
        &mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Vec<ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .filter_map(|(k, v)| self.set(k.as_ref(), v.as_ref()).err())
            .collect()
    }

    /// Overlay `key=value` pairs from a raw query string (leading `?`
    /// optional). Values are taken verbatim; the web front-end decodes
    /// through `URLSearchParams` and calls [`Config::apply_pairs`] instead.
    pub fn apply_query(&mut self, query: &str) -> Vec<ConfigError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")));
        self.apply_pairs(pairs)
    }

    /// Defaults overlaid with `query`, plus whatever could not be applied.
    pub fn from_query(query: &str) -> (Self, Vec<ConfigError>) {
        let mut cfg = Self::default();
        let errors = cfg.apply_query(query);
        (cfg, errors)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "drive" => {
                self.drive = match value {
                    "mic" | "microphone" | "audio" => DriveMode::Microphone,
                    "touch" | "tap" | "click" => DriveMode::Touch,
                    _ => return Err(unknown()),
                }
            }
            "idle" => {
                self.idle = match value {
                    "blank" | "none" => IdleBehavior::Blank,
                    "prompt" => IdleBehavior::Prompt,
                    _ => return Err(unknown()),
                }
            }
            "resize" => {
                self.resize = match value {
                    "reset" => ResizePolicy::ResetAll,
                    "respawn" | "keep" => ResizePolicy::RespawnOutside,
                    _ => return Err(unknown()),
                }
            }
            "growth" => {
                self.motion.growth = match value {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    _ => return Err(unknown()),
                }
            }
            "hue" => {
                let (lo, hi) = value.split_once(',').unwrap_or((value, value));
                let min = parse_num::<f32>(key, lo)?;
                let max = parse_num::<f32>(key, hi)?;
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(ConfigError::EmptyRange { min, max });
                }
                if min < 0.0 {
                    return Err(ConfigError::NegativeStep { min, max });
                }
                self.motion.hue_step = (min, max);
            }
            "count" => {
                let n = parse_num::<usize>(key, value)?;
                if n == 0 {
                    return Err(ConfigError::ZeroCount);
                }
                if n > MAX_PARTICLE_COUNT {
                    return Err(ConfigError::CountTooLarge(n));
                }
                self.particle_count = n;
            }
            "seed" => self.seed = Some(parse_num::<u64>(key, value)?),
            _ => {}
        }
        Ok(())
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}
