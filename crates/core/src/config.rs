use crate::classify::Emotion;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

pub const DEFAULT_ANALYZE_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_ROLLING_WINDOW: usize = 7;
pub const DEFAULT_STABLE_THRESHOLD: usize = 3;
pub const DEFAULT_REACTION_DEBOUNCE_MS: u64 = 1000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 600;
pub const DEFAULT_PLAYLIST_URI: &str = "spotify:playlist:3Qk05c3iAoUQiHRb5UdfFJ";
pub const DEFAULT_PLAYLIST_WEB_URL: &str =
    "https://open.spotify.com/playlist/3Qk05c3iAoUQiHRb5UdfFJ?si=1e9c450a87684da5";
pub const ENV_PLAYLIST_URI: &str = "MOODMATE_PLAYLIST_URI";
pub const ENV_PLAYLIST_WEB_URL: &str = "MOODMATE_PLAYLIST_WEB_URL";

/// Tunables for detection smoothing. Each knob is independent; the only
/// cross-field rule is that the stability threshold must fit in the window.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectionConfig {
    pub analyze_interval_ms: u64,
    pub rolling_window: usize,
    pub stable_threshold: usize,
    pub reaction_debounce_ms: u64,
    pub poll_interval_ms: u64,
}

impl DetectionConfig {
    pub fn new(
        analyze_interval_ms: u64,
        rolling_window: usize,
        stable_threshold: usize,
        reaction_debounce_ms: u64,
        poll_interval_ms: u64,
    ) -> Result<Self, ConfigError> {
        if analyze_interval_ms == 0 {
            return Err(ConfigError::ZeroAnalyzeInterval);
        }
        if rolling_window == 0 {
            return Err(ConfigError::ZeroRollingWindow);
        }
        if stable_threshold == 0 {
            return Err(ConfigError::ZeroStableThreshold);
        }
        if stable_threshold > rolling_window {
            return Err(ConfigError::ThresholdExceedsWindow {
                threshold: stable_threshold,
                window: rolling_window,
            });
        }
        if poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(Self {
            analyze_interval_ms,
            rolling_window,
            stable_threshold,
            reaction_debounce_ms,
            poll_interval_ms,
        })
    }

    pub fn analyze_interval(&self) -> Duration {
        Duration::from_millis(self.analyze_interval_ms)
    }

    pub fn reaction_debounce(&self) -> Duration {
        Duration::from_millis(self.reaction_debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            analyze_interval_ms: DEFAULT_ANALYZE_INTERVAL_MS,
            rolling_window: DEFAULT_ROLLING_WINDOW,
            stable_threshold: DEFAULT_STABLE_THRESHOLD,
            reaction_debounce_ms: DEFAULT_REACTION_DEBOUNCE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// What the sampling loop records when the classifier fails for a tick.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OnClassifierFailure {
    #[default]
    SkipTick,
    RecordFallback(Emotion),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistConfig {
    pub uri: String,
    pub web_url: String,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_PLAYLIST_URI.to_owned(),
            web_url: DEFAULT_PLAYLIST_WEB_URL.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub detection: DetectionConfig,
    pub playlist: PlaylistConfig,
    pub on_classifier_failure: OnClassifierFailure,
    pub start_time: SystemTime,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("analyze interval must be > 0 ms")]
    ZeroAnalyzeInterval,
    #[error("rolling window must hold at least one sample")]
    ZeroRollingWindow,
    #[error("stable threshold must be > 0")]
    ZeroStableThreshold,
    #[error("stable threshold {threshold} cannot exceed rolling window {window}")]
    ThresholdExceedsWindow { threshold: usize, window: usize },
    #[error("poll interval must be > 0 ms")]
    ZeroPollInterval,
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_string_with_default(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
    default: &str,
) -> String {
    match cli_value {
        Some(v) => v,
        None => env.var(env_key).unwrap_or_else(|| default.to_owned()),
    }
}

pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Option<String> {
    match cli_value {
        Some(v) => Some(v),
        None => env.var(env_key),
    }
}
