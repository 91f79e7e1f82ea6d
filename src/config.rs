use std::io::Read;
use std::path::{Path, PathBuf};

use crate::input::SwipeConfig;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for a host embedding the engine. Every field is optional in the
/// TOML file.
///
/// ```toml
/// swipe_threshold = 20.0
/// single_touch_only = false
/// best_score_file = "~/.local/share/slide-2048/best"
/// seed = 42
/// history_limit = 256
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Minimum swipe travel for touch hosts; see [`Config::swipe`].
    pub swipe_threshold: f32,
    /// Ignore multi-touch gestures; see [`Config::swipe`].
    pub single_touch_only: bool,
    /// Where to persist the best score; in-memory only when absent.
    pub best_score_file: Option<PathBuf>,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
    /// Maximum undo depth; unlimited when absent.
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let swipe = SwipeConfig::default();
        Self {
            swipe_threshold: swipe.threshold,
            single_touch_only: swipe.single_touch_only,
            best_score_file: None,
            seed: None,
            history_limit: None,
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            )));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid("history_limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Swipe settings for touch hosts embedding the library. The terminal
    /// binary reads keys only and does not consult them.
    ///
    /// ```
    /// use slide_2048::config::Config;
    /// use slide_2048::engine::Direction;
    /// use slide_2048::input::{direction_from_swipe, Swipe};
    /// let cfg = Config::from_toml_str("swipe_threshold = 20.0").unwrap();
    /// assert_eq!(direction_from_swipe(Swipe::new(0.0, -25.0), &cfg.swipe()), Some(Direction::Up));
    /// assert_eq!(direction_from_swipe(Swipe::new(0.0, -25.0), &Config::default().swipe()), None);
    /// ```
    pub fn swipe(&self) -> SwipeConfig {
        SwipeConfig { threshold: self.swipe_threshold, single_touch_only: self.single_touch_only }
    }
}
