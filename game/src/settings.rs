use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_REWARD: u32 = 10;
pub const DEFAULT_LIVES: u32 = 3;
pub const DEFAULT_FEEDBACK_MS: u64 = 1_500;

/// Scoring and termination rules for one session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameRules {
    /// Points per correct placement.
    pub reward: u32,
    pub max_lives: u32,
    /// Placements needed to win. `None` means "every card left in the deck".
    pub total_cards: Option<usize>,
    /// Start with the first catalog card already on the timeline.
    pub opening_card: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            reward: DEFAULT_REWARD,
            max_lives: DEFAULT_LIVES,
            total_cards: None,
            opening_card: false,
        }
    }
}

impl GameRules {
    pub fn sanitized(mut self) -> Self {
        self.max_lives = self.max_lives.clamp(1, 99);
        self.total_cards = self.total_cards.filter(|&n| n > 0);
        self
    }
}

/// Timings for shell-side effects. None of these gate game actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PresentationSettings {
    pub feedback_ms: u64,
    pub autoscroll_interval_ms: u64,
    pub autoscroll_step_px: u32,
    pub autoscroll_edge_px: u32,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            feedback_ms: DEFAULT_FEEDBACK_MS,
            autoscroll_interval_ms: 16,
            autoscroll_step_px: 8,
            autoscroll_edge_px: 48,
        }
    }
}

impl PresentationSettings {
    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    pub fn autoscroll_interval(&self) -> Duration {
        Duration::from_millis(self.autoscroll_interval_ms.max(1))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioSettings {
    pub sfx_volume: f32,
    pub mute: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sfx_volume: 0.35,
            mute: false,
        }
    }
}

impl AudioSettings {
    pub fn effective_gain(self) -> f32 {
        if self.mute { 0.0 } else { self.sfx_volume }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub rules: GameRules,
    #[serde(default)]
    pub presentation: PresentationSettings,
    #[serde(default)]
    pub audio: AudioSettings,
    /// JSON catalog to play instead of the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Fixed deck seed; random per launch when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            rules: GameRules::default(),
            presentation: PresentationSettings::default(),
            audio: AudioSettings::default(),
            catalog_path: None,
            seed: None,
        }
    }
}

impl PlayerSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.rules = self.rules.sanitized();
        self.audio.sfx_volume = self.audio.sfx_volume.clamp(0.0, 1.0);
        self.presentation.feedback_ms = self.presentation.feedback_ms.min(10_000);
        self
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("CHRONOCARDS_SETTINGS_PATH") {
            return Self::new(PathBuf::from(explicit));
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(base.join("chronocards").join("settings.json"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn load(&self) -> PlayerSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            return PlayerSettings::default();
        };
        match serde_json::from_slice::<PlayerSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable settings: {err}");
                PlayerSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &PlayerSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
