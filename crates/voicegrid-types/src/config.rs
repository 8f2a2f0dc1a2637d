//! Persisted configuration: autoplay and speech settings.

use serde::{Deserialize, Serialize};

use crate::content::ContentKind;
use crate::error::Result;

/// Settings for the autoplay ("omakase") mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplaySettings {
    /// Content kinds eligible for playlist construction.
    pub enabled_kinds: Vec<ContentKind>,
    /// Per-item play budget in minutes.
    pub play_duration_mins: u32,
    /// Shuffle the generated playlist.
    pub shuffle: bool,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            enabled_kinds: vec![
                ContentKind::Novel,
                ContentKind::Podcast,
                ContentKind::Radio,
                ContentKind::RssNews,
            ],
            play_duration_mins: 10,
            shuffle: true,
        }
    }
}

impl AutoplaySettings {
    /// Whether a kind participates in playlist construction.
    pub fn is_enabled(&self, kind: ContentKind) -> bool {
        self.enabled_kinds.contains(&kind)
    }

    /// Toggle a kind on or off. Returns the new state.
    pub fn toggle(&mut self, kind: ContentKind) -> bool {
        if let Some(pos) = self.enabled_kinds.iter().position(|&k| k == kind) {
            self.enabled_kinds.remove(pos);
            false
        } else {
            self.enabled_kinds.push(kind);
            true
        }
    }

    /// Per-item play budget in seconds.
    pub fn per_item_secs(&self) -> u32 {
        self.play_duration_mins * 60
    }
}

/// Voice parameters applied to every utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Top-level persisted configuration record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceGridConfig {
    pub autoplay: AutoplaySettings,
    pub speech: SpeechSettings,
}

impl VoiceGridConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize the configuration to TOML text.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
