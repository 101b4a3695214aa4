//! Settings struct with TOML-based sections.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{SubtitleAnimation, VoiceGender};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Subtitle derivation and styling.
    #[serde(default)]
    pub subtitles: SubtitleSettings,

    /// Dubbing defaults.
    #[serde(default)]
    pub dubbing: DubbingSettings,

    /// Render budgets and mixing defaults.
    #[serde(default)]
    pub render: RenderSettings,
}

/// Workspace and log locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root folder for per-job working directories.
    #[serde(default = "default_workspace_root")]
    pub workspace_root: String,

    /// Folder for per-job log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_workspace_root() -> String {
    "workspace".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            workspace_root: default_workspace_root(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Suppress external-tool output lines, keeping only the tail buffer.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of buffered output lines shown after an error.
    #[serde(default = "default_error_tail")]
    pub error_tail: usize,

    /// Prefix log lines with timestamps.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> usize {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}

/// Subtitle derivation and styling defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleSettings {
    /// Font family for burned-in subtitles.
    #[serde(default = "default_font")]
    pub font: String,

    /// Maximum words per subtitle cue before chunking.
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Per-line animation for the styled-events artifact.
    #[serde(default)]
    pub animation: SubtitleAnimation,
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_max_words() -> usize {
    5
}

impl Default for SubtitleSettings {
    fn default() -> Self {
        Self {
            font: default_font(),
            max_words: default_max_words(),
            animation: SubtitleAnimation::None,
        }
    }
}

/// Dubbing defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DubbingSettings {
    /// Default voice gender when a request does not specify one.
    #[serde(default)]
    pub voice_gender: VoiceGender,
}

/// Render budgets and mixing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Wall-clock budget for one clip render, in seconds.
    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,

    /// Default background-music volume scale.
    #[serde(default = "default_bg_volume")]
    pub background_volume: f64,
}

fn default_render_timeout() -> u64 {
    600
}

fn default_bg_volume() -> f64 {
    0.2
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            render_timeout_secs: default_render_timeout(),
            background_volume: default_bg_volume(),
        }
    }
}

impl RenderSettings {
    /// The render budget as a duration.
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_budgets() {
        let settings = Settings::default();
        assert_eq!(settings.render.render_timeout(), Duration::from_secs(600));
        assert_eq!(settings.subtitles.max_words, 5);
        assert_eq!(settings.subtitles.font, "Arial");
        assert!(settings.logging.compact);
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let settings: Settings = toml::from_str(
            r#"
            [subtitles]
            font = "Impact"
            "#,
        )
        .unwrap();

        assert_eq!(settings.subtitles.font, "Impact");
        assert_eq!(settings.subtitles.max_words, 5);
        assert_eq!(settings.paths.workspace_root, "workspace");
        assert_eq!(settings.render.background_volume, 0.2);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string(&settings).unwrap();
        let reparsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(
            reparsed.render.render_timeout_secs,
            settings.render.render_timeout_secs
        );
    }
}
