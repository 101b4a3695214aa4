//! Job-logging types and configuration.

use crate::config::LoggingSettings;

/// Callback receiving each formatted log line, for embedding applications
/// that surface job logs live.
pub type LogCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Configuration for job-logger behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Suppress external-tool output lines (they still land in the tail
    /// buffer).
    pub compact: bool,
    /// Number of buffered output lines shown after an error.
    pub error_tail: usize,
    /// Prefix lines with a wall-clock timestamp.
    pub show_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: 20,
            show_timestamps: true,
        }
    }
}

impl From<&LoggingSettings> for LogConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            compact: settings.compact,
            error_tail: settings.error_tail,
            show_timestamps: settings.show_timestamps,
        }
    }
}

/// Message prefixes for consistent line formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePrefix {
    /// Shell command: `$ command`
    Command,
    /// Phase marker: `=== Phase ===`
    Phase,
    /// Success: `[SUCCESS]`
    Success,
    /// Warning: `[WARNING]`
    Warning,
    /// Error: `[ERROR]`
    Error,
}

impl MessagePrefix {
    /// Format a message with this prefix.
    pub fn format(&self, message: &str) -> String {
        match self {
            Self::Command => format!("$ {}", message),
            Self::Phase => format!("=== {} ===", message),
            Self::Success => format!("[SUCCESS] {}", message),
            Self::Warning => format!("[WARNING] {}", message),
            Self::Error => format!("[ERROR] {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_format_consistently() {
        assert_eq!(MessagePrefix::Command.format("ffmpeg -y"), "$ ffmpeg -y");
        assert_eq!(MessagePrefix::Phase.format("Dubbing"), "=== Dubbing ===");
        assert_eq!(MessagePrefix::Error.format("boom"), "[ERROR] boom");
    }

    #[test]
    fn config_derives_from_settings_section() {
        let mut section = LoggingSettings::default();
        section.compact = false;
        section.error_tail = 7;

        let config = LogConfig::from(&section);
        assert!(!config.compact);
        assert_eq!(config.error_tail, 7);
    }
}
