//! Core enums used throughout the engine.

use serde::{Deserialize, Serialize};

/// Target platform for an output clip.
///
/// Determines the aspect crop applied before subtitle burn-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// YouTube Shorts (9:16 vertical).
    #[default]
    Shorts,
    /// Instagram Reels (9:16 vertical).
    ReelsInstagram,
    /// Facebook Reels (9:16 vertical).
    ReelsFacebook,
    /// TikTok (9:16 vertical).
    Tiktok,
    /// Square 1:1 output.
    Square,
    /// Landscape output (no crop).
    Landscape,
}

impl Platform {
    /// The center-crop this platform requires, if any.
    ///
    /// Landscape sources are assumed; landscape targets pass through uncropped.
    pub fn crop(&self) -> Option<CropAspect> {
        match self {
            Self::Shorts | Self::ReelsInstagram | Self::ReelsFacebook | Self::Tiktok => {
                Some(CropAspect::Vertical)
            }
            Self::Square => Some(CropAspect::Square),
            Self::Landscape => None,
        }
    }

    /// All platforms.
    pub fn all() -> &'static [Platform] {
        &[
            Self::Shorts,
            Self::ReelsInstagram,
            Self::ReelsFacebook,
            Self::Tiktok,
            Self::Square,
            Self::Landscape,
        ]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shorts => write!(f, "shorts"),
            Self::ReelsInstagram => write!(f, "reels_instagram"),
            Self::ReelsFacebook => write!(f, "reels_facebook"),
            Self::Tiktok => write!(f, "tiktok"),
            Self::Square => write!(f, "square"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// Aspect ratio of a platform center-crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropAspect {
    /// 9:16 vertical crop.
    Vertical,
    /// 1:1 square crop.
    Square,
}

/// Per-line animation wrapper for styled-events subtitles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleAnimation {
    /// No animation.
    #[default]
    None,
    /// Fade in/out over 200ms.
    Fade,
    /// Two-stage scale pulse on entry.
    Pop,
}

/// Mutually-exclusive special video effect. Effects are alternatives,
/// never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialEffect {
    #[default]
    None,
    /// Chromatic shift plus temporal noise.
    Glitch,
    /// Downscale/upscale with nearest-neighbor sampling.
    Pixelate,
    /// Generic temporal noise.
    Noise,
    /// Box blur.
    Blur,
    /// Color negation.
    Negate,
    /// Edge detection.
    Edge,
    /// Horizontal mirror.
    Mirror,
}

/// Transition applied at clip edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionType {
    #[default]
    None,
    /// Paired video and audio fade in/out.
    Fade,
}

/// Requested gender for synthesized dub voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VoiceGender {
    #[default]
    Male,
    Female,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_platforms_get_vertical_crop() {
        assert_eq!(Platform::Shorts.crop(), Some(CropAspect::Vertical));
        assert_eq!(Platform::Tiktok.crop(), Some(CropAspect::Vertical));
        assert_eq!(Platform::Square.crop(), Some(CropAspect::Square));
        assert_eq!(Platform::Landscape.crop(), None);
    }

    #[test]
    fn platform_serializes_snake_case() {
        let json = serde_json::to_string(&Platform::ReelsInstagram).unwrap();
        assert_eq!(json, "\"reels_instagram\"");
    }
}
