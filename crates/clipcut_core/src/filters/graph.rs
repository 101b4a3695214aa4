//! Deterministic filter-graph assembly for one clip.
//!
//! Stage ordering is fixed: coarse preset first, tonal correction before
//! stylistic layers, the platform crop before subtitle burn-in (so
//! subtitle coordinates are relative to the final frame), and transition
//! fades last because they act on the fully composed frame.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{Platform, SpecialEffect, TransitionType};

use super::library::preset_stages;
use super::stage::{fmt, FadeDirection, FilterStage};

/// Edge fades shorter clips cannot accommodate.
const FADE_SECS: f64 = 0.5;
const MIN_FADEABLE_SECS: f64 = 1.0;

/// User-adjustable grading parameters.
///
/// Neutral values produce no stages; unknown preset names are no-ops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Named color-grade preset.
    pub preset: String,
    /// Additive brightness, `-1.0..=1.0`, neutral 0.
    pub brightness: f64,
    /// Contrast multiplier, neutral 1.
    pub contrast: f64,
    /// Saturation multiplier, neutral 1.
    pub saturation: f64,
    /// Exposure control, folded into brightness.
    pub exposure: f64,
    /// Highlight curve adjustment, `-1.0..=1.0`.
    pub highlights: f64,
    /// Shadow curve adjustment, `-1.0..=1.0`.
    pub shadows: f64,
    /// Vignette amount, `0.0..=1.0`.
    pub vignette: f64,
    /// Warmth shift (red/yellow vs blue), `-1.0..=1.0`.
    pub warmth: f64,
    /// Tint shift (green vs magenta), `-1.0..=1.0`.
    pub tint: f64,
    /// Sharpness amount, `0.0..=1.0`.
    pub sharpness: f64,
    /// Force full desaturation.
    pub grayscale: bool,
    /// Mutually-exclusive special effect.
    pub effect: SpecialEffect,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            preset: "none".to_string(),
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            exposure: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            vignette: 0.0,
            warmth: 0.0,
            tint: 0.0,
            sharpness: 0.0,
            grayscale: false,
            effect: SpecialEffect::None,
        }
    }
}

/// The ordered visual transform sequence for one clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGraph {
    stages: Vec<FilterStage>,
}

impl FilterGraph {
    /// The stages in application order.
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Whether the graph applies no transform.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Render the graph as the engine's chained video filter text.
    pub fn to_filter(&self) -> String {
        self.stages
            .iter()
            .map(FilterStage::render)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Assembles the visual stage sequence and the matching audio fade chain.
///
/// Pure and deterministic: the same inputs always produce the same graph,
/// and building never fails.
#[derive(Debug, Clone)]
pub struct FilterGraphBuilder {
    filters: FilterSettings,
    platform: Platform,
    subtitle_path: Option<PathBuf>,
    transition: TransitionType,
    clip_duration: f64,
}

impl FilterGraphBuilder {
    /// Builder for a clip of `clip_duration` seconds.
    pub fn new(filters: FilterSettings, platform: Platform, clip_duration: f64) -> Self {
        Self {
            filters,
            platform,
            subtitle_path: None,
            transition: TransitionType::None,
            clip_duration,
        }
    }

    /// Burn the styled-events artifact at `path` into the frame.
    pub fn with_subtitles(mut self, path: &Path) -> Self {
        self.subtitle_path = Some(path.to_path_buf());
        self
    }

    /// Apply the given edge transition.
    pub fn with_transition(mut self, transition: TransitionType) -> Self {
        self.transition = transition;
        self
    }

    /// Build the ordered visual graph.
    pub fn build(&self) -> FilterGraph {
        let f = &self.filters;
        let mut stages = Vec::new();

        // 1. Named preset: the coarse look.
        stages.extend(preset_stages(&f.preset));

        // 2. User tonal correction, exposure folded into brightness.
        let brightness = f.brightness + f.exposure * 0.1;
        let saturation = if f.grayscale { 0.0 } else { f.saturation };
        if brightness != 0.0 || f.contrast != 1.0 || saturation != 1.0 {
            stages.push(FilterStage::Eq {
                brightness,
                contrast: f.contrast,
                saturation,
            });
        }

        // 3. Warmth/tint color-balance shift.
        if f.warmth != 0.0 || f.tint != 0.0 {
            stages.push(FilterStage::ColorBalance {
                rs: f.warmth * 0.2,
                gs: f.tint * 0.2,
                bs: -f.warmth * 0.2,
                rh: 0.0,
                gh: 0.0,
                bh: 0.0,
            });
        }

        // 4. Vignette, normalized amount scaled into the angle parameter.
        if f.vignette > 0.0 {
            stages.push(FilterStage::Vignette {
                angle: std::f64::consts::FRAC_PI_4 * f.vignette,
            });
        }

        // 5. Sharpness.
        if f.sharpness > 0.0 {
            stages.push(FilterStage::Unsharp {
                amount: f.sharpness * 1.5,
            });
        }

        // 6. Highlights/shadows tone curve; only the midpoints move.
        if f.highlights != 0.0 || f.shadows != 0.0 {
            stages.push(FilterStage::Curves {
                points: tone_curve(f.shadows, f.highlights),
            });
        }

        // 7. One special effect.
        stages.extend(effect_stages(f.effect));

        // 8. Platform aspect crop.
        if let Some(aspect) = self.platform.crop() {
            stages.push(FilterStage::AspectCrop { aspect });
        }

        // 9. Subtitle burn-in.
        if let Some(ref path) = self.subtitle_path {
            stages.push(FilterStage::SubtitleBurn { path: path.clone() });
        }

        // 10. Transition fades.
        if self.fades_apply() {
            stages.push(FilterStage::Fade {
                direction: FadeDirection::In,
                start: 0.0,
                duration: FADE_SECS,
            });
            stages.push(FilterStage::Fade {
                direction: FadeDirection::Out,
                start: self.clip_duration - FADE_SECS,
                duration: FADE_SECS,
            });
        }

        FilterGraph { stages }
    }

    /// The audio fade chain paired with the video transition, if any.
    pub fn audio_fades(&self) -> Option<String> {
        if !self.fades_apply() {
            return None;
        }
        Some(format!(
            "afade=t=in:st=0:d={},afade=t=out:st={}:d={}",
            fmt(FADE_SECS),
            fmt(self.clip_duration - FADE_SECS),
            fmt(FADE_SECS)
        ))
    }

    fn fades_apply(&self) -> bool {
        self.transition == TransitionType::Fade && self.clip_duration > MIN_FADEABLE_SECS
    }
}

/// The 4-anchor master curve: fixed endpoints, movable midpoints.
///
/// Midpoints are clamped into the open unit interval and ordered so the
/// curve stays monotonic even for out-of-range adjustment values.
fn tone_curve(shadows: f64, highlights: f64) -> Vec<(f64, f64)> {
    let y_shadow = (0.25 + shadows * 0.1).clamp(0.01, 0.99);
    let y_highlight = (0.75 + highlights * 0.1).clamp(0.01, 0.99).max(y_shadow);
    vec![
        (0.0, 0.0),
        (0.25, y_shadow),
        (0.75, y_highlight),
        (1.0, 1.0),
    ]
}

/// Expand the mutually-exclusive special effect.
fn effect_stages(effect: SpecialEffect) -> Vec<FilterStage> {
    match effect {
        SpecialEffect::None => Vec::new(),
        SpecialEffect::Glitch => vec![
            FilterStage::ChromaShift {
                cbh: -5,
                cbv: -5,
                crh: 5,
                crv: 5,
            },
            FilterStage::Noise { strength: 20 },
        ],
        SpecialEffect::Pixelate => vec![FilterStage::Pixelate { factor: 10 }],
        SpecialEffect::Noise => vec![FilterStage::Noise { strength: 40 }],
        SpecialEffect::Blur => vec![FilterStage::BoxBlur {
            radius: 10,
            power: 1,
        }],
        SpecialEffect::Negate => vec![FilterStage::Negate],
        SpecialEffect::Edge => vec![FilterStage::EdgeDetect {
            low: 0.1,
            high: 0.4,
        }],
        SpecialEffect::Mirror => vec![FilterStage::HorizontalFlip],
    }
}
