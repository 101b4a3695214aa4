//! The closed set of visual transform operations.
//!
//! Each variant is one engine operation with strongly-typed parameters;
//! an ordered sequence of stages forms the filter graph for a clip. The
//! stage renders itself to the exact argument text the external render
//! engine consumes, so the graph is byte-deterministic.

use std::path::PathBuf;

use crate::models::CropAspect;

/// Direction of an edge fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// One visual transform stage.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterStage {
    /// Brightness/contrast/saturation adjustment. Neutral components are
    /// omitted from the rendered text.
    Eq {
        brightness: f64,
        contrast: f64,
        saturation: f64,
    },
    /// Shadow/highlight color balance shift. Zero components are omitted.
    ColorBalance {
        rs: f64,
        gs: f64,
        bs: f64,
        rh: f64,
        gh: f64,
        bh: f64,
    },
    /// Full channel remix matrix (e.g. sepia).
    ColorChannelMixer { coefficients: Vec<f64> },
    /// Saturation via the hue operation (used for pure desaturation).
    HueSaturation { saturation: f64 },
    /// Radial darkening at the given angle parameter.
    Vignette { angle: f64 },
    /// Unsharp-mask sharpening at the given luma amount.
    Unsharp { amount: f64 },
    /// Master tone curve through fixed anchor points.
    Curves { points: Vec<(f64, f64)> },
    /// Chromatic plane shift (glitch looks).
    ChromaShift { cbh: i32, cbv: i32, crh: i32, crv: i32 },
    /// Temporal noise of the given strength.
    Noise { strength: u32 },
    /// Downscale/upscale round trip with nearest-neighbor sampling.
    Pixelate { factor: u32 },
    /// Box blur.
    BoxBlur { radius: u32, power: u32 },
    /// Color negation.
    Negate,
    /// Edge detection with hysteresis thresholds.
    EdgeDetect { low: f64, high: f64 },
    /// Horizontal mirror.
    HorizontalFlip,
    /// Platform center-crop. Must precede subtitle burn-in so subtitle
    /// coordinates are relative to the final frame.
    AspectCrop { aspect: CropAspect },
    /// Burn the styled-events artifact into the frame.
    SubtitleBurn { path: PathBuf },
    /// Edge fade over the composed frame.
    Fade {
        direction: FadeDirection,
        start: f64,
        duration: f64,
    },
}

impl FilterStage {
    /// Render this stage to engine argument text.
    pub fn render(&self) -> String {
        match self {
            Self::Eq {
                brightness,
                contrast,
                saturation,
            } => {
                let mut parts = Vec::new();
                if *brightness != 0.0 {
                    parts.push(format!("brightness={}", fmt(*brightness)));
                }
                if *contrast != 1.0 {
                    parts.push(format!("contrast={}", fmt(*contrast)));
                }
                if *saturation != 1.0 {
                    parts.push(format!("saturation={}", fmt(*saturation)));
                }
                format!("eq={}", parts.join(":"))
            }
            Self::ColorBalance {
                rs,
                gs,
                bs,
                rh,
                gh,
                bh,
            } => {
                let mut parts = Vec::new();
                for (name, value) in [
                    ("rs", rs),
                    ("gs", gs),
                    ("bs", bs),
                    ("rh", rh),
                    ("gh", gh),
                    ("bh", bh),
                ] {
                    if *value != 0.0 {
                        parts.push(format!("{}={}", name, fmt(*value)));
                    }
                }
                format!("colorbalance={}", parts.join(":"))
            }
            Self::ColorChannelMixer { coefficients } => format!(
                "colorchannelmixer={}",
                coefficients
                    .iter()
                    .map(|c| fmt(*c))
                    .collect::<Vec<_>>()
                    .join(":")
            ),
            Self::HueSaturation { saturation } => format!("hue=s={}", fmt(*saturation)),
            Self::Vignette { angle } => format!("vignette={}", fmt(*angle)),
            Self::Unsharp { amount } => format!("unsharp=5:5:{}:5:5:0.0", fmt(*amount)),
            Self::Curves { points } => {
                let curve = points
                    .iter()
                    .map(|(x, y)| format!("{}/{}", fmt(*x), fmt(*y)))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("curves=master='{}'", curve)
            }
            Self::ChromaShift { cbh, cbv, crh, crv } => format!(
                "chromashift=cbh={}:cbv={}:crh={}:crv={}",
                cbh, cbv, crh, crv
            ),
            Self::Noise { strength } => format!("noise=alls={}:allf=t+u", strength),
            Self::Pixelate { factor } => format!(
                "scale=iw/{f}:ih/{f}:flags=nearest,scale=iw*{f}:ih*{f}:flags=nearest",
                f = factor
            ),
            Self::BoxBlur { radius, power } => format!("boxblur={}:{}", radius, power),
            Self::Negate => "negate".to_string(),
            Self::EdgeDetect { low, high } => {
                format!("edgedetect=low={}:high={}", fmt(*low), fmt(*high))
            }
            Self::HorizontalFlip => "hflip".to_string(),
            Self::AspectCrop { aspect } => match aspect {
                CropAspect::Vertical => "crop=ih*(9/16):ih:(iw-ow)/2:0".to_string(),
                CropAspect::Square => "crop=ih:ih:(iw-ow)/2:0".to_string(),
            },
            Self::SubtitleBurn { path } => {
                let escaped = path
                    .to_string_lossy()
                    .replace('\\', "/")
                    .replace(':', "\\:");
                format!("subtitles='{}'", escaped)
            }
            Self::Fade {
                direction,
                start,
                duration,
            } => {
                let t = match direction {
                    FadeDirection::In => "in",
                    FadeDirection::Out => "out",
                };
                format!("fade=t={}:st={}:d={}", t, fmt(*start), fmt(*duration))
            }
        }
    }
}

/// Render a parameter value without accumulated float noise.
pub(crate) fn fmt(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    format!("{}", rounded)
}
