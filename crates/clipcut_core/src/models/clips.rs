//! Clip segments, dubbing options, and per-clip outcomes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::enums::VoiceGender;

/// A `[start, end)` window of the source selected for one output clip.
///
/// Produced by a selection policy or by a manual trim request and
/// consumed read-only by the engine. `end > start` and both bounds lie
/// within `[0, source_duration]` once validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipSegment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl ClipSegment {
    /// Create a new segment.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Clamp the segment into `[0, source_duration]`, rejecting it if the
    /// clamped interval is degenerate.
    pub fn clamped_to(&self, source_duration: f64) -> Option<ClipSegment> {
        let start = self.start.max(0.0);
        let end = self.end.min(source_duration);
        if end > start {
            Some(ClipSegment::new(start, end))
        } else {
            None
        }
    }
}

/// Dubbing parameters for a render request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DubbingOptions {
    /// Target language code for translation and voice selection (e.g. "es").
    pub target_language: String,
    /// Requested voice gender.
    #[serde(default)]
    pub voice_gender: VoiceGender,
}

/// Basic source metadata provided by the analysis collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceAnalysis {
    /// Source duration in seconds.
    pub duration: f64,
    /// Frames per second.
    pub fps: f64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Result of one clip's render attempt.
///
/// The clip succeeded iff a video artifact exists; subtitle artifacts can
/// be present even when the video render failed, and diagnostics record
/// every absorbed sub-step failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipOutcome {
    /// Zero-based clip index within the job.
    pub index: usize,
    /// Rendered video file, when the render produced one.
    pub video_path: Option<PathBuf>,
    /// Numbered-block subtitle artifact.
    pub srt_path: Option<PathBuf>,
    /// Styled-events subtitle artifact.
    pub ass_path: Option<PathBuf>,
    /// Clip window start in source seconds.
    pub start: f64,
    /// Clip window end in source seconds.
    pub end: f64,
    /// Absorbed sub-step failures, in occurrence order.
    pub diagnostics: Vec<String>,
}

impl ClipOutcome {
    /// Whether a video artifact was produced.
    pub fn succeeded(&self) -> bool {
        self.video_path.is_some()
    }
}
