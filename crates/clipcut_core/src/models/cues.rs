//! Transcript and subtitle cue types.
//!
//! All timing values are stored as `f64` seconds. Rounding to milliseconds
//! (numbered-block subtitles) or centiseconds (styled events) happens only
//! at write time.

use serde::{Deserialize, Serialize};

/// A timestamped span of spoken text, as delivered by the transcription
/// collaborator. Immutable once received; cues are ordered by start time
/// but may overlap each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptCue {
    /// Start time in seconds from the beginning of the source.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Spoken text (original or translated language).
    pub text: String,
}

impl TranscriptCue {
    /// Create a new cue.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this cue overlaps the half-open window `[window_start, window_end)`.
    pub fn overlaps(&self, window_start: f64, window_end: f64) -> bool {
        self.end > window_start && self.start < window_end
    }

    /// Clip this cue's interval to a window and shift it to window-relative
    /// seconds. Returns `None` when the clipped interval is degenerate.
    pub fn clipped_to(&self, window_start: f64, window_end: f64) -> Option<(f64, f64)> {
        let s = self.start.max(window_start) - window_start;
        let e = self.end.min(window_end) - window_start;
        if e <= s {
            None
        } else {
            Some((s, e))
        }
    }
}

/// A clip-relative subtitle cue derived from transcript cues.
///
/// Invariant: `rel_end > rel_start` and `rel_start >= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    /// Start time in seconds, relative to the clip start.
    pub rel_start: f64,
    /// End time in seconds, relative to the clip start.
    pub rel_end: f64,
    /// Display text.
    pub text: String,
}

impl SubtitleCue {
    /// Create a new subtitle cue.
    pub fn new(rel_start: f64, rel_end: f64, text: impl Into<String>) -> Self {
        Self {
            rel_start,
            rel_end,
            text: text.into(),
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.rel_end - self.rel_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_half_open() {
        let cue = TranscriptCue::new(10.0, 14.0, "hello");
        assert!(cue.overlaps(8.0, 16.0));
        assert!(cue.overlaps(13.0, 20.0));
        // Touching at the boundary is not overlap.
        assert!(!cue.overlaps(14.0, 20.0));
        assert!(!cue.overlaps(0.0, 10.0));
    }

    #[test]
    fn clipping_shifts_to_window_relative() {
        let cue = TranscriptCue::new(10.0, 14.0, "hello");
        assert_eq!(cue.clipped_to(8.0, 16.0), Some((2.0, 6.0)));
        assert_eq!(cue.clipped_to(12.0, 13.0), Some((0.0, 1.0)));
        assert_eq!(cue.clipped_to(14.0, 20.0), None);
    }
}
