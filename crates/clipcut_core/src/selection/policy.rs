//! Injectable segment selection policy.

use crate::models::{ClipSegment, SourceAnalysis, TranscriptCue};

/// Pure selection seam: analysis plus transcript in, candidate clip
/// windows out.
///
/// Implementations own the "what makes a clip good" question; the engine
/// only validates and aligns the returned boundaries. Alternative scoring
/// strategies are swappable without touching synchronization logic.
pub trait SelectionPolicy: Send + Sync {
    /// Select up to `num_clips` windows of roughly `clip_duration` seconds.
    fn select(
        &self,
        analysis: &SourceAnalysis,
        transcript: &[TranscriptCue],
        clip_duration: f64,
        num_clips: usize,
    ) -> Vec<ClipSegment>;
}

/// Deterministic default policy: non-overlapping windows spread evenly
/// across the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSpacingPolicy;

impl SelectionPolicy for UniformSpacingPolicy {
    fn select(
        &self,
        analysis: &SourceAnalysis,
        _transcript: &[TranscriptCue],
        clip_duration: f64,
        num_clips: usize,
    ) -> Vec<ClipSegment> {
        let source = analysis.duration;
        if source <= 0.0 || clip_duration <= 0.0 {
            return Vec::new();
        }
        if source <= clip_duration {
            return vec![ClipSegment::new(0.0, source)];
        }

        // Cap the count at what fits without overlap.
        let max_fit = (source / clip_duration).floor() as usize;
        let count = num_clips.clamp(1, max_fit.max(1));

        // Distribute leftover time as equal gaps around the windows.
        let leftover = source - count as f64 * clip_duration;
        let gap = leftover / (count + 1) as f64;

        (0..count)
            .map(|i| {
                let start = gap + i as f64 * (clip_duration + gap);
                ClipSegment::new(start, start + clip_duration)
            })
            .collect()
    }
}

/// Clamp segments into `[0, source_duration]` and drop degenerate ones,
/// preserving order.
pub fn validate_segments(segments: &[ClipSegment], source_duration: f64) -> Vec<ClipSegment> {
    segments
        .iter()
        .filter_map(|s| s.clamped_to(source_duration))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(duration: f64) -> SourceAnalysis {
        SourceAnalysis {
            duration,
            fps: 30.0,
            width: 1920,
            height: 1080,
        }
    }

    #[test]
    fn short_source_yields_single_full_segment() {
        let segments = UniformSpacingPolicy.select(&analysis(20.0), &[], 30.0, 3);
        assert_eq!(segments, vec![ClipSegment::new(0.0, 20.0)]);
    }

    #[test]
    fn windows_are_evenly_spaced_and_non_overlapping() {
        let segments = UniformSpacingPolicy.select(&analysis(300.0), &[], 30.0, 3);
        assert_eq!(segments.len(), 3);

        for segment in &segments {
            assert!((segment.duration() - 30.0).abs() < 1e-9);
            assert!(segment.start >= 0.0);
            assert!(segment.end <= 300.0);
        }
        for pair in segments.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        // Deterministic: same inputs, same windows.
        assert_eq!(
            segments,
            UniformSpacingPolicy.select(&analysis(300.0), &[], 30.0, 3)
        );
    }

    #[test]
    fn requested_count_is_capped_by_what_fits() {
        let segments = UniformSpacingPolicy.select(&analysis(70.0), &[], 30.0, 5);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn validation_clamps_and_drops() {
        let segments = vec![
            ClipSegment::new(-5.0, 10.0),
            ClipSegment::new(20.0, 25.0),
            ClipSegment::new(28.0, 45.0),
            ClipSegment::new(40.0, 50.0),
        ];
        let valid = validate_segments(&segments, 30.0);
        assert_eq!(
            valid,
            vec![
                ClipSegment::new(0.0, 10.0),
                ClipSegment::new(20.0, 25.0),
                ClipSegment::new(28.0, 30.0),
            ]
        );
    }
}
