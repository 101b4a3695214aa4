//! Derives clipped, word-chunked subtitle cues from transcript cues.

use crate::models::{SubtitleCue, TranscriptCue};

/// Compile transcript cues overlapping `[clip_start, clip_end)` into
/// clip-relative subtitle cues.
///
/// Cues outside the window are discarded; overlapping cues are clipped to
/// the window and shifted to clip-relative time. A cue whose word count
/// exceeds `max_words` is split into chunks of `max_words` words (the last
/// chunk may be shorter), and the clipped duration is distributed across
/// chunks proportionally to each chunk's character length. Character count
/// approximates on-screen reading time better than word count, and the
/// chunk durations sum exactly to the cue's clipped duration: chunks are
/// monotonic with no gaps or overlaps within a cue.
///
/// This function never fails; malformed input yields fewer cues.
pub fn compile(
    cues: &[TranscriptCue],
    clip_start: f64,
    clip_end: f64,
    max_words: usize,
) -> Vec<SubtitleCue> {
    let max_words = max_words.max(1);
    let mut out = Vec::new();

    for cue in cues {
        if !cue.overlaps(clip_start, clip_end) {
            continue;
        }
        let Some((s, e)) = cue.clipped_to(clip_start, clip_end) else {
            continue;
        };

        let text = cue.text.trim();
        if text.is_empty() {
            continue;
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= max_words {
            out.push(SubtitleCue::new(s, e, text));
            continue;
        }

        let chunks: Vec<String> = words.chunks(max_words).map(|c| c.join(" ")).collect();
        let total_duration = e - s;
        let total_chars: usize = chunks.iter().map(|c| c.chars().count()).sum();

        let mut current_start = s;
        let last = chunks.len() - 1;
        for (i, chunk) in chunks.into_iter().enumerate() {
            // Pin the final chunk to the cue end so float drift cannot
            // leave a gap at the boundary.
            let current_end = if i == last {
                e
            } else {
                let share = chunk.chars().count() as f64 / total_chars as f64;
                current_start + total_duration * share
            };
            out.push(SubtitleCue::new(current_start, current_end, chunk));
            current_start = current_end;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start: f64, end: f64, text: &str) -> TranscriptCue {
        TranscriptCue::new(start, end, text)
    }

    #[test]
    fn discards_non_overlapping_and_empty_cues() {
        let cues = vec![
            cue(0.0, 2.0, "before"),
            cue(10.0, 12.0, "   "),
            cue(11.0, 13.0, "inside"),
            cue(20.0, 22.0, "after"),
        ];
        let compiled = compile(&cues, 10.0, 18.0, 5);
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].text, "inside");
        assert_eq!(compiled[0].rel_start, 1.0);
        assert_eq!(compiled[0].rel_end, 3.0);
    }

    #[test]
    fn all_cues_satisfy_interval_invariants() {
        let cues = vec![
            cue(7.9, 10.1, "straddles the start of the window here"),
            cue(10.0, 14.0, "one two three four five six seven"),
            cue(15.9, 16.5, "straddles the end"),
        ];
        let compiled = compile(&cues, 8.0, 16.0, 3);
        assert!(!compiled.is_empty());
        for c in &compiled {
            assert!(c.rel_start >= 0.0, "rel_start {} < 0", c.rel_start);
            assert!(c.rel_end > c.rel_start, "empty interval {:?}", c);
        }
    }

    #[test]
    fn chunk_count_is_ceil_of_words_over_max() {
        let cues = vec![cue(0.0, 10.0, "a b c d e f g h i j k")]; // 11 words
        let compiled = compile(&cues, 0.0, 10.0, 4);
        assert_eq!(compiled.len(), 3); // ceil(11/4)
        assert_eq!(compiled[0].text, "a b c d");
        assert_eq!(compiled[2].text, "i j k");
    }

    #[test]
    fn chunk_durations_sum_to_clipped_duration() {
        // 12 words, window [8,16) -> clipped to [2,6), 3 chunks of 5/5/2 words.
        let cues = vec![cue(10.0, 14.0, "a b c d e f g h i j k l")];
        let compiled = compile(&cues, 8.0, 16.0, 5);

        assert_eq!(compiled.len(), 3);
        assert_eq!(compiled[0].rel_start, 2.0);
        assert_eq!(compiled[2].rel_end, 6.0);
        assert_eq!(compiled[0].text, "a b c d e");
        assert_eq!(compiled[1].text, "f g h i j");
        assert_eq!(compiled[2].text, "k l");

        let total: f64 = compiled.iter().map(|c| c.duration()).sum();
        assert!((total - 4.0).abs() < 1e-9);

        // Durations are proportional to chunk character length (9/9/3).
        let d0 = compiled[0].duration();
        let d1 = compiled[1].duration();
        let d2 = compiled[2].duration();
        assert!((d0 - d1).abs() < 1e-9);
        assert!((d0 / d2 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn chunks_are_contiguous() {
        let cues = vec![cue(0.0, 6.0, "one two three four five six seven eight")];
        let compiled = compile(&cues, 0.0, 6.0, 3);
        for pair in compiled.windows(2) {
            assert_eq!(pair[0].rel_end, pair[1].rel_start);
        }
    }

    #[test]
    fn zero_max_words_is_treated_as_one() {
        let cues = vec![cue(0.0, 2.0, "two words")];
        let compiled = compile(&cues, 0.0, 2.0, 0);
        assert_eq!(compiled.len(), 2);
    }
}
