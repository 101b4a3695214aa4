//! Clip title and hashtag derivation from the transcript window.

use crate::models::TranscriptCue;

const TITLE_MAX_CHARS: usize = 50;
const DEFAULT_TITLE: &str = "Viral Video Clip";
const HASHTAGS: &str = "#viral #shorts #fyp";

/// Derive a display title and hashtag line for the clip window
/// `[start, end)` from the transcript text inside it.
pub fn clip_metadata(transcript: &[TranscriptCue], start: f64, end: f64) -> (String, String) {
    let full_text = transcript
        .iter()
        .filter(|t| t.overlaps(start, end))
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let title = if full_text.is_empty() {
        DEFAULT_TITLE.to_string()
    } else if full_text.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = full_text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        full_text
    };

    (title, HASHTAGS.to_string())
}
