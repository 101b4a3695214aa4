//! Numbered-block subtitle writer.
//!
//! Emits UTF-8 text as blocks of `{index}\n{start} --> {end}\n{text}\n`
//! separated by a blank line, with `HH:MM:SS,mmm` timestamps.

use std::fs;
use std::io;
use std::path::Path;

use crate::models::SubtitleCue;
use crate::subtitles::time::format_srt_time;

/// Render compiled cues to numbered-block subtitle content.
pub fn write_srt(cues: &[SubtitleCue]) -> String {
    let mut output = String::new();

    for (i, cue) in cues.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_time(cue.rel_start),
            format_srt_time(cue.rel_end)
        ));
        output.push_str(&cue.text);
        output.push('\n');
    }

    output
}

/// Render cues and write the artifact to disk.
pub fn write_srt_file(cues: &[SubtitleCue], path: &Path) -> io::Result<()> {
    fs::write(path, write_srt(cues))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_numbered_blocks() {
        let cues = vec![
            SubtitleCue::new(1.0, 4.0, "Hello, world!"),
            SubtitleCue::new(5.0, 8.0, "Second cue."),
        ];

        let expected = "1\n00:00:01,000 --> 00:00:04,000\nHello, world!\n\n2\n00:00:05,000 --> 00:00:08,000\nSecond cue.\n";
        assert_eq!(write_srt(&cues), expected);
    }

    #[test]
    fn empty_cue_list_yields_empty_artifact() {
        assert_eq!(write_srt(&[]), "");
    }

    #[test]
    fn writes_file_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip_1.srt");
        let cues = vec![SubtitleCue::new(0.5, 2.0, "on disk")];

        write_srt_file(&cues, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("1\n00:00:00,500 --> 00:00:02,000\n"));
    }
}
