//! Styled-events subtitle writer.
//!
//! Emits a script-info header, a single style definition, and one dialogue
//! line per cue with `H:MM:SS.cc` timestamps. An optional per-line
//! animation wrapper (fade or scale pulse) is selected by configuration.

use std::fs;
use std::io;
use std::path::Path;

use crate::models::{SubtitleAnimation, SubtitleCue};
use crate::subtitles::time::format_ass_time;

/// Style applied to every dialogue line.
///
/// Colors use the `&HAABBGGRR` grammar. Alignment is fixed to bottom
/// center; the remaining style fields are constants sized for the
/// 384x288 play resolution of the header.
#[derive(Debug, Clone)]
pub struct EventStyle {
    /// Font family name.
    pub font: String,
    /// Font size in script units.
    pub font_size: u32,
    /// Primary (fill) color.
    pub primary_colour: String,
    /// Outline color.
    pub outline_colour: String,
}

impl Default for EventStyle {
    fn default() -> Self {
        Self {
            font: "Arial".to_string(),
            font_size: 16,
            primary_colour: "&H00FFFFFF".to_string(),
            outline_colour: "&H00000000".to_string(),
        }
    }
}

impl EventStyle {
    /// Create a style with the given font family, keeping the defaults
    /// for everything else.
    pub fn with_font(font: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            ..Default::default()
        }
    }

    fn style_line(&self) -> String {
        // Alignment 2 is bottom center.
        format!(
            "Style: Default,{},{},{},&H000000FF,{},&H00000000,0,0,0,0,100,100,0,0,1,1,0,2,10,10,10,1",
            self.font, self.font_size, self.primary_colour, self.outline_colour
        )
    }
}

/// The animation override tag prepended to each dialogue line.
fn animation_tag(animation: SubtitleAnimation) -> &'static str {
    match animation {
        SubtitleAnimation::None => "",
        SubtitleAnimation::Fade => "{\\fad(200,200)}",
        SubtitleAnimation::Pop => "{\\t(0,100,\\fscx110\\fscy110)\\t(100,200,\\fscx100\\fscy100)}",
    }
}

/// Render compiled cues to styled-events subtitle content.
pub fn write_ass(cues: &[SubtitleCue], style: &EventStyle, animation: SubtitleAnimation) -> String {
    let mut content = String::from(
        "[Script Info]\n\
         ScriptType: v4.00+\n\
         PlayResX: 384\n\
         PlayResY: 288\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n",
    );
    content.push_str(&style.style_line());
    content.push_str("\n\n[Events]\n");
    content.push_str(
        "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n",
    );

    let tag = animation_tag(animation);
    for cue in cues {
        content.push_str(&format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{}{}\n",
            format_ass_time(cue.rel_start),
            format_ass_time(cue.rel_end),
            tag,
            cue.text
        ));
    }

    content
}

/// Render cues and write the artifact to disk.
pub fn write_ass_file(
    cues: &[SubtitleCue],
    style: &EventStyle,
    animation: SubtitleAnimation,
    path: &Path,
) -> io::Result<()> {
    fs::write(path, write_ass(cues, style, animation))
}
