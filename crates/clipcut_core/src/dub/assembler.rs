//! Assembles a synchronized dub track for one clip window.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::mix::MixBuilder;
use crate::audio::stretch::stretch_to_duration;
use crate::models::TranscriptCue;
use crate::render::engine::{EngineInvocation, InputSpec, RenderEngine};

use super::{SynthesisError, Synthesizer, Translator};

/// Segments shorter than this are skipped: not perceptible, and they
/// produce degenerate stretch ratios.
pub const MIN_SEGMENT_SECS: f64 = 0.1;

/// Synthesis retry policy: attempts and fixed backoff between them.
const SYNTH_ATTEMPTS: u32 = 3;
const SYNTH_BACKOFF: Duration = Duration::from_secs(1);

/// Wall-clock budget for the silent-base and mix sub-calls.
const MIX_TIMEOUT: Duration = Duration::from_secs(120);

/// One transcript cue's dubbed audio, positioned in clip-relative time.
///
/// `rel_end - rel_start` is the target duration the segment's audio must
/// occupy; `stretched_audio` is populated only when stretching succeeded.
#[derive(Debug, Clone)]
pub struct DubSegment {
    /// Index of the originating transcript cue.
    pub cue_index: usize,
    /// Clip-relative start in seconds.
    pub rel_start: f64,
    /// Clip-relative end in seconds.
    pub rel_end: f64,
    /// Raw synthesized audio.
    pub raw_audio: PathBuf,
    /// Duration-matched audio, when stretching succeeded.
    pub stretched_audio: Option<PathBuf>,
}

/// Result of dub assembly for one clip.
#[derive(Debug, Clone, Default)]
pub struct DubOutcome {
    /// The composed dub track, when any assembly path succeeded.
    pub dub_audio: Option<PathBuf>,
    /// Cues carrying translated text, usable for subtitles regardless of
    /// the audio outcome.
    pub translated_cues: Vec<TranscriptCue>,
    /// Per-segment synthesis results, for diagnostics.
    pub segments: Vec<DubSegment>,
    /// Whether the whole-clip fallback produced the track.
    pub used_fallback: bool,
}

/// Turns transcript cues overlapping a clip into a synchronized dub track.
pub struct DubAssembler<'a> {
    engine: &'a dyn RenderEngine,
    work_dir: PathBuf,
    clip_tag: String,
}

impl<'a> DubAssembler<'a> {
    /// Create an assembler writing artifacts named `{clip_tag}_*` into
    /// `work_dir`.
    pub fn new(
        engine: &'a dyn RenderEngine,
        work_dir: impl Into<PathBuf>,
        clip_tag: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            work_dir: work_dir.into(),
            clip_tag: clip_tag.into(),
        }
    }

    /// Assemble the dub track for `[clip_start, clip_end)`.
    ///
    /// Per overlapping cue: translate (degrading to the original text),
    /// synthesize with retries, stretch to the segment's target duration,
    /// and keep the segment only when a duration-matched artifact exists.
    /// Usable segments are composed onto a silent base via delayed
    /// averaging mix with gain compensation. When no segment survives but
    /// the clip contains text, the whole clip's text is synthesized once
    /// and stretched to exactly the clip duration. When that also fails
    /// the clip proceeds without dubbed audio.
    pub fn assemble(
        &self,
        cues: &[TranscriptCue],
        clip_start: f64,
        clip_end: f64,
        translator: &dyn Translator,
        synthesizer: &dyn Synthesizer,
        target_lang: &str,
        voice: &str,
    ) -> DubOutcome {
        let duration = clip_end - clip_start;
        let mut outcome = DubOutcome::default();
        let mut full_text_parts = Vec::new();

        for (idx, cue) in cues.iter().enumerate() {
            if !cue.overlaps(clip_start, clip_end) {
                continue;
            }
            full_text_parts.push(cue.text.clone());

            let rel_start = (cue.start - clip_start).max(0.0);
            let rel_end = (cue.end - clip_start).min(duration);
            let seg_duration = rel_end - rel_start;
            if seg_duration <= MIN_SEGMENT_SECS {
                continue;
            }

            let text = self.translate_or_original(translator, &cue.text, target_lang);
            outcome
                .translated_cues
                .push(TranscriptCue::new(cue.start, cue.end, text.clone()));

            let raw = self
                .work_dir
                .join(format!("{}_seg_{}.mp3", self.clip_tag, idx));
            if let Err(e) = synthesize_with_retry(synthesizer, &text, voice, &raw) {
                tracing::warn!("Synthesis exhausted for segment {}: {}", idx, e);
                continue;
            }
            if !raw.exists() {
                continue;
            }

            let stretched = self
                .work_dir
                .join(format!("{}_seg_{}_stretched.mp3", self.clip_tag, idx));
            let stretched_audio = match stretch_to_duration(self.engine, &raw, seg_duration, &stretched)
            {
                Ok(()) => Some(stretched),
                Err(e) => {
                    tracing::warn!("Stretch failed for segment {}: {}", idx, e);
                    None
                }
            };

            outcome.segments.push(DubSegment {
                cue_index: idx,
                rel_start,
                rel_end,
                raw_audio: raw,
                stretched_audio,
            });
        }

        let usable: Vec<&DubSegment> = outcome
            .segments
            .iter()
            .filter(|s| s.stretched_audio.is_some())
            .collect();
        if !usable.is_empty() {
            outcome.dub_audio = self.compose(&usable, duration);
        }

        if outcome.dub_audio.is_none() {
            let full_text = full_text_parts.join(" ");
            if !full_text.trim().is_empty() {
                outcome.dub_audio = self.fallback_whole_clip(
                    &full_text,
                    duration,
                    translator,
                    synthesizer,
                    target_lang,
                    voice,
                );
                outcome.used_fallback = outcome.dub_audio.is_some();
            }
        }

        outcome
    }

    fn translate_or_original(
        &self,
        translator: &dyn Translator,
        text: &str,
        target_lang: &str,
    ) -> String {
        match translator.translate(text, target_lang) {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("Translation failed, keeping original text: {}", e);
                text.to_string()
            }
        }
    }

    /// Mix duration-matched segments onto a silent base spanning the clip.
    fn compose(&self, segments: &[&DubSegment], duration: f64) -> Option<PathBuf> {
        let silent = self
            .work_dir
            .join(format!("{}_silence.mp3", self.clip_tag));
        let base = EngineInvocation {
            inputs: vec![InputSpec::lavfi(format!(
                "anullsrc=r=24000:cl=mono:d={}",
                duration
            ))],
            extra_args: vec!["-q:a".to_string(), "9".to_string()],
            output: silent.clone(),
            ..Default::default()
        };
        if let Err(e) = self.engine.run(&base, MIX_TIMEOUT) {
            tracing::warn!("Silent base generation failed: {}", e);
            return None;
        }

        let mut inputs = vec![InputSpec::file(&silent)];
        let mut mix = MixBuilder::new("[0:a]");
        for (k, segment) in segments.iter().enumerate() {
            let input_index = k + 1;
            inputs.push(InputSpec::file(segment.stretched_audio.as_deref()?));
            let delay_ms = (segment.rel_start * 1000.0).round() as u64;
            mix.add_delayed(input_index, delay_ms);
        }

        let output = self.work_dir.join(format!("{}_dub.mp3", self.clip_tag));
        let invocation = EngineInvocation {
            inputs,
            filter_complex: Some(mix.build("[outa]")),
            maps: vec!["[outa]".to_string()],
            output: output.clone(),
            ..Default::default()
        };
        if let Err(e) = self.engine.run(&invocation, MIX_TIMEOUT) {
            tracing::warn!("Dub mix failed: {}", e);
            return None;
        }

        output.exists().then_some(output)
    }

    /// Synthesize the whole clip's text in one pass, stretched to exactly
    /// the clip duration. An unstretchable artifact is still used as-is.
    fn fallback_whole_clip(
        &self,
        full_text: &str,
        duration: f64,
        translator: &dyn Translator,
        synthesizer: &dyn Synthesizer,
        target_lang: &str,
        voice: &str,
    ) -> Option<PathBuf> {
        tracing::debug!("Falling back to whole-clip dub synthesis");

        let text = self.translate_or_original(translator, full_text, target_lang);
        let raw = self
            .work_dir
            .join(format!("{}_dub_fallback.mp3", self.clip_tag));
        if let Err(e) = synthesize_with_retry(synthesizer, &text, voice, &raw) {
            tracing::warn!("Fallback synthesis failed: {}", e);
            return None;
        }
        if !raw.exists() {
            return None;
        }

        let stretched = self
            .work_dir
            .join(format!("{}_dub_fallback_stretched.mp3", self.clip_tag));
        match stretch_to_duration(self.engine, &raw, duration, &stretched) {
            Ok(()) => Some(stretched),
            Err(e) => {
                tracing::warn!("Fallback stretch failed, using unstretched audio: {}", e);
                Some(raw)
            }
        }
    }
}

/// Retry synthesis with fixed backoff; exhausting retries fails only this
/// call.
fn synthesize_with_retry(
    synthesizer: &dyn Synthesizer,
    text: &str,
    voice: &str,
    output: &Path,
) -> Result<(), SynthesisError> {
    let mut last_error = None;
    for attempt in 1..=SYNTH_ATTEMPTS {
        match synthesizer.synthesize(text, voice, output) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::warn!("Synthesis attempt {}/{} failed: {}", attempt, SYNTH_ATTEMPTS, e);
                last_error = Some(e);
                if attempt < SYNTH_ATTEMPTS {
                    std::thread::sleep(SYNTH_BACKOFF);
                }
            }
        }
    }
    Err(last_error.expect("at least one attempt ran"))
}
