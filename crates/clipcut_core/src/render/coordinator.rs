//! Per-clip render sequencing and fallback policy.
//!
//! Each clip moves through dubbing (optional, degrades), subtitle
//! generation (infallible), graph building (infallible), and the final
//! engine invocation (the only step that can fail the clip). A failed
//! clip produces no video artifact but never aborts sibling clips; the
//! job as a whole errors only when zero clips rendered.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::dub::{voice_for_language, DubAssembler, Synthesizer, Translator};
use crate::filters::{FilterGraphBuilder, FilterSettings};
use crate::jobs::{JobPhase, JobStatusTable};
use crate::logging::JobLogger;
use crate::models::{
    ClipOutcome, ClipSegment, DubbingOptions, Platform, SubtitleAnimation, TranscriptCue,
    TransitionType,
};
use crate::subtitles::writers::{write_ass_file, write_srt_file, EventStyle};
use crate::subtitles::compile;

use super::engine::RenderEngine;
use super::spec::{BackgroundMusic, RenderSpec};

/// Default wall-clock budget for one clip render.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(600);

/// Everything one job's render pass needs.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Source video path.
    pub source: PathBuf,
    /// Candidate clip windows from the selection policy.
    pub segments: Vec<ClipSegment>,
    /// Word-level transcript of the source.
    pub transcript: Vec<TranscriptCue>,
    /// Target platform (drives the aspect crop).
    pub platform: Platform,
    /// Burn the styled-events artifact into the frame.
    pub burn_subtitles: bool,
    /// Font family for burned subtitles.
    pub subtitle_font: String,
    /// Maximum words per subtitle cue before chunking.
    pub subtitle_max_words: usize,
    /// Per-line subtitle animation.
    pub subtitle_animation: SubtitleAnimation,
    /// Grading and effect parameters.
    pub filters: FilterSettings,
    /// Manual trim start; with `trim_end > trim_start` the pair overrides
    /// the segment list.
    pub trim_start: f64,
    /// Manual trim end.
    pub trim_end: f64,
    /// Edge transition.
    pub transition: TransitionType,
    /// Background music mixed under the active audio track.
    pub background_music: Option<BackgroundMusic>,
    /// Dubbing parameters; requires providers on the coordinator.
    pub dubbing: Option<DubbingOptions>,
    /// Job identifier for status reporting.
    pub job_id: Option<String>,
    /// Directory for output artifacts; defaults to the source's directory.
    pub work_dir: Option<PathBuf>,
    /// Wall-clock budget per clip render.
    pub render_timeout: Duration,
}

impl RenderRequest {
    /// A request with neutral options.
    pub fn new(source: impl Into<PathBuf>, segments: Vec<ClipSegment>) -> Self {
        Self {
            source: source.into(),
            segments,
            transcript: Vec::new(),
            platform: Platform::default(),
            burn_subtitles: false,
            subtitle_font: "Arial".to_string(),
            subtitle_max_words: 5,
            subtitle_animation: SubtitleAnimation::None,
            filters: FilterSettings::default(),
            trim_start: 0.0,
            trim_end: 0.0,
            transition: TransitionType::None,
            background_music: None,
            dubbing: None,
            job_id: None,
            work_dir: None,
            render_timeout: RENDER_TIMEOUT,
        }
    }

    /// A request prefilled from configured defaults.
    pub fn from_settings(
        settings: &Settings,
        source: impl Into<PathBuf>,
        segments: Vec<ClipSegment>,
    ) -> Self {
        let mut request = Self::new(source, segments);
        request.subtitle_font = settings.subtitles.font.clone();
        request.subtitle_max_words = settings.subtitles.max_words;
        request.subtitle_animation = settings.subtitles.animation;
        request.render_timeout = settings.render.render_timeout();
        request
    }
}

/// Sequences dubbing, subtitles, graph building, and rendering per clip.
pub struct RenderCoordinator<'a> {
    engine: &'a dyn RenderEngine,
    translator: Option<&'a dyn Translator>,
    synthesizer: Option<&'a dyn Synthesizer>,
    status: Option<&'a JobStatusTable>,
    logger: Option<Arc<JobLogger>>,
}

impl<'a> RenderCoordinator<'a> {
    /// Coordinator over the given engine, without dubbing providers.
    pub fn new(engine: &'a dyn RenderEngine) -> Self {
        Self {
            engine,
            translator: None,
            synthesizer: None,
            status: None,
            logger: None,
        }
    }

    /// Attach the translate/synthesize collaborators; dubbing requests
    /// without them proceed undubbed.
    pub fn with_dubbing_providers(
        mut self,
        translator: &'a dyn Translator,
        synthesizer: &'a dyn Synthesizer,
    ) -> Self {
        self.translator = Some(translator);
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Report phase transitions and the final job state to `table`.
    pub fn with_status_table(mut self, table: &'a JobStatusTable) -> Self {
        self.status = Some(table);
        self
    }

    /// Write job progress to a per-job logger.
    pub fn with_logger(mut self, logger: Arc<JobLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Render every clip of the request and record the job outcome.
    ///
    /// Partial success is normal and user-visible; the job transitions to
    /// an error state only when zero clips produced a video artifact.
    pub fn run_job(&self, request: &RenderRequest) -> Vec<ClipOutcome> {
        self.set_phase(request, JobPhase::Editing);

        let outcomes = self.render_clips(request);

        if let (Some(table), Some(job_id)) = (self.status, request.job_id.as_deref()) {
            if outcomes.iter().any(ClipOutcome::succeeded) {
                table.complete(job_id, outcomes.clone());
            } else {
                table.fail(job_id, "No clips generated; every render failed");
            }
        }
        outcomes
    }

    /// Render every clip, one at a time. Clips are independent; a failed
    /// clip never aborts its siblings.
    pub fn render_clips(&self, request: &RenderRequest) -> Vec<ClipOutcome> {
        // A manual trim overrides any computed segment list.
        let segments: Vec<ClipSegment> = if request.trim_end > request.trim_start {
            vec![ClipSegment::new(request.trim_start, request.trim_end)]
        } else {
            request.segments.clone()
        };

        segments
            .iter()
            .enumerate()
            .map(|(index, segment)| self.render_clip(request, index, segment))
            .collect()
    }

    fn render_clip(&self, request: &RenderRequest, index: usize, segment: &ClipSegment) -> ClipOutcome {
        let clip_number = index + 1;
        let duration = segment.duration();

        let stem = request
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "clip".to_string());
        let extension = request
            .source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let base_dir = request.work_dir.clone().unwrap_or_else(|| {
            request
                .source
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf()
        });

        let tag = format!("{}_clip_{}", stem, clip_number);
        let output_path = base_dir.join(format!("{}{}", tag, extension));
        let srt_path = base_dir.join(format!("{}.srt", tag));
        let ass_path = base_dir.join(format!("{}.ass", tag));

        let mut outcome = ClipOutcome {
            index,
            start: segment.start,
            end: segment.end,
            ..Default::default()
        };

        if let Some(ref logger) = self.logger {
            logger.phase(&format!("Clip {} [{:.2}s - {:.2}s]", clip_number, segment.start, segment.end));
        }

        // Dubbing: degrades per segment and per clip, never fails the clip.
        let mut dub_audio = None;
        let mut translated_cues: Vec<TranscriptCue> = Vec::new();
        if let (Some(options), Some(translator), Some(synthesizer)) =
            (&request.dubbing, self.translator, self.synthesizer)
        {
            self.set_phase(request, JobPhase::DubbingClip(clip_number));

            let voice = voice_for_language(&options.target_language, options.voice_gender);
            let assembler = DubAssembler::new(self.engine, &base_dir, tag.clone());
            let dub = assembler.assemble(
                &request.transcript,
                segment.start,
                segment.end,
                translator,
                synthesizer,
                &options.target_language,
                voice,
            );
            if dub.used_fallback {
                self.set_phase(request, JobPhase::DubbingFallback(clip_number));
            }
            if dub.dub_audio.is_none() {
                outcome
                    .diagnostics
                    .push("dubbing produced no audio track".to_string());
                if let Some(ref logger) = self.logger {
                    logger.warn("Dubbing produced no audio track; rendering with source audio");
                }
            }
            dub_audio = dub.dub_audio;
            translated_cues = dub.translated_cues;
        }

        // Subtitles: translated text when any was recovered, original
        // cues otherwise. Artifact I/O failures degrade to diagnostics.
        let cue_source: &[TranscriptCue] = if translated_cues.is_empty() {
            &request.transcript
        } else {
            &translated_cues
        };
        let cues = compile(cue_source, segment.start, segment.end, request.subtitle_max_words);

        match write_srt_file(&cues, &srt_path) {
            Ok(()) => outcome.srt_path = Some(srt_path),
            Err(e) => outcome
                .diagnostics
                .push(format!("failed to write srt artifact: {}", e)),
        }
        let style = EventStyle::with_font(request.subtitle_font.as_str());
        match write_ass_file(&cues, &style, request.subtitle_animation, &ass_path) {
            Ok(()) => outcome.ass_path = Some(ass_path),
            Err(e) => outcome
                .diagnostics
                .push(format!("failed to write ass artifact: {}", e)),
        }

        // Graph building is pure and infallible.
        let mut builder = FilterGraphBuilder::new(request.filters.clone(), request.platform, duration)
            .with_transition(request.transition);
        if request.burn_subtitles {
            if let Some(ref ass) = outcome.ass_path {
                builder = builder.with_subtitles(ass);
            }
        }

        let spec = RenderSpec {
            source: request.source.clone(),
            start: segment.start,
            duration,
            dub_audio,
            background_music: request.background_music.clone(),
            graph: builder.build(),
            audio_fades: builder.audio_fades(),
            output: output_path.clone(),
            timeout: request.render_timeout,
        };

        let invocation = spec.to_invocation();
        if let Some(ref logger) = self.logger {
            logger.command(&format!("ffmpeg {}", invocation.to_args().join(" ")));
        }
        if let Err(e) = self.engine.run(&invocation, spec.timeout) {
            outcome.diagnostics.push(format!("render failed: {}", e));
            if let Some(ref logger) = self.logger {
                logger.error(&format!("Render failed for clip {}: {}", clip_number, e));
            }
        }

        // The output is recorded only if the artifact exists.
        if output_path.exists() {
            outcome.video_path = Some(output_path);
            if let Some(ref logger) = self.logger {
                logger.success(&format!("Clip {} rendered", clip_number));
            }
        }

        outcome
    }

    fn set_phase(&self, request: &RenderRequest, phase: JobPhase) {
        if let (Some(table), Some(job_id)) = (self.status, request.job_id.as_deref()) {
            table.set_phase(job_id, phase);
        }
    }
}
