//! Per-clip render specification.
//!
//! Aggregates everything one engine invocation needs: the source window,
//! the ordered audio inputs with their mix relationships, the visual
//! filter graph, and the authoritative output duration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::mix::MixBuilder;
use crate::filters::FilterGraph;

use super::engine::{EngineInvocation, InputSpec};

/// Background-music track mixed under the main (or dub) audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundMusic {
    /// Music file; looped indefinitely and truncated by the mix policy.
    pub path: PathBuf,
    /// Volume scale applied before mixing, `0.0..=1.0`.
    pub volume: f64,
}

/// Aggregate description of one clip render.
#[derive(Debug, Clone)]
pub struct RenderSpec {
    /// Source video.
    pub source: PathBuf,
    /// Window start in source seconds.
    pub start: f64,
    /// Window duration in seconds; authoritative for the output length.
    pub duration: f64,
    /// Composed dub track replacing the source audio, if any.
    pub dub_audio: Option<PathBuf>,
    /// Background music mixed under the active audio track, if any.
    pub background_music: Option<BackgroundMusic>,
    /// Ordered visual transform stages.
    pub graph: FilterGraph,
    /// Audio fade chain paired with the video transition, if any.
    pub audio_fades: Option<String>,
    /// Output video path.
    pub output: PathBuf,
    /// Wall-clock budget for the render invocation.
    pub timeout: Duration,
}

impl RenderSpec {
    /// Lower the spec into the engine's declarative invocation.
    ///
    /// Input order is fixed: seeked source first, then the dub track, then
    /// the looped background music. With background music present, the
    /// active audio track and the scaled music branch go through the
    /// averaging mix with input-count gain compensation; a lone dub track
    /// maps directly; otherwise the source audio passes through.
    pub fn to_invocation(&self) -> EngineInvocation {
        let mut inputs = vec![InputSpec::file(&self.source)
            .with_seek(self.start)
            .with_duration(self.duration)];

        if let Some(ref dub) = self.dub_audio {
            inputs.push(InputSpec::file(dub));
        }
        let main_audio_index = if self.dub_audio.is_some() { 1 } else { 0 };

        let mut filter_complex = None;
        let audio_map = if let Some(ref music) = self.background_music {
            let music_index = inputs.len();
            inputs.push(InputSpec::file(&music.path).looped());

            let mut mix = MixBuilder::new(format!("[{}:a]", main_audio_index));
            mix.add_volume_scaled(music_index, music.volume);
            filter_complex = Some(mix.build("[outa]"));
            "[outa]".to_string()
        } else {
            format!("{}:a", main_audio_index)
        };

        EngineInvocation {
            inputs,
            filter_complex,
            video_codec: Some("libx264".to_string()),
            maps: vec!["0:v".to_string(), audio_map],
            audio_codec: Some("aac".to_string()),
            extra_args: vec!["-strict".to_string(), "experimental".to_string()],
            video_filter: (!self.graph.is_empty()).then(|| self.graph.to_filter()),
            audio_filter: self.audio_fades.clone(),
            duration: Some(self.duration),
            output: self.output.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::filters::{FilterGraphBuilder, FilterSettings};
    use crate::models::Platform;

    fn base_spec() -> RenderSpec {
        RenderSpec {
            source: PathBuf::from("/tmp/src.mp4"),
            start: 12.0,
            duration: 30.0,
            dub_audio: None,
            background_music: None,
            graph: FilterGraph::default(),
            audio_fades: None,
            output: PathBuf::from("/tmp/src_clip_1.mp4"),
            timeout: Duration::from_secs(600),
        }
    }

    #[test]
    fn plain_clip_maps_source_audio_directly() {
        let invocation = base_spec().to_invocation();
        assert_eq!(invocation.maps, vec!["0:v", "0:a"]);
        assert!(invocation.filter_complex.is_none());
        // Output duration override is authoritative regardless of any
        // intermediate audio artifact length.
        assert_eq!(invocation.duration, Some(30.0));
    }

    #[test]
    fn lone_dub_track_maps_directly_with_no_mix() {
        let spec = RenderSpec {
            dub_audio: Some(PathBuf::from("/tmp/dub.mp3")),
            ..base_spec()
        };
        let invocation = spec.to_invocation();
        assert_eq!(invocation.inputs.len(), 2);
        assert_eq!(invocation.maps, vec!["0:v", "1:a"]);
        assert!(invocation.filter_complex.is_none());
    }

    #[test]
    fn background_music_is_looped_scaled_and_compensated() {
        let spec = RenderSpec {
            background_music: Some(BackgroundMusic {
                path: PathBuf::from("/tmp/bg.mp3"),
                volume: 0.2,
            }),
            ..base_spec()
        };
        let invocation = spec.to_invocation();

        assert!(invocation.inputs[1].loop_forever);
        let graph = invocation.filter_complex.unwrap();
        assert_eq!(
            graph,
            "[1:a]volume=0.2[v1];\
             [0:a][v1]amix=inputs=2:duration=first:dropout_transition=0,volume=2[outa]"
        );
        assert_eq!(invocation.maps, vec!["0:v", "[outa]"]);
    }

    #[test]
    fn dub_plus_background_music_mixes_the_dub_track() {
        let spec = RenderSpec {
            dub_audio: Some(PathBuf::from("/tmp/dub.mp3")),
            background_music: Some(BackgroundMusic {
                path: PathBuf::from("/tmp/bg.mp3"),
                volume: 0.3,
            }),
            ..base_spec()
        };
        let invocation = spec.to_invocation();

        // Input order: source, dub, music.
        assert_eq!(invocation.inputs.len(), 3);
        assert!(invocation.inputs[2].loop_forever);
        let graph = invocation.filter_complex.unwrap();
        assert!(graph.starts_with("[2:a]volume=0.3[v2];[1:a][v2]amix=inputs=2:"));
        assert!(graph.ends_with(",volume=2[outa]"));
    }

    #[test]
    fn filter_graph_and_fades_reach_the_invocation() {
        let builder =
            FilterGraphBuilder::new(FilterSettings::default(), Platform::Shorts, 30.0)
                .with_subtitles(Path::new("/tmp/c.ass"))
                .with_transition(crate::models::TransitionType::Fade);
        let spec = RenderSpec {
            graph: builder.build(),
            audio_fades: builder.audio_fades(),
            ..base_spec()
        };
        let invocation = spec.to_invocation();

        let vf = invocation.video_filter.unwrap();
        assert!(vf.contains("crop=ih*(9/16)"));
        assert!(vf.contains("subtitles='/tmp/c.ass'"));
        assert!(invocation.audio_filter.unwrap().starts_with("afade=t=in"));
    }
}
