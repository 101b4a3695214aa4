//! Core data model shared across the engine.

mod clips;
mod cues;
mod enums;

pub use clips::{ClipOutcome, ClipSegment, DubbingOptions, SourceAnalysis};
pub use cues::{SubtitleCue, TranscriptCue};
pub use enums::{
    CropAspect, Platform, SpecialEffect, SubtitleAnimation, TransitionType, VoiceGender,
};
