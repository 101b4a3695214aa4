//! Translated, time-synchronized dub track assembly.
//!
//! Translation and speech synthesis are external collaborators behind the
//! [`Translator`] and [`Synthesizer`] seams. Every provider failure is an
//! explicit result value; the assembler degrades per segment, then per
//! clip, and only gives up on dubbed audio entirely after the whole-clip
//! fallback also fails. Translated text survives audio failure so the
//! subtitle path can still use it.

mod assembler;
mod voices;

use std::path::Path;

use thiserror::Error;

pub use assembler::{DubAssembler, DubOutcome, DubSegment, MIN_SEGMENT_SECS};
pub use voices::voice_for_language;

/// Translation provider failure.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The provider rejected or failed the request.
    #[error("Translation provider failed: {0}")]
    Provider(String),
}

/// Speech synthesis provider failure.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The provider rejected or failed the request.
    #[error("Synthesis provider failed: {0}")]
    Provider(String),

    /// One synthesis attempt exceeded its budget.
    #[error("Synthesis timed out after {0}s")]
    Timeout(u64),
}

/// Text translation seam.
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_lang`.
    ///
    /// Callers degrade an `Err` to the untranslated text; implementations
    /// never need to fabricate a fallback themselves.
    fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError>;
}

/// Speech synthesis seam.
///
/// Implementations must bound each attempt to roughly 60 seconds of wall
/// clock; the assembler owns the retry count and backoff.
pub trait Synthesizer: Send + Sync {
    /// Synthesize `text` with the named voice into `output`.
    fn synthesize(&self, text: &str, voice: &str, output: &Path) -> Result<(), SynthesisError>;
}
