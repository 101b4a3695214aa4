//! ClipCut Core - clip timeline synchronization and media composition.
//!
//! Turns a source video plus a word-level transcript into short output
//! clips: clip-aligned subtitle artifacts, an optionally translated and
//! time-stretched dub track, a deterministic visual filter graph, and the
//! declarative render invocations an external engine executes. The crate
//! never decodes or encodes media itself.
//!
//! Acquisition, transcription, translation, synthesis, and the HTTP/job
//! layer are external collaborators behind trait seams.

pub mod audio;
pub mod config;
pub mod dub;
pub mod filters;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod render;
pub mod selection;
pub mod subtitles;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
