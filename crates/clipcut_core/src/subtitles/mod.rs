//! Subtitle derivation and artifact emission.
//!
//! Two independent artifacts are produced from the same compiled cue list:
//! a numbered-block file (millisecond timestamps, for download) and a
//! styled-events file (centisecond timestamps, for burn-in).
//!
//! Compilation never fails: malformed or non-overlapping input simply
//! yields fewer cues.

pub mod compiler;
pub mod time;
pub mod writers;

pub use compiler::compile;
pub use time::{format_ass_time, format_srt_time};
pub use writers::{write_ass, write_ass_file, write_srt, write_srt_file, EventStyle};
