//! Subtitle artifact writers.

mod ass;
mod srt;

pub use ass::{write_ass, write_ass_file, EventStyle};
pub use srt::{write_srt, write_srt_file};
