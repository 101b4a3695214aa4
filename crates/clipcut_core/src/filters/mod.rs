//! Visual effect stages and deterministic filter-graph assembly.

pub mod graph;
pub mod library;
pub mod stage;

pub use graph::{FilterGraph, FilterGraphBuilder, FilterSettings};
pub use library::preset_stages;
pub use stage::{FadeDirection, FilterStage};
