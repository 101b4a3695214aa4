//! Audio timeline tooling: tempo-stage stretch planning and mix-graph
//! construction.

pub mod mix;
pub mod stretch;

pub use mix::MixBuilder;
pub use stretch::{plan, stretch_to_duration, StretchError, StretchPlan, STRETCH_TIMEOUT};
