//! Render planning and coordination.
//!
//! [`engine`] talks to the external render engine, [`spec`] lowers one
//! clip's aggregate description into an engine invocation, and
//! [`coordinator`] sequences dubbing, subtitles, graph building, and the
//! render itself with the layered fallback policy.

pub mod coordinator;
pub mod engine;
pub mod spec;

pub use coordinator::{RenderCoordinator, RenderRequest, RENDER_TIMEOUT};
pub use engine::{EngineError, EngineInvocation, EngineResult, FfmpegEngine, InputSpec, RenderEngine};
pub use spec::{BackgroundMusic, RenderSpec};
