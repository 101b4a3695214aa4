//! Duration-preserving audio stretch planning and realization.
//!
//! The engine's tempo primitive only accepts factors in `[0.5, 2.0]` per
//! stage, so an arbitrary speed ratio is decomposed into a bounded chain
//! of stages whose product approximates the ratio. Chaining moderate
//! stages avoids the audible artifacts of one extreme tempo change.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::render::engine::{EngineError, EngineInvocation, InputSpec, RenderEngine};

/// Lowest tempo factor a single stage supports.
pub const MIN_TEMPO: f64 = 0.5;
/// Highest tempo factor a single stage supports.
pub const MAX_TEMPO: f64 = 2.0;
/// Stage-chain bound for pathological ratios.
pub const MAX_STAGES: usize = 10;

/// Wall-clock budget for realizing one stretch.
pub const STRETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from stretch planning and realization.
#[derive(Debug, Error)]
pub enum StretchError {
    /// A non-positive duration cannot be planned.
    #[error("Invalid duration: current {current}s, target {target}s")]
    InvalidDuration { current: f64, target: f64 },

    /// The source duration could not be determined.
    #[error("Failed to probe stretch source: {0}")]
    Probe(#[source] EngineError),

    /// The stretch invocation failed or timed out.
    #[error("Stretch render failed: {0}")]
    Render(#[source] EngineError),

    /// The engine reported success but produced no artifact.
    #[error("Stretch produced no artifact at '{0}'")]
    MissingArtifact(PathBuf),
}

/// Result type for stretch operations.
pub type StretchResult<T> = Result<T, StretchError>;

/// An ordered chain of tempo-stage factors.
#[derive(Debug, Clone, PartialEq)]
pub struct StretchPlan {
    stages: Vec<f64>,
}

impl StretchPlan {
    /// The tempo factors, in application order.
    pub fn stages(&self) -> &[f64] {
        &self.stages
    }

    /// Product of all stage factors (the realized overall ratio).
    pub fn product(&self) -> f64 {
        self.stages.iter().product()
    }

    /// Render the plan as the engine's chained tempo filter.
    pub fn to_filter(&self) -> String {
        self.stages
            .iter()
            .map(|factor| format!("atempo={}", round_factor(*factor)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Decompose the speed ratio `current_duration / target_duration` into a
/// bounded stage chain.
///
/// Ratios above the per-stage maximum peel off `2.0` stages; ratios below
/// the minimum peel off `0.5` stages; the remainder becomes the final
/// stage. If the stage bound is hit the truncated plan is returned as-is:
/// best effort, not an error.
pub fn plan(current_duration: f64, target_duration: f64) -> StretchResult<StretchPlan> {
    if current_duration <= 0.0 || target_duration <= 0.0 {
        return Err(StretchError::InvalidDuration {
            current: current_duration,
            target: target_duration,
        });
    }

    let mut stages = Vec::new();
    let mut remaining = current_duration / target_duration;

    while remaining > MAX_TEMPO && stages.len() < MAX_STAGES {
        stages.push(MAX_TEMPO);
        remaining /= MAX_TEMPO;
    }
    while remaining < MIN_TEMPO && stages.len() < MAX_STAGES {
        stages.push(MIN_TEMPO);
        remaining /= MIN_TEMPO;
    }
    if stages.len() < MAX_STAGES {
        stages.push(remaining);
    }

    Ok(StretchPlan { stages })
}

/// Stretch `input` so it occupies exactly `target_duration` seconds,
/// writing the artifact to `output`.
///
/// Probes the measured duration, plans the stage chain, and realizes it
/// with a single engine invocation under [`STRETCH_TIMEOUT`]. Any failure
/// makes this segment unusable for the caller; it is never fatal to the
/// clip.
pub fn stretch_to_duration(
    engine: &dyn RenderEngine,
    input: &Path,
    target_duration: f64,
    output: &Path,
) -> StretchResult<()> {
    let current = engine.probe_duration(input).map_err(StretchError::Probe)?;
    let plan = plan(current, target_duration)?;

    tracing::debug!(
        "Stretching {} ({:.3}s -> {:.3}s) via {}",
        input.display(),
        current,
        target_duration,
        plan.to_filter()
    );

    let invocation = EngineInvocation {
        inputs: vec![InputSpec::file(input)],
        extra_args: vec![
            "-filter:a".to_string(),
            plan.to_filter(),
            "-vn".to_string(),
        ],
        output: output.to_path_buf(),
        ..Default::default()
    };

    engine
        .run(&invocation, STRETCH_TIMEOUT)
        .map_err(StretchError::Render)?;

    if !output.exists() {
        return Err(StretchError::MissingArtifact(output.to_path_buf()));
    }
    Ok(())
}

/// Trim float noise from computed factors before rendering them.
fn round_factor(factor: f64) -> f64 {
    (factor * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ratio_is_single_stage() {
        let p = plan(4.0, 4.0).unwrap();
        assert_eq!(p.stages(), &[1.0]);
        assert_eq!(p.to_filter(), "atempo=1");
    }

    #[test]
    fn speed_up_decomposes_into_bounded_stages() {
        // 10s of audio into a 4s slot: ratio 2.5 -> [2.0, 1.25].
        let p = plan(10.0, 4.0).unwrap();
        assert_eq!(p.stages(), &[2.0, 1.25]);
        assert!((p.product() - 2.5).abs() < 1e-9);
        assert_eq!(p.to_filter(), "atempo=2,atempo=1.25");
    }

    #[test]
    fn slow_down_uses_half_speed_stages() {
        // 1s of audio into a 5s slot: ratio 0.2 -> [0.5, 0.5, 0.8].
        let p = plan(1.0, 5.0).unwrap();
        assert_eq!(p.stages(), &[0.5, 0.5, 0.8]);
        assert!((p.product() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn stages_stay_in_supported_range() {
        for (current, target) in [(100.0, 1.0), (1.0, 100.0), (7.3, 2.2), (0.4, 9.7)] {
            let p = plan(current, target).unwrap();
            assert!(!p.stages().is_empty());
            for stage in p.stages() {
                assert!(
                    (MIN_TEMPO..=MAX_TEMPO).contains(stage),
                    "stage {} out of range for ratio {}",
                    stage,
                    current / target
                );
            }
        }
    }

    #[test]
    fn product_approximates_ratio_within_tolerance() {
        for (current, target) in [(10.0, 4.0), (3.0, 7.0), (120.0, 13.0), (0.2, 1.9)] {
            let ratio = current / target;
            let p = plan(current, target).unwrap();
            assert!(
                ((p.product() - ratio) / ratio).abs() < 0.01,
                "product {} vs ratio {}",
                p.product(),
                ratio
            );
        }
    }

    #[test]
    fn pathological_ratio_caps_at_stage_bound() {
        let p = plan(2f64.powi(20), 1.0).unwrap();
        assert_eq!(p.stages().len(), MAX_STAGES);
        for stage in p.stages() {
            assert!((MIN_TEMPO..=MAX_TEMPO).contains(stage));
        }
    }

    #[test]
    fn non_positive_durations_are_rejected() {
        assert!(matches!(
            plan(0.0, 4.0),
            Err(StretchError::InvalidDuration { .. })
        ));
        assert!(matches!(
            plan(4.0, -1.0),
            Err(StretchError::InvalidDuration { .. })
        ));
    }
}
