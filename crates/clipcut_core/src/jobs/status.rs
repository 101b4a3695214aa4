//! Process-wide job status table.
//!
//! Entries are keyed by job identifier and mutated only by the thread
//! executing that job; status queries read concurrently. Single writer,
//! multiple readers - the lock is held only for field updates, never
//! across external calls.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;

use crate::models::ClipOutcome;

/// Lifecycle phase of a job, surfaced verbatim to status queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Initializing,
    Analyzing,
    Transcribing,
    Selecting,
    Editing,
    /// Dubbing the clip with the given 1-based index.
    DubbingClip(usize),
    /// Whole-clip dub fallback for the given 1-based clip index.
    DubbingFallback(usize),
    Completed,
    Error,
}

impl std::fmt::Display for JobPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::Analyzing => write!(f, "analyzing"),
            Self::Transcribing => write!(f, "transcribing"),
            Self::Selecting => write!(f, "selecting"),
            Self::Editing => write!(f, "editing"),
            Self::DubbingClip(i) => write!(f, "dubbing_clip_{}", i),
            Self::DubbingFallback(i) => write!(f, "dubbing_fallback_{}", i),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One job's visible state.
#[derive(Debug, Clone, Serialize)]
pub struct JobEntry {
    /// Current phase, as a status string.
    pub status: String,
    /// Error message, set only when the job failed as a whole.
    pub error: Option<String>,
    /// Per-clip outcomes, populated on completion.
    pub results: Vec<ClipOutcome>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl JobEntry {
    fn new() -> Self {
        Self {
            status: JobPhase::Initializing.to_string(),
            error: None,
            results: Vec::new(),
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }
}

/// Status table shared between job threads and status queries.
#[derive(Debug, Default)]
pub struct JobStatusTable {
    jobs: RwLock<HashMap<String, JobEntry>>,
}

impl JobStatusTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job in the `initializing` phase.
    pub fn init(&self, job_id: &str) {
        self.jobs.write().insert(job_id.to_string(), JobEntry::new());
    }

    /// Advance a job's phase. Unknown job ids are ignored.
    pub fn set_phase(&self, job_id: &str, phase: JobPhase) {
        if let Some(entry) = self.jobs.write().get_mut(job_id) {
            entry.status = phase.to_string();
        }
    }

    /// Record completion with the final per-clip outcomes.
    pub fn complete(&self, job_id: &str, results: Vec<ClipOutcome>) {
        if let Some(entry) = self.jobs.write().get_mut(job_id) {
            entry.results = results;
            entry.status = JobPhase::Completed.to_string();
        }
    }

    /// Record job-level failure. Per-clip failures do not reach here; a
    /// job fails only when zero clips produced a video artifact.
    pub fn fail(&self, job_id: &str, error: impl Into<String>) {
        if let Some(entry) = self.jobs.write().get_mut(job_id) {
            entry.error = Some(error.into());
            entry.status = JobPhase::Error.to_string();
        }
    }

    /// Snapshot a job's state.
    pub fn get(&self, job_id: &str) -> Option<JobEntry> {
        self.jobs.read().get(job_id).cloned()
    }

    /// Number of tracked jobs.
    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_render_original_status_strings() {
        assert_eq!(JobPhase::Initializing.to_string(), "initializing");
        assert_eq!(JobPhase::DubbingClip(3).to_string(), "dubbing_clip_3");
        assert_eq!(JobPhase::DubbingFallback(1).to_string(), "dubbing_fallback_1");
    }

    #[test]
    fn lifecycle_transitions_are_visible_to_readers() {
        let table = JobStatusTable::new();
        table.init("job-1");
        assert_eq!(table.get("job-1").unwrap().status, "initializing");

        table.set_phase("job-1", JobPhase::Editing);
        assert_eq!(table.get("job-1").unwrap().status, "editing");

        table.complete("job-1", vec![ClipOutcome::default()]);
        let entry = table.get("job-1").unwrap();
        assert_eq!(entry.status, "completed");
        assert_eq!(entry.results.len(), 1);
        assert!(entry.error.is_none());
    }

    #[test]
    fn failure_records_error_and_state() {
        let table = JobStatusTable::new();
        table.init("job-2");
        table.fail("job-2", "No clips generated");

        let entry = table.get("job-2").unwrap();
        assert_eq!(entry.status, "error");
        assert_eq!(entry.error.as_deref(), Some("No clips generated"));
    }

    #[test]
    fn unknown_job_updates_are_ignored() {
        let table = JobStatusTable::new();
        table.set_phase("ghost", JobPhase::Editing);
        assert!(table.get("ghost").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn entries_serialize_for_status_queries() {
        let table = JobStatusTable::new();
        table.init("job-3");
        let json = serde_json::to_string(&table.get("job-3").unwrap()).unwrap();
        assert!(json.contains("\"status\":\"initializing\""));
    }
}
