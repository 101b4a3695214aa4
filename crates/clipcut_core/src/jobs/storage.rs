//! Per-job working-directory layout.
//!
//! Each job owns an exclusive directory under `<base>/jobs/<job_id>`;
//! there is no cross-job sharing. Stale directories are removed by age,
//! best effort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Root of the engine's on-disk workspace.
#[derive(Debug, Clone)]
pub struct JobWorkspace {
    base_dir: PathBuf,
}

impl JobWorkspace {
    /// Workspace rooted at `base_dir`. Call [`setup`](Self::setup) before
    /// first use.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The workspace root.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the workspace skeleton.
    pub fn setup(&self) -> io::Result<()> {
        fs::create_dir_all(self.jobs_dir())
    }

    /// The directory holding all job directories.
    pub fn jobs_dir(&self) -> PathBuf {
        self.base_dir.join("jobs")
    }

    /// The working directory for one job.
    pub fn job_dir(&self, job_id: &str) -> PathBuf {
        self.jobs_dir().join(job_id)
    }

    /// Create a job's working directory.
    pub fn init_job(&self, job_id: &str) -> io::Result<PathBuf> {
        let dir = self.job_dir(job_id);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Remove job directories older than `hours`. Individual removal
    /// failures are logged and skipped.
    pub fn cleanup_older_than(&self, hours: u64) {
        let jobs_dir = self.jobs_dir();
        let Ok(entries) = fs::read_dir(&jobs_dir) else {
            return;
        };
        let cutoff = SystemTime::now() - Duration::from_secs(hours * 3600);

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            if modified < cutoff {
                if let Err(e) = fs::remove_dir_all(&path) {
                    tracing::warn!("Failed to remove stale job dir {}: {}", path.display(), e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_and_addresses_job_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = JobWorkspace::new(dir.path());
        workspace.setup().unwrap();

        let job_dir = workspace.init_job("abc123").unwrap();
        assert!(job_dir.exists());
        assert_eq!(job_dir, dir.path().join("jobs").join("abc123"));
    }

    #[test]
    fn cleanup_keeps_fresh_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = JobWorkspace::new(dir.path());
        workspace.setup().unwrap();
        workspace.init_job("fresh").unwrap();

        workspace.cleanup_older_than(8);
        assert!(workspace.job_dir("fresh").exists());
    }

    #[test]
    fn cleanup_tolerates_missing_workspace() {
        let workspace = JobWorkspace::new("/nonexistent/clipcut-workspace");
        workspace.cleanup_older_than(8);
    }
}
