//! Per-job logger with file and callback output.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogCallback, LogConfig, MessagePrefix};

/// Logger scoped to one render job.
///
/// Writes to `<log_dir>/<job_id>.log`, forwards each line to an optional
/// callback, and keeps a bounded tail buffer of external-tool output so a
/// failed render can show the lines that led up to the error.
pub struct JobLogger {
    job_id: String,
    log_path: PathBuf,
    file_writer: Mutex<Option<BufWriter<File>>>,
    callback: Option<LogCallback>,
    config: LogConfig,
    tail_buffer: Mutex<VecDeque<String>>,
}

impl JobLogger {
    /// Create a logger for `job_id`, writing under `log_dir`.
    pub fn new(
        job_id: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        callback: Option<LogCallback>,
    ) -> std::io::Result<Self> {
        let job_id = job_id.into();
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&job_id)));
        let file_writer = BufWriter::new(File::create(&log_path)?);
        let tail_capacity = config.error_tail;

        Ok(Self {
            job_id,
            log_path,
            file_writer: Mutex::new(Some(file_writer)),
            callback,
            config,
            tail_buffer: Mutex::new(VecDeque::with_capacity(tail_capacity)),
        })
    }

    /// The job this logger belongs to.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// The log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a plain message.
    pub fn info(&self, message: &str) {
        self.output(&self.format_line(message));
    }

    /// Log a warning.
    pub fn warn(&self, message: &str) {
        self.info(&MessagePrefix::Warning.format(message));
    }

    /// Log an error.
    pub fn error(&self, message: &str) {
        self.info(&MessagePrefix::Error.format(message));
    }

    /// Log an external command being executed.
    pub fn command(&self, command: &str) {
        self.info(&MessagePrefix::Command.format(command));
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        self.info(&MessagePrefix::Phase.format(phase_name));
    }

    /// Log a success marker.
    pub fn success(&self, message: &str) {
        self.info(&MessagePrefix::Success.format(message));
    }

    /// Record one line of external-tool output.
    ///
    /// The line always lands in the tail buffer; in compact mode it is not
    /// otherwise emitted.
    pub fn output_line(&self, line: &str) {
        {
            let mut buffer = self.tail_buffer.lock();
            if buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            buffer.push_back(line.to_string());
        }
        if !self.config.compact {
            self.info(line);
        }
    }

    /// Emit the tail buffer, typically after a failed render.
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }
        self.output(&self.format_line(&format!("[{}/tail]", header)));
        for line in buffer.iter() {
            self.output(&self.format_line(line));
        }
    }

    /// Current tail buffer contents.
    pub fn tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    fn format_line(&self, message: &str) -> String {
        if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, line: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
        if let Some(ref callback) = self.callback {
            callback(line);
        }
    }
}

impl Drop for JobLogger {
    fn drop(&mut self) {
        self.flush();
        *self.file_writer.lock() = None;
    }
}

/// Make a job id safe for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn plain_config() -> LogConfig {
        LogConfig {
            compact: true,
            error_tail: 5,
            show_timestamps: false,
        }
    }

    #[test]
    fn writes_lines_to_job_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JobLogger::new("job-1", dir.path(), plain_config(), None).unwrap();

        logger.phase("Dubbing");
        logger.command("ffmpeg -y -i in.mp4 out.mp4");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("=== Dubbing ==="));
        assert!(content.contains("$ ffmpeg -y"));
    }

    #[test]
    fn callback_receives_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let callback: LogCallback = Box::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let logger = JobLogger::new("job-2", dir.path(), plain_config(), Some(callback)).unwrap();
        logger.info("one");
        logger.warn("two");

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn tail_buffer_is_bounded_and_compact_mode_suppresses_output() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JobLogger::new("job-3", dir.path(), plain_config(), None).unwrap();

        for i in 0..8 {
            logger.output_line(&format!("frame={}", i));
        }
        logger.flush();

        let tail = logger.tail();
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0], "frame=3");

        // Compact mode keeps tool chatter out of the log file until the
        // tail is shown.
        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.is_empty());

        logger.show_tail("render");
        logger.flush();
        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("[render/tail]"));
        assert!(content.contains("frame=7"));
    }

    #[test]
    fn sanitizes_job_ids_for_filenames() {
        assert_eq!(sanitize_filename("ab/cd:ef"), "ab_cd_ef");
        assert_eq!(sanitize_filename("plain"), "plain");
    }
}
