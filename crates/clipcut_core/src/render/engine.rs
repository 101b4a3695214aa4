//! External render-engine invocation.
//!
//! The engine never decodes or encodes media itself; it describes what
//! should happen as an ordered, declarative argument list and hands that
//! to an external `ffmpeg`/`ffprobe` process under a wall-clock budget.
//! Every call is blocking; on budget expiry the process is killed and the
//! call reports a timeout for that sub-step only.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

/// How often a running external process is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How much trailing stderr is kept for diagnostics.
const STDERR_TAIL_BYTES: usize = 4096;

/// Errors from external engine invocations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The tool binary could not be started.
    #[error("Failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The invocation exceeded its wall-clock budget and was killed.
    #[error("{tool} exceeded its {secs}s budget")]
    Timeout { tool: String, secs: u64 },

    /// The tool exited non-zero.
    #[error("{tool} failed with exit code {code}: {stderr}")]
    ExitStatus {
        tool: String,
        code: i32,
        stderr: String,
    },

    /// Waiting on the child process failed.
    #[error("{tool} process error: {source}")]
    Process {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// A media file could not be probed.
    #[error("Failed to probe '{path}': {message}")]
    Probe { path: PathBuf, message: String },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// One input stream of an invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSpec {
    /// File path, or a generator spec when `format` is set (e.g. lavfi).
    pub source: String,
    /// Seek before reading, in seconds (`-ss`).
    pub seek: Option<f64>,
    /// Limit read duration, in seconds (`-t`).
    pub duration: Option<f64>,
    /// Loop the input indefinitely (`-stream_loop -1`).
    pub loop_forever: bool,
    /// Demuxer override (`-f`), used for synthetic inputs.
    pub format: Option<String>,
}

impl InputSpec {
    /// A plain file input.
    pub fn file(path: &Path) -> Self {
        Self {
            source: path.to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    /// A synthetic lavfi-generated input (silence, test sources).
    pub fn lavfi(spec: impl Into<String>) -> Self {
        Self {
            source: spec.into(),
            format: Some("lavfi".to_string()),
            ..Default::default()
        }
    }

    /// Seek to `secs` before reading.
    pub fn with_seek(mut self, secs: f64) -> Self {
        self.seek = Some(secs);
        self
    }

    /// Read at most `secs` of this input.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Loop this input indefinitely; the mix duration policy truncates it.
    pub fn looped(mut self) -> Self {
        self.loop_forever = true;
        self
    }
}

/// A declarative engine invocation: ordered inputs, filter graphs, stream
/// mappings, codecs, and the authoritative output duration override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineInvocation {
    /// Ordered input streams.
    pub inputs: Vec<InputSpec>,
    /// Multi-stream filter graph (`-filter_complex`).
    pub filter_complex: Option<String>,
    /// Simple video filter chain (`-vf`).
    pub video_filter: Option<String>,
    /// Simple audio filter chain (`-af`).
    pub audio_filter: Option<String>,
    /// Stream-to-output mappings (`-map` values).
    pub maps: Vec<String>,
    /// Video codec (`-c:v`).
    pub video_codec: Option<String>,
    /// Audio codec (`-c:a`).
    pub audio_codec: Option<String>,
    /// Extra output arguments, appended verbatim.
    pub extra_args: Vec<String>,
    /// Authoritative output duration in seconds (trailing `-t`). This wins
    /// over any intermediate audio artifact length.
    pub duration: Option<f64>,
    /// Output file path.
    pub output: PathBuf,
}

impl EngineInvocation {
    /// Render the invocation to the engine's argument list.
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec!["-y".to_string()];

        for input in &self.inputs {
            if let Some(seek) = input.seek {
                args.push("-ss".to_string());
                args.push(seek.to_string());
            }
            if let Some(duration) = input.duration {
                args.push("-t".to_string());
                args.push(duration.to_string());
            }
            if input.loop_forever {
                args.push("-stream_loop".to_string());
                args.push("-1".to_string());
            }
            if let Some(ref format) = input.format {
                args.push("-f".to_string());
                args.push(format.clone());
            }
            args.push("-i".to_string());
            args.push(input.source.clone());
        }

        if let Some(ref graph) = self.filter_complex {
            args.push("-filter_complex".to_string());
            args.push(graph.clone());
        }
        if let Some(ref codec) = self.video_codec {
            args.push("-c:v".to_string());
            args.push(codec.clone());
        }
        for map in &self.maps {
            args.push("-map".to_string());
            args.push(map.clone());
        }
        if let Some(ref codec) = self.audio_codec {
            args.push("-c:a".to_string());
            args.push(codec.clone());
        }
        args.extend(self.extra_args.iter().cloned());
        if let Some(ref chain) = self.video_filter {
            args.push("-vf".to_string());
            args.push(chain.clone());
        }
        if let Some(ref chain) = self.audio_filter {
            args.push("-af".to_string());
            args.push(chain.clone());
        }
        if let Some(duration) = self.duration {
            args.push("-t".to_string());
            args.push(duration.to_string());
        }
        args.push(self.output.to_string_lossy().into_owned());

        args
    }
}

/// Seam for the external render engine.
///
/// Implemented by [`FfmpegEngine`] in production and by in-memory mocks in
/// tests. All failures are explicit result values so callers can degrade
/// per sub-step instead of aborting a clip or a job.
pub trait RenderEngine: Send + Sync {
    /// Execute an invocation, blocking until completion, non-zero exit, or
    /// timeout.
    fn run(&self, invocation: &EngineInvocation, timeout: Duration) -> EngineResult<()>;

    /// Duration of a media file in seconds.
    fn probe_duration(&self, path: &Path) -> EngineResult<f64>;
}

/// Production engine shelling out to ffmpeg/ffprobe.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    ffmpeg: String,
    ffprobe: String,
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

impl FfmpegEngine {
    /// Engine with explicit binary paths.
    pub fn with_binaries(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }
}

impl RenderEngine for FfmpegEngine {
    fn run(&self, invocation: &EngineInvocation, timeout: Duration) -> EngineResult<()> {
        let args = invocation.to_args();
        tracing::debug!("Running {}: {}", self.ffmpeg, args.join(" "));

        let mut child = Command::new(&self.ffmpeg)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::Spawn {
                tool: self.ffmpeg.clone(),
                source: e,
            })?;

        // Drain stderr on a side thread so a chatty process can't fill the
        // pipe and stall while we poll for completion.
        let mut stderr_pipe = child.stderr.take();
        let stderr_reader = std::thread::spawn(move || {
            let mut buf = String::new();
            if let Some(ref mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut buf);
            }
            buf
        });

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    let stderr = stderr_reader.join().unwrap_or_default();
                    if status.success() {
                        return Ok(());
                    }
                    return Err(EngineError::ExitStatus {
                        tool: self.ffmpeg.clone(),
                        code: status.code().unwrap_or(-1),
                        stderr: tail(&stderr),
                    });
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = stderr_reader.join();
                        return Err(EngineError::Timeout {
                            tool: self.ffmpeg.clone(),
                            secs: timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = stderr_reader.join();
                    return Err(EngineError::Process {
                        tool: self.ffmpeg.clone(),
                        source: e,
                    });
                }
            }
        }
    }

    fn probe_duration(&self, path: &Path) -> EngineResult<f64> {
        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .map_err(|e| EngineError::Spawn {
                tool: self.ffprobe.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(EngineError::Probe {
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        text.trim().parse::<f64>().map_err(|e| EngineError::Probe {
            path: path.to_path_buf(),
            message: format!("unparseable duration '{}': {}", text.trim(), e),
        })
    }
}

/// Keep only the tail of a diagnostic blob.
fn tail(text: &str) -> String {
    if text.len() <= STDERR_TAIL_BYTES {
        return text.trim_end().to_string();
    }
    let start = text.len() - STDERR_TAIL_BYTES;
    // Avoid splitting inside a UTF-8 sequence.
    let start = (start..text.len())
        .find(|i| text.is_char_boundary(*i))
        .unwrap_or(start);
    text[start..].trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_orders_input_options_before_each_input() {
        let invocation = EngineInvocation {
            inputs: vec![
                InputSpec::file(Path::new("/tmp/src.mp4"))
                    .with_seek(12.0)
                    .with_duration(30.0),
                InputSpec::file(Path::new("/tmp/bg.mp3")).looped(),
            ],
            output: PathBuf::from("/tmp/out.mp4"),
            ..Default::default()
        };

        let args = invocation.to_args();
        let joined = args.join(" ");
        assert!(joined.starts_with("-y -ss 12 -t 30 -i /tmp/src.mp4"));
        assert!(joined.contains("-stream_loop -1 -i /tmp/bg.mp3"));
        assert_eq!(args.last().unwrap(), "/tmp/out.mp4");
    }

    #[test]
    fn lavfi_input_carries_format_flag() {
        let invocation = EngineInvocation {
            inputs: vec![InputSpec::lavfi("anullsrc=r=24000:cl=mono:d=30")],
            output: PathBuf::from("/tmp/silence.mp3"),
            ..Default::default()
        };

        let joined = invocation.to_args().join(" ");
        assert!(joined.contains("-f lavfi -i anullsrc=r=24000:cl=mono:d=30"));
    }

    #[test]
    fn duration_override_precedes_output() {
        let invocation = EngineInvocation {
            inputs: vec![InputSpec::file(Path::new("/tmp/src.mp4"))],
            duration: Some(30.0),
            output: PathBuf::from("/tmp/out.mp4"),
            ..Default::default()
        };

        let args = invocation.to_args();
        let n = args.len();
        assert_eq!(args[n - 3..], ["-t", "30", "/tmp/out.mp4"]);
    }

    #[test]
    fn maps_and_codecs_are_emitted_in_order() {
        let invocation = EngineInvocation {
            inputs: vec![InputSpec::file(Path::new("/tmp/src.mp4"))],
            video_codec: Some("libx264".to_string()),
            audio_codec: Some("aac".to_string()),
            maps: vec!["0:v".to_string(), "[outa]".to_string()],
            output: PathBuf::from("/tmp/out.mp4"),
            ..Default::default()
        };

        let joined = invocation.to_args().join(" ");
        assert!(joined.contains("-c:v libx264 -map 0:v -map [outa] -c:a aac"));
    }

    #[test]
    fn tail_truncates_long_diagnostics() {
        let long = "x".repeat(STDERR_TAIL_BYTES * 2);
        assert_eq!(tail(&long).len(), STDERR_TAIL_BYTES);
        assert_eq!(tail("short\n"), "short");
    }
}
