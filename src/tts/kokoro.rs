use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that turns text into an audio file at a given path.
///
/// Expected failures are reported as `false` and logged by the implementation;
/// callers never see tool diagnostics.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str, output_path: &Path) -> bool;
}

#[derive(thiserror::Error, Debug)]
pub enum KokoroError {
    #[error("failed to run {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while waiting for kokoro: {0}")]
    Io(#[from] std::io::Error),

    #[error("kokoro timed out after {0:?}")]
    Timeout(Duration),

    #[error("kokoro exited with {status}: {stderr}")]
    Exit {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Runs the `kokoro` command-line tool, one process per request.
#[derive(Debug, Clone)]
pub struct KokoroCli {
    bin: PathBuf,
    timeout: Duration,
}

impl KokoroCli {
    pub fn new(bin: PathBuf, timeout: Duration) -> Self {
        Self { bin, timeout }
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.bin);
        // Keep the tool on the CPU.
        cmd.env("CUDA_VISIBLE_DEVICES", "");
        cmd
    }

    /// `kokoro --voice <voice> --text <text> -o <output>`; the text is a single argument.
    pub fn command(&self, text: &str, voice: &str, output_path: &Path) -> Command {
        let mut cmd = self.base_command();
        cmd.arg("--voice")
            .arg(voice)
            .arg("--text")
            .arg(text)
            .arg("-o")
            .arg(output_path);
        cmd
    }

    /// Check that the tool can be launched at all (`--help`).
    pub async fn probe(&self) -> Result<(), KokoroError> {
        let mut cmd = self.base_command();
        cmd.arg("--help");
        let output = self.run(cmd, PROBE_TIMEOUT).await?;
        check_status(output).map(|_| ())
    }

    async fn run(&self, mut cmd: Command, limit: Duration) -> Result<Output, KokoroError> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| KokoroError::Spawn {
            bin: self.bin.display().to_string(),
            source,
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(output) => Ok(output?),
            Err(_) => Err(KokoroError::Timeout(limit)),
        }
    }
}

fn check_status(output: Output) -> Result<Output, KokoroError> {
    if output.status.success() {
        Ok(output)
    } else {
        Err(KokoroError::Exit {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[async_trait]
impl Synthesizer for KokoroCli {
    async fn synthesize(&self, text: &str, voice: &str, output_path: &Path) -> bool {
        let cmd = self.command(text, voice, output_path);
        tracing::debug!(command = ?cmd.as_std(), "Running kokoro");

        let result = self.run(cmd, self.timeout).await.and_then(check_status);
        if let Err(e) = result {
            tracing::error!("Kokoro command failed: {}", e);
            return false;
        }

        match tokio::fs::try_exists(output_path).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::error!("Output file was not created: {}", output_path.display());
                false
            }
            Err(e) => {
                tracing::error!("Failed to check output file {}: {}", output_path.display(), e);
                false
            }
        }
    }
}
