//! Synthesizer doubles for tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::Synthesizer;

/// Writes a short silent WAV and records every call.
#[derive(Default)]
pub struct FakeSynthesizer {
    pub calls: Mutex<Vec<(String, String, PathBuf)>>,
}

impl FakeSynthesizer {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, path)| path.clone())
            .collect()
    }
}

#[async_trait]
impl Synthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str, output_path: &Path) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice.to_string(), output_path.to_path_buf()));
        write_silence(output_path);
        true
    }
}

/// Leaves a partial file behind and reports failure.
pub struct FailingSynthesizer;

#[async_trait]
impl Synthesizer for FailingSynthesizer {
    async fn synthesize(&self, _text: &str, _voice: &str, output_path: &Path) -> bool {
        std::fs::write(output_path, b"RIFF").unwrap();
        false
    }
}

/// Sleeps before writing, so a caller can walk away mid-run.
pub struct SlowSynthesizer {
    pub delay: Duration,
    pub finished: AtomicBool,
}

impl SlowSynthesizer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            finished: AtomicBool::new(false),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Synthesizer for SlowSynthesizer {
    async fn synthesize(&self, _text: &str, _voice: &str, output_path: &Path) -> bool {
        tokio::time::sleep(self.delay).await;
        write_silence(output_path);
        self.finished.store(true, Ordering::SeqCst);
        true
    }
}

pub fn write_silence(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 24_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..2_400 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Files currently in `dir`.
pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

/// Writing an executable while another test forks can fail with ETXTBSY, so
/// every test that writes or runs a script holds this lock.
#[cfg(unix)]
pub static SCRIPT_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// Shell body that writes `RIFF` to the path following `-o`.
#[cfg(unix)]
pub const WRITES_OUTPUT: &str = r#"
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then shift; out="$1"; fi
  shift
done
printf 'RIFF' > "$out"
"#;

#[cfg(unix)]
pub fn write_script(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("kokoro");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
