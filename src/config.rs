use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tts::voice::MAX_TEXT_LENGTH;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Failed to determine current directory: {0}")]
    CurrentDir(std::io::Error),

    #[error("Temp directory {} is not usable: {source}", path.display())]
    TempDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Server configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub kokoro_bin: PathBuf,
    pub temp_dir: PathBuf,
    pub cleanup_files: bool,
    pub max_text_length: usize,
    pub synthesis_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", "a port number", 9880u16)?;
        let kokoro_bin = lookup("KOKORO_BIN")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("kokoro"));

        let temp_dir = match lookup("TEMP_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()
                .map_err(ConfigError::CurrentDir)?
                .join("output_temp"),
        };

        let cleanup_files = match lookup("CLEANUP_FILES") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "CLEANUP_FILES",
                expected: "a boolean",
                value,
            })?,
            None => true,
        };

        let max_text_length = parse_var(
            &lookup,
            "MAX_TEXT_LENGTH",
            "a positive integer",
            MAX_TEXT_LENGTH,
        )?;
        let timeout_secs = parse_var(
            &lookup,
            "SYNTHESIS_TIMEOUT_SECS",
            "a number of seconds",
            60u64,
        )?;

        Ok(Self {
            host,
            port,
            kokoro_bin,
            temp_dir,
            cleanup_files,
            max_text_length,
            synthesis_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Create the temp directory if needed and check that it is writable.
pub fn ensure_temp_dir(dir: &Path) -> Result<(), ConfigError> {
    let wrap = |source| ConfigError::TempDir {
        path: dir.to_path_buf(),
        source,
    };

    if dir.is_dir() {
        tracing::info!("Using existing temp directory: {}", dir.display());
    } else {
        std::fs::create_dir_all(dir).map_err(wrap)?;
        tracing::info!("Created temp directory: {}", dir.display());
    }

    let probe = dir.join("test_write.tmp");
    std::fs::write(&probe, b"test").map_err(wrap)?;
    std::fs::remove_file(&probe).map_err(wrap)?;

    Ok(())
}
