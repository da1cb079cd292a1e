use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A per-request output file under the temp directory.
///
/// The path embeds a fresh v4 UUID, so no two requests ever share a file.
/// The artifact is consumed exactly once: either through [`AudioArtifact::remove`]
/// or by being dropped, which deletes the file when cleanup is enabled. The drop
/// path covers synthesis failure, timeouts and clients that disconnect mid-transfer.
#[derive(Debug)]
pub struct AudioArtifact {
    path: PathBuf,
    cleanup: bool,
    removed: bool,
}

impl AudioArtifact {
    pub fn allocate(temp_dir: &Path, cleanup: bool) -> Self {
        let path = temp_dir.join(format!("kokoro_tts_{}.wav", Uuid::new_v4()));
        Self {
            path,
            cleanup,
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    pub async fn open(&self) -> io::Result<tokio::fs::File> {
        tokio::fs::File::open(&self.path).await
    }

    /// Delete the file now. Failures are logged; the caller has nothing left to do with them.
    pub async fn remove(mut self) {
        self.removed = true;
        if !self.cleanup {
            return;
        }

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => tracing::info!("Cleaned up temporary file: {}", self.path.display()),
            Err(e) => tracing::warn!("Failed to clean up file {}: {}", self.path.display(), e),
        }
    }
}

impl Drop for AudioArtifact {
    fn drop(&mut self) {
        if self.removed || !self.cleanup {
            return;
        }

        // Synchronous: the file is gone by the time drop returns, even on a runtime worker.
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::info!("Cleaned up temporary file: {}", self.path.display()),
            // Nothing was written, e.g. the tool failed before creating output.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to clean up file {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let a = AudioArtifact::allocate(dir.path(), true);
        let b = AudioArtifact::allocate(dir.path(), true);

        assert_ne!(a.path(), b.path());
        assert_eq!(a.path().parent(), Some(dir.path()));
        let name = a.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("kokoro_tts_"));
        assert!(name.ends_with(".wav"));
    }

    #[test]
    fn test_drop_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = AudioArtifact::allocate(dir.path(), true);
        let path = artifact.path().to_path_buf();
        std::fs::write(&path, b"RIFF").unwrap();

        drop(artifact);

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_on_runtime_deletes_before_returning() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = AudioArtifact::allocate(dir.path(), true);
        let path = artifact.path().to_path_buf();
        tokio::fs::write(&path, b"RIFF").await.unwrap();

        drop(artifact);

        assert!(!path.exists());
    }

    #[test]
    fn test_drop_without_file_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        drop(AudioArtifact::allocate(dir.path(), true));
    }

    #[test]
    fn test_cleanup_disabled_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = AudioArtifact::allocate(dir.path(), false);
        let path = artifact.path().to_path_buf();
        std::fs::write(&path, b"RIFF").unwrap();

        drop(artifact);

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_read_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = AudioArtifact::allocate(dir.path(), true);
        let path = artifact.path().to_path_buf();
        tokio::fs::write(&path, b"RIFF1234").await.unwrap();

        assert_eq!(artifact.read().await.unwrap(), b"RIFF1234");
        artifact.remove().await;

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = AudioArtifact::allocate(dir.path(), true);
        assert!(artifact.read().await.is_err());
    }
}
