pub mod artifact;
pub mod kokoro;
pub mod voice;

#[cfg(test)]
pub mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;

pub use artifact::AudioArtifact;
pub use kokoro::{KokoroCli, Synthesizer};

pub struct TtsService {
    synthesizer: Arc<dyn Synthesizer>,
    temp_dir: PathBuf,
    cleanup: bool,
}

impl TtsService {
    pub fn new(synthesizer: Arc<dyn Synthesizer>, config: &Config) -> Self {
        Self {
            synthesizer,
            temp_dir: config.temp_dir.clone(),
            cleanup: config.cleanup_files,
        }
    }

    /// Run one synthesis into a freshly allocated artifact.
    ///
    /// The run happens on its own task: if the client goes away the tool still
    /// finishes (or times out), and the artifact is dropped and cleaned up there.
    pub async fn synthesize(&self, text: String, voice: String) -> Result<AudioArtifact, AppError> {
        let artifact = AudioArtifact::allocate(&self.temp_dir, self.cleanup);
        let synthesizer = Arc::clone(&self.synthesizer);

        let task = tokio::spawn(async move {
            let ok = synthesizer
                .synthesize(&text, &voice, artifact.path())
                .await;
            (ok, artifact)
        });

        let (ok, artifact) = task
            .await
            .map_err(|e| AppError::Internal(format!("synthesis task failed: {}", e)))?;

        if !ok {
            return Err(AppError::SynthesisFailed);
        }

        Ok(artifact)
    }
}
