use axum::{
    body::{Body, Bytes},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::io::AsyncReadExt;

use crate::error::AppError;
use crate::tts::AudioArtifact;

pub const AUDIO_MIME: &str = "audio/wav";
pub const DOWNLOAD_NAME: &str = "tts_output.wav";

const CHUNK_SIZE: usize = 64 * 1024;

/// Stream the artifact as a download. The body owns the artifact, so the file
/// is removed once the transfer ends or the client drops the connection.
pub async fn attachment(artifact: AudioArtifact) -> Result<Response, AppError> {
    let mut file = artifact.open().await.map_err(AppError::FileRead)?;
    let len = file.metadata().await.map_err(AppError::FileRead)?.len();

    let stream = async_stream::stream! {
        let artifact = artifact;
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            match file.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    yield Ok::<_, std::io::Error>(Bytes::copy_from_slice(&buf[..n]));
                }
                Err(e) => {
                    tracing::warn!("Failed to stream {}: {}", artifact.path().display(), e);
                    yield Err(e);
                    break;
                }
            }
        }
        drop(file);
        artifact.remove().await;
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, AUDIO_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
            ),
            (header::CONTENT_LENGTH, len.to_string()),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// Read the artifact fully, remove it, then answer with the raw bytes.
pub async fn inline(artifact: AudioArtifact) -> Result<Response, AppError> {
    let audio = artifact.read().await.map_err(AppError::FileRead)?;
    artifact.remove().await;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, AUDIO_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", DOWNLOAD_NAME),
            ),
        ],
        audio,
    )
        .into_response())
}
