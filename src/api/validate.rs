use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::AppError;
use crate::tts::voice::{self, ALLOWED_VOICES, DEFAULT_VOICE, SUPPORTED_FORMAT};

#[derive(Debug, Default, Deserialize)]
pub struct SynthesizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// `None` when the key is absent, `Some(None)` for an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub voice: Option<Option<String>>,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub text: String,
    pub voice: String,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::InvalidRequest(msg.into())
}

/// Parse a raw JSON body. An empty body, `null` or `{}` all count as missing.
pub fn parse_body(body: &[u8]) -> Result<SynthesizeRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(invalid("Request body is required"));
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|_| invalid("Request body must be valid JSON"))?;

    match value {
        Value::Null => Err(invalid("Request body is required")),
        Value::Object(ref map) if map.is_empty() => Err(invalid("Request body is required")),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| invalid(format!("Malformed request body: {}", e))),
        _ => Err(invalid("Request body must be a JSON object")),
    }
}

pub fn validate(
    request: SynthesizeRequest,
    max_text_length: usize,
) -> Result<ValidatedRequest, AppError> {
    let text = request.text.as_deref().unwrap_or("").trim();
    if text.is_empty() {
        return Err(invalid("Text field is required and cannot be empty"));
    }

    if text.chars().count() > max_text_length {
        return Err(invalid(format!(
            "Text length exceeds maximum of {} characters",
            max_text_length
        )));
    }

    let voice = match request.voice {
        None => DEFAULT_VOICE.to_string(),
        Some(Some(voice)) if voice::is_allowed(&voice) => voice,
        Some(_) => {
            return Err(invalid(format!(
                "Invalid voice. Allowed voices: {}",
                ALLOWED_VOICES.join(", ")
            )))
        }
    };

    if let Some(format) = request.format.as_deref().filter(|f| !f.is_empty()) {
        if !format.eq_ignore_ascii_case(SUPPORTED_FORMAT) {
            return Err(invalid(
                "Only WAV format is supported. Please omit the format parameter or use 'wav'.",
            ));
        }
    }

    Ok(ValidatedRequest {
        text: text.to_string(),
        voice,
    })
}
