/// Voices accepted by the server, in the order they are advertised.
pub const ALLOWED_VOICES: &[&str] = &[
    "af_alloy",
    "af_aoede",
    "af_bella",
    "af_heart",
    "af_jessica",
    "af_kore",
    "af_nicole",
    "af_nova",
    "af_river",
    "af_sarah",
    "af_sky",
    "am_adam",
    "am_michael",
    "bf_alice",
    "bf_emma",
    "bf_isabella",
    "bf_lily",
    "bm_george",
    "bm_lewis",
    "jf_alpha",
    "jf_gongitsune",
    "jf_nezumi",
    "jf_tebukuro",
];

pub const DEFAULT_VOICE: &str = "af_heart";

/// The only audio container the tool is asked to produce.
pub const SUPPORTED_FORMAT: &str = "wav";

pub const MAX_TEXT_LENGTH: usize = 10_000;

pub fn is_allowed(voice: &str) -> bool {
    ALLOWED_VOICES.contains(&voice)
}

#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    pub voices: &'static [&'static str],
    pub default: &'static str,
}

impl VoiceCatalog {
    pub fn builtin() -> Self {
        Self {
            voices: ALLOWED_VOICES,
            default: DEFAULT_VOICE,
        }
    }
}
