pub mod audio;
pub mod handlers;
pub mod routes;
pub mod validate;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: &'static [&'static str],
    pub default: &'static str,
    pub supported_format: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub supported_format: String,
}
