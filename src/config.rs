use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

/// Two weeks
const DEFAULT_SESSION_TTL_SECONDS: u64 = 1_209_600;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Directory uploaded images are written to and served from
    pub media_root: String,
    pub session_ttl_seconds: u64,
    pub session_cookie_secure: bool,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            media_root: env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| "media".to_string()),
            session_ttl_seconds: match env::var("SESSION_TTL_SECONDS") {
                Ok(value) => value
                    .parse()
                    .context("SESSION_TTL_SECONDS must be a number of seconds")?,
                Err(_) => DEFAULT_SESSION_TTL_SECONDS,
            },
            session_cookie_secure: match env::var("SESSION_COOKIE_SECURE") {
                Ok(value) => parse_flag(&value)
                    .context("SESSION_COOKIE_SECURE must be true or false")?,
                Err(_) => false,
            },
            max_upload_bytes: match env::var("MAX_UPLOAD_BYTES") {
                Ok(value) => value
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
