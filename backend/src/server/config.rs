//! HTTP server configuration object and environment loading.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use reqwest::Url;
use tracing::warn;

use crate::outbound::platform::{PlatformSettings, ServiceKey};

/// Configuration for creating the HTTP server.
///
/// Constructed explicitly and passed to `create_server`; there is no hidden
/// module-level configuration state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) platform: PlatformSettings,
}

impl ServerConfig {
    /// Construct a server configuration from explicit parts.
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        platform: PlatformSettings,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            platform,
        }
    }

    /// Load configuration from the environment.
    ///
    /// Required: `PLATFORM_REST_URL` and one of `PLATFORM_SERVICE_KEY_FILE` /
    /// `PLATFORM_SERVICE_KEY`. Optional: `BIND_ADDR` (default
    /// `0.0.0.0:8080`), `SESSION_KEY_FILE` (default
    /// `/var/run/secrets/session_key`), `SESSION_COOKIE_SECURE` (default on),
    /// `SESSION_ALLOW_EPHEMERAL` (dev-only key fallback).
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when a required variable is missing or a
    /// value fails to parse.
    pub fn from_env() -> std::io::Result<Self> {
        let key = load_session_key()?;

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".into())
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

        let rest_url: Url = env::var("PLATFORM_REST_URL")
            .map_err(|_| std::io::Error::other("PLATFORM_REST_URL is required"))?
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid PLATFORM_REST_URL: {e}")))?;

        let service_key = load_service_key()?;

        Ok(Self::new(
            key,
            cookie_secure,
            SameSite::Lax,
            bind_addr,
            PlatformSettings::new(rest_url, service_key),
        ))
    }

    /// Return the socket address the server will bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn load_service_key() -> std::io::Result<ServiceKey> {
    if let Ok(path) = env::var("PLATFORM_SERVICE_KEY_FILE") {
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            std::io::Error::other(format!("failed to read service key at {path}: {e}"))
        })?;
        return Ok(ServiceKey::new(raw.trim_end()));
    }
    env::var("PLATFORM_SERVICE_KEY")
        .map(ServiceKey::new)
        .map_err(|_| {
            std::io::Error::other("PLATFORM_SERVICE_KEY or PLATFORM_SERVICE_KEY_FILE is required")
        })
}
