//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `CATALOGUE_*` environment variables over the
//! configuration file. Accessors resolve defaults and validate formats.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use vehicle_catalogue::domain::ports::ConfiguredLoginService;
use vehicle_catalogue::domain::{DEFAULT_MAX_PAGE_SIZE, UserId, UserIdError};
use vehicle_catalogue::inbound::http::session_config::SessionToggles;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_AUTH_EMAIL: &str = "admin@example.com";
const DEFAULT_AUTH_PASSWORD: &str = "password";
const DEFAULT_AUTH_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Failures resolving settings into typed values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("max page size must be at least 1")]
    ZeroMaxPageSize,
    #[error("invalid login user id: {0}")]
    UserId(#[from] UserIdError),
}

/// Configuration values for the catalogue server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory demo catalogue is served when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Largest accepted `pageSize`.
    pub max_page_size: Option<u64>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Generate a throwaway session key when none can be read.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Email of the single login account.
    pub auth_email: Option<String>,
    /// Password of the single login account.
    pub auth_password: Option<String>,
    /// User id recorded in the session after login.
    pub auth_user_id: Option<String>,
}

impl ServerSettings {
    /// Resolve the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn max_page_size(&self) -> Result<u64, SettingsError> {
        match self.max_page_size {
            Some(0) => Err(SettingsError::ZeroMaxPageSize),
            Some(value) => Ok(value),
            None => Ok(DEFAULT_MAX_PAGE_SIZE),
        }
    }

    pub fn session_toggles(&self) -> SessionToggles {
        SessionToggles {
            key_file: self.session_key_file.clone(),
            allow_ephemeral: self.session_allow_ephemeral,
            cookie_secure: self.cookie_secure,
        }
    }

    /// Build the login service for the configured account.
    pub fn login_service(&self) -> Result<ConfiguredLoginService, SettingsError> {
        if self.auth_email.is_none() || self.auth_password.is_none() {
            warn!("login account not fully configured; using demo credentials");
        }
        let user_id = UserId::new(self.auth_user_id.as_deref().unwrap_or(DEFAULT_AUTH_USER_ID))?;
        Ok(ConfiguredLoginService::new(
            self.auth_email.as_deref().unwrap_or(DEFAULT_AUTH_EMAIL),
            self.auth_password.as_deref().unwrap_or(DEFAULT_AUTH_PASSWORD),
            user_id,
        ))
    }
}
