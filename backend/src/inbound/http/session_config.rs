//! Session cookie configuration.
//!
//! Turns the resolved server settings into a signing key and cookie policy,
//! enforcing stricter rules for release builds.

use std::path::{Path, PathBuf};

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

/// Cookie name used for catalogue sessions.
pub const SESSION_COOKIE_NAME: &str = "session";
const SESSION_KEY_MIN_LEN: usize = 64;
const SESSION_TTL_HOURS: i64 = 2;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing keys and insecure cookies.
    Debug,
    /// Release builds require a real key and secure cookies.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vehicle_catalogue::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session toggles as resolved from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionToggles {
    /// File holding at least 64 bytes of key material.
    pub key_file: Option<PathBuf>,
    /// Fall back to a generated key when the file cannot be read.
    pub allow_ephemeral: bool,
    /// Mark cookies `Secure`.
    pub cookie_secure: bool,
}

/// Validated session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Build the cookie session middleware.
    #[must_use]
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(self.same_site)
            .session_lifecycle(
                PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
            )
            .build()
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// No key file was configured and ephemeral keys are not allowed.
    #[error("no session key file configured and ephemeral keys are disabled")]
    MissingKey,
    /// Release builds must not allow ephemeral session keys.
    #[error("ephemeral session keys are not allowed in release builds")]
    EphemeralNotAllowed,
    /// Release builds must mark cookies secure.
    #[error("session cookies must be secure in release builds")]
    InsecureCookie,
}

/// Validate session toggles for the given build mode.
///
/// # Examples
///
/// ```rust
/// use vehicle_catalogue::inbound::http::session_config::{
///     BuildMode, SessionToggles, session_settings,
/// };
///
/// let toggles = SessionToggles {
///     allow_ephemeral: true,
///     ..SessionToggles::default()
/// };
/// let settings = session_settings(&toggles, BuildMode::Debug).unwrap();
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    if !mode.is_debug() {
        if toggles.allow_ephemeral {
            return Err(SessionConfigError::EphemeralNotAllowed);
        }
        if !toggles.cookie_secure {
            return Err(SessionConfigError::InsecureCookie);
        }
    }
    let key = session_key(toggles.key_file.as_deref(), toggles.allow_ephemeral)?;
    let same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    Ok(SessionSettings {
        key,
        cookie_secure: toggles.cookie_secure,
        same_site,
    })
}

fn session_key(path: Option<&Path>, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    let Some(path) = path else {
        if allow_ephemeral {
            warn!("no session key file configured; using temporary key (dev only)");
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::MissingKey);
    };

    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}
