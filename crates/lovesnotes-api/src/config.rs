//! Server configuration read from the environment.

use std::fmt;
use std::str::FromStr;

use axum::http::HeaderValue;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default PostgreSQL connection string.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/lovesnotes";

/// Default CORS allow-list.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Which note store backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteStoreKind {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for NoteStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!(
                "unknown NOTES_STORE '{}', expected 'postgres' or 'memory'",
                other
            )),
        }
    }
}

impl fmt::Display for NoteStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Server settings.
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: NoteStoreKind,
    pub database_url: String,
    pub allowed_origins: String,
}

// The connection string may carry a password.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("store", &self.store)
            .field("database_url", &"<redacted>")
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store: NoteStoreKind::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `NOTES_STORE`, `DATABASE_URL`, `ALLOWED_ORIGINS`.
    ///
    /// An unparseable `PORT` falls back to the default; an unknown
    /// `NOTES_STORE` is an error.
    pub fn from_env() -> Result<Self, String> {
        let store = match std::env::var("NOTES_STORE") {
            Ok(raw) => raw.parse()?,
            Err(_) => NoteStoreKind::default(),
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            store,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        })
    }

    /// Host and port to bind; the host may be a name, IPv4 or bare IPv6.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    /// Parsed CORS allow-list.
    pub fn cors_origins(&self) -> Vec<HeaderValue> {
        parse_allowed_origins(&self.allowed_origins)
    }
}

/// Parse a comma-separated origin list.
///
/// Blank entries and `*` are skipped, unparseable ones are logged and
/// dropped. If nothing usable is left the list falls back to
/// [`DEFAULT_ALLOWED_ORIGINS`].
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    let origins: Vec<HeaderValue> = raw
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == "*" {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        return vec![HeaderValue::from_static(DEFAULT_ALLOWED_ORIGINS)];
    }
    origins
}
