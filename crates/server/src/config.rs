//! Environment-driven server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use filegate_core::{
    Error, Result, DEFAULT_LISTEN_ADDR, DEFAULT_TOKEN_TTL_SECS, FILEGATE_ADMIN_TOKEN_VAR,
    FILEGATE_DEFAULT_TTL_VAR, FILEGATE_LISTEN_VAR, FILEGATE_SECRET_VAR, FILEGATE_STORAGE_ROOT_VAR,
    INSECURE_DEFAULT_SECRET,
};

/// Process-level configuration, loaded once at startup
#[derive(Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub listen: SocketAddr,
    /// Shared token secret; falls back to the documented insecure default
    pub secret: String,
    /// TTL applied when an issuance request carries none
    pub default_ttl_secs: u64,
    /// Root directory for the filesystem backend; `None` selects the
    /// in-memory backend
    pub storage_root: Option<PathBuf>,
    /// Bearer token required on the issuance endpoint; `None` disables the
    /// stand-in admission check
    pub admin_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR
                .parse()
                // The constant is a valid socket address
                .expect("default listen address parses"),
            secret: INSECURE_DEFAULT_SECRET.to_string(),
            default_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            storage_root: None,
            admin_token: None,
        }
    }
}

// Secret material stays out of Debug output
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("listen", &self.listen)
            .field("secret", &"<redacted>")
            .field("default_ttl_secs", &self.default_ttl_secs)
            .field("storage_root", &self.storage_root)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from `FILEGATE_*` environment variables,
    /// falling back to defaults for anything unset
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(listen) = std::env::var(FILEGATE_LISTEN_VAR) {
            config.listen = listen.parse().map_err(|_| Error::Environment {
                variable: FILEGATE_LISTEN_VAR.to_string(),
                message: format!("'{listen}' is not a valid socket address"),
            })?;
        }
        if let Ok(secret) = std::env::var(FILEGATE_SECRET_VAR) {
            if secret.is_empty() {
                return Err(Error::Environment {
                    variable: FILEGATE_SECRET_VAR.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            config.secret = secret;
        }
        if let Ok(ttl) = std::env::var(FILEGATE_DEFAULT_TTL_VAR) {
            config.default_ttl_secs = ttl.parse().map_err(|_| Error::Environment {
                variable: FILEGATE_DEFAULT_TTL_VAR.to_string(),
                message: format!("'{ttl}' is not a valid number of seconds"),
            })?;
        }
        if let Ok(root) = std::env::var(FILEGATE_STORAGE_ROOT_VAR) {
            config.storage_root = Some(PathBuf::from(root));
        }
        if let Ok(token) = std::env::var(FILEGATE_ADMIN_TOKEN_VAR) {
            if !token.is_empty() {
                config.admin_token = Some(token);
            }
        }

        Ok(config)
    }

    /// Whether the shipped development secret is still in effect
    #[must_use]
    pub fn uses_insecure_default_secret(&self) -> bool {
        self.secret == INSECURE_DEFAULT_SECRET
    }
}
