//! Shared application state handed to every request handler.

use axum::http::{header, HeaderMap};
use std::sync::Arc;
use tracing::warn;

use filegate_core::SecretKey;
use filegate_storage::{FilesystemBackend, MemoryBackend, StorageBackend};
use filegate_token::{constant_time_eq, Clock, SystemClock, TokenIssuer, TokenVerifier};

use crate::config::ServerConfig;

/// Immutable per-process state: the token pair around the shared secret,
/// the storage backend, and the issuance policy knobs.
pub struct AppState<C: Clock = SystemClock> {
    /// Mints tokens for the issuance endpoint
    pub issuer: TokenIssuer<C>,
    /// Checks tokens on the streaming endpoint
    pub verifier: TokenVerifier<C>,
    /// Object store the streaming endpoint reads from
    pub backend: Arc<dyn StorageBackend>,
    /// TTL applied when the issuance request carries none
    pub default_ttl_secs: u64,
    /// Stand-in admission token for the issuance endpoint
    admin_token: Option<String>,
}

impl AppState<SystemClock> {
    /// Build state from configuration, selecting the filesystem backend
    /// when a storage root is configured and the in-memory backend
    /// otherwise.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Arc<Self> {
        let backend: Arc<dyn StorageBackend> = match &config.storage_root {
            Some(root) => Arc::new(FilesystemBackend::new(root.clone())),
            None => Arc::new(MemoryBackend::new()),
        };
        Self::with_clock(config, backend, SystemClock)
    }
}

impl<C: Clock + Clone> AppState<C> {
    /// Build state around an explicit backend and clock (tests pin both)
    #[must_use]
    pub fn with_clock(
        config: &ServerConfig,
        backend: Arc<dyn StorageBackend>,
        clock: C,
    ) -> Arc<Self> {
        if config.uses_insecure_default_secret() {
            warn!(
                "token secret is the insecure development default; set {} in production",
                filegate_core::FILEGATE_SECRET_VAR
            );
        }
        let key = SecretKey::from_string(config.secret.clone());
        Arc::new(Self {
            issuer: TokenIssuer::with_clock(key.clone(), clock.clone()),
            verifier: TokenVerifier::with_clock(key, clock),
            backend,
            default_ttl_secs: config.default_ttl_secs,
            admin_token: config.admin_token.clone(),
        })
    }
}

impl<C: Clock> AppState<C> {
    /// Admission check for the issuance endpoint.
    ///
    /// Stands in for the external authorization collaborator: when an admin
    /// token is configured, the request must carry it as a bearer
    /// credential; when none is configured the endpoint is open.
    #[must_use]
    pub fn admit_issuance(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.admin_token else {
            return true;
        };
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|presented| constant_time_eq(presented, expected))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn state_with_admin(token: Option<&str>) -> Arc<AppState> {
        let config = ServerConfig {
            admin_token: token.map(str::to_string),
            ..ServerConfig::default()
        };
        AppState::with_clock(&config, Arc::new(MemoryBackend::new()), SystemClock)
    }

    fn bearer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {value}")).unwrap(),
        );
        headers
    }

    #[test]
    fn open_when_no_admin_token_configured() {
        let state = state_with_admin(None);
        assert!(state.admit_issuance(&HeaderMap::new()));
    }

    #[test]
    fn requires_matching_bearer_when_configured() {
        let state = state_with_admin(Some("admin-secret"));
        assert!(state.admit_issuance(&bearer("admin-secret")));
        assert!(!state.admit_issuance(&bearer("wrong")));
        assert!(!state.admit_issuance(&HeaderMap::new()));
    }
}
