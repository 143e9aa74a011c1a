//! HTTP layer exposing token issuance and token-gated file streaming.
//!
//! Two routes, mirroring the issuance/verification split in
//! `filegate-token`:
//!
//! - `GET /api/files/token` — mint a short-lived token for one
//!   `(bucket, path)` pair. Guarded by an optional admin bearer token that
//!   stands in for an external authorization layer.
//! - `GET /api/files` — public streaming endpoint. Verifies the presented
//!   token, binds it to the requested resource, then streams the object
//!   from the configured [`StorageBackend`](filegate_storage::StorageBackend).
//!
//! Every token failure is answered with the same generic 401 body; the
//! distinction between malformed, forged, and expired tokens exists only in
//! debug logs.

pub mod config;
pub mod content_type;
pub mod routes;
pub mod state;

pub use self::{
    config::ServerConfig,
    content_type::guess_content_type,
    routes::router,
    state::AppState,
};
