//! Request handlers for token issuance and file streaming.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::{debug, error};

use filegate_core::ResourceScope;
use filegate_storage::StorageError;
use filegate_token::Clock;

use crate::content_type::guess_content_type;
use crate::state::AppState;

/// Response body for every token failure on the public endpoint. One
/// string for malformed, forged, and expired tokens alike, so clients
/// learn nothing about which check fired.
const INVALID_TOKEN_BODY: &str = "Invalid or expired token";

/// Build the HTTP router over the shared state
pub fn router<C: Clock + 'static>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/api/files", get(stream_file::<C>))
        .route("/api/files/token", get(issue_token::<C>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct IssueParams {
    bucket: String,
    path: String,
    #[serde(rename = "ttlSeconds")]
    ttl_seconds: Option<u64>,
}

/// `GET /api/files/token` — mint a token for one resource scope.
///
/// Guarded by the configured admin bearer token; issuance itself cannot
/// fail once the scope validates.
async fn issue_token<C: Clock + 'static>(
    State(state): State<Arc<AppState<C>>>,
    headers: HeaderMap,
    Query(params): Query<IssueParams>,
) -> Response {
    if !state.admit_issuance(&headers) {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    let scope = match ResourceScope::new(params.bucket, params.path) {
        Ok(scope) => scope,
        Err(error) => {
            debug!(%error, "rejected token issuance request");
            return (StatusCode::BAD_REQUEST, "bucket and path must be non-empty").into_response();
        }
    };

    let ttl = params.ttl_seconds.unwrap_or(state.default_ttl_secs);
    Json(state.issuer.issue(&scope, ttl)).into_response()
}

#[derive(Debug, Deserialize)]
struct StreamParams {
    bucket: String,
    path: String,
    token: String,
}

/// `GET /api/files` — stream an object gated by a capability token.
///
/// Order matters: verify the token, then bind it to the requested
/// coordinates, and only then touch the storage backend. A valid token for
/// a different resource is 403, not 401; a missing object behind a valid,
/// matching token is 404.
async fn stream_file<C: Clock + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Query(params): Query<StreamParams>,
) -> Response {
    let claims = match state.verifier.verify(&params.token) {
        Ok(claims) => claims,
        Err(_) => return (StatusCode::UNAUTHORIZED, INVALID_TOKEN_BODY).into_response(),
    };

    if !claims.matches(&params.bucket, &params.path) {
        debug!(
            requested_bucket = %params.bucket,
            requested_path = %params.path,
            token_scope = %claims.scope,
            "token scope does not match requested resource"
        );
        return (StatusCode::FORBIDDEN, "Token does not match resource").into_response();
    }

    match state.backend.open(&params.bucket, &params.path).await {
        Ok(Some(reader)) => {
            let body = Body::from_stream(ReaderStream::new(reader));
            (
                [(header::CONTENT_TYPE, guess_content_type(&params.path))],
                body,
            )
                .into_response()
        }
        Ok(None) | Err(StorageError::BucketNotFound { .. }) => {
            StatusCode::NOT_FOUND.into_response()
        }
        Err(error) => {
            error!(%error, "error streaming file");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error streaming file").into_response()
        }
    }
}
