//! End-to-end tests over the router with the in-memory backend and a
//! pinned clock.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use bytes::Bytes;
use http_body_util::BodyExt;
use tower::ServiceExt;

use filegate_server::{router, AppState, ServerConfig};
use filegate_storage::{MemoryBackend, ObjectReader, StorageBackend, StorageError};
use filegate_token::FixedClock;

const NOW: u64 = 1_700_000_000;
const IMG_PATH: &str = "products/m1/sku1/SMALL/img.jpg";

async fn seeded_backend() -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new());
    backend.create_bucket("shopizer").await.unwrap();
    backend
        .put(
            "shopizer",
            IMG_PATH,
            Bytes::from_static(b"jpeg bytes"),
            Some("image/jpeg"),
        )
        .await
        .unwrap();
    backend
}

struct Fixture {
    state: Arc<AppState<FixedClock>>,
    clock: FixedClock,
}

impl Fixture {
    async fn new() -> Self {
        Self::with_config(ServerConfig::default()).await
    }

    async fn with_config(config: ServerConfig) -> Self {
        let clock = FixedClock::at(NOW);
        let backend = seeded_backend().await;
        let state = AppState::with_clock(&config, backend, clock.clone());
        Self { state, clock }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = router(self.state.clone())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    async fn issue(&self, bucket: &str, path: &str) -> String {
        let (status, _, body) = self
            .get(&format!("/api/files/token?bucket={bucket}&path={path}"))
            .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        json["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn issuance_returns_token_and_expiry() {
    let fixture = Fixture::new().await;
    let (status, content_type, body) = fixture
        .get(&format!("/api/files/token?bucket=shopizer&path={IMG_PATH}"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["token"].as_str().unwrap().contains('.'));
    assert_eq!(json["expiresAt"].as_u64().unwrap(), NOW + 300);
}

#[tokio::test]
async fn issuance_honors_explicit_ttl() {
    let fixture = Fixture::new().await;
    let (_, _, body) = fixture
        .get(&format!(
            "/api/files/token?bucket=shopizer&path={IMG_PATH}&ttlSeconds=60"
        ))
        .await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["expiresAt"].as_u64().unwrap(), NOW + 60);
}

#[tokio::test]
async fn issuance_rejects_empty_scope_fields() {
    let fixture = Fixture::new().await;
    let (status, _, _) = fixture
        .get("/api/files/token?bucket=&path=img.jpg")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn issuance_requires_configured_bearer_token() {
    let config = ServerConfig {
        admin_token: Some("admin-secret".to_string()),
        ..ServerConfig::default()
    };
    let fixture = Fixture::with_config(config).await;

    let (status, _, _) = fixture
        .get(&format!("/api/files/token?bucket=shopizer&path={IMG_PATH}"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let response = router(fixture.state.clone())
        .oneshot(
            Request::get(format!("/api/files/token?bucket=shopizer&path={IMG_PATH}"))
                .header(header::AUTHORIZATION, "Bearer admin-secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn streaming_round_trip_succeeds() {
    let fixture = Fixture::new().await;
    let token = fixture.issue("shopizer", IMG_PATH).await;

    let (status, content_type, body) = fixture
        .get(&format!(
            "/api/files?bucket=shopizer&path={IMG_PATH}&token={token}"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(body, "jpeg bytes");
}

#[tokio::test]
async fn garbage_token_is_unauthorized_with_generic_body() {
    let fixture = Fixture::new().await;
    let (status, _, body) = fixture
        .get(&format!(
            "/api/files?bucket=shopizer&path={IMG_PATH}&token=not-a-token"
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Invalid or expired token");
}

#[tokio::test]
async fn tampered_token_gets_the_same_body_as_expired() {
    let fixture = Fixture::new().await;
    let token = fixture.issue("shopizer", IMG_PATH).await;

    // Forged signature
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });
    let (status, _, forged_body) = fixture
        .get(&format!(
            "/api/files?bucket=shopizer&path={IMG_PATH}&token={tampered}"
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Expired
    fixture.clock.advance(301);
    let (status, _, expired_body) = fixture
        .get(&format!(
            "/api/files?bucket=shopizer&path={IMG_PATH}&token={token}"
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged_body, expired_body);
}

#[tokio::test]
async fn token_for_another_resource_is_forbidden() {
    let fixture = Fixture::new().await;
    let token = fixture.issue("shopizer", IMG_PATH).await;

    // Same bucket, different path: signature verifies, scope does not
    let (status, _, _) = fixture
        .get(&format!(
            "/api/files?bucket=shopizer&path=products/other.jpg&token={token}"
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn valid_token_for_missing_object_is_not_found() {
    let fixture = Fixture::new().await;
    let token = fixture.issue("shopizer", "products/ghost.jpg").await;
    let (status, _, _) = fixture
        .get(&format!(
            "/api/files?bucket=shopizer&path=products/ghost.jpg&token={token}"
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn valid_token_for_missing_bucket_is_not_found() {
    let fixture = Fixture::new().await;
    let token = fixture.issue("ghost-bucket", "img.jpg").await;
    let (status, _, _) = fixture
        .get(&format!(
            "/api/files?bucket=ghost-bucket&path=img.jpg&token={token}"
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Backend whose reads always fail, for the 500 path
struct BrokenBackend;

#[async_trait]
impl StorageBackend for BrokenBackend {
    async fn open(&self, bucket: &str, path: &str) -> Result<Option<ObjectReader>, StorageError> {
        Err(StorageError::Io {
            bucket: bucket.to_string(),
            path: path.to_string(),
            operation: "open",
            source: std::io::Error::other("disk on fire"),
        })
    }

    async fn get(&self, _: &str, _: &str) -> Result<Option<Vec<u8>>, StorageError> {
        unimplemented!()
    }

    async fn list(&self, _: &str, _: &str) -> Result<Vec<String>, StorageError> {
        unimplemented!()
    }

    async fn put(
        &self,
        _: &str,
        _: &str,
        _: Bytes,
        _: Option<&str>,
    ) -> Result<(), StorageError> {
        unimplemented!()
    }

    async fn delete(&self, _: &str, _: &str) -> Result<bool, StorageError> {
        unimplemented!()
    }

    async fn bucket_exists(&self, _: &str) -> Result<bool, StorageError> {
        unimplemented!()
    }

    async fn create_bucket(&self, _: &str) -> Result<(), StorageError> {
        unimplemented!()
    }
}

#[tokio::test]
async fn backend_failure_is_internal_error_without_leakage() {
    let clock = FixedClock::at(NOW);
    let state = AppState::with_clock(
        &ServerConfig::default(),
        Arc::new(BrokenBackend),
        clock.clone(),
    );
    let app = router(state.clone());

    let issued = state
        .issuer
        .issue(&filegate_core::ResourceScope::new("shopizer", IMG_PATH).unwrap(), 300);
    let response = app
        .oneshot(
            Request::get(format!(
                "/api/files?bucket=shopizer&path={IMG_PATH}&token={}",
                issued.token
            ))
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Error streaming file");
}
