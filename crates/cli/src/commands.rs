//! Subcommand definitions and execution.

use anyhow::Context;
use clap::Subcommand;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

use filegate_core::{ResourceScope, SecretKey};
use filegate_server::{router, AppState, ServerConfig};
use filegate_token::{TokenIssuer, TokenVerifier};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve {
        /// Address to listen on (overrides FILEGATE_LISTEN)
        #[arg(short, long)]
        listen: Option<SocketAddr>,

        /// Root directory for the filesystem backend
        /// (overrides FILEGATE_STORAGE_ROOT; omit for the in-memory store)
        #[arg(long)]
        storage_root: Option<PathBuf>,

        /// Default token TTL in seconds (overrides FILEGATE_DEFAULT_TTL)
        #[arg(long)]
        default_ttl: Option<u64>,
    },

    /// Mint a token for one resource scope and print it as JSON
    Issue {
        /// Storage bucket the token is bound to
        #[arg(long)]
        bucket: String,

        /// Object path the token is bound to
        #[arg(long)]
        path: String,

        /// Token lifetime in seconds
        #[arg(long, default_value_t = filegate_core::DEFAULT_TOKEN_TTL_SECS)]
        ttl: u64,
    },

    /// Check a token against the configured secret and print its claims
    Verify {
        /// The token string to verify
        token: String,
    },
}

impl Commands {
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Serve {
                listen,
                storage_root,
                default_ttl,
            } => serve(listen, storage_root, default_ttl).await,
            Commands::Issue { bucket, path, ttl } => issue(bucket, path, ttl),
            Commands::Verify { token } => verify(token),
        }
    }
}

async fn serve(
    listen: Option<SocketAddr>,
    storage_root: Option<PathBuf>,
    default_ttl: Option<u64>,
) -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(listen) = listen {
        config.listen = listen;
    }
    if let Some(root) = storage_root {
        config.storage_root = Some(root);
    }
    if let Some(ttl) = default_ttl {
        config.default_ttl_secs = ttl;
    }

    let state = AppState::from_config(&config);
    let app = router(state);

    info!("starting filegate on {}", config.listen);
    match &config.storage_root {
        Some(root) => info!("serving files from {}", root.display()),
        None => info!("using in-memory storage backend"),
    }

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn issue(bucket: String, path: String, ttl: u64) -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    let scope = ResourceScope::new(bucket, path)?;
    let issuer = TokenIssuer::new(SecretKey::from_string(config.secret));
    let issued = issuer.issue(&scope, ttl);
    println!("{}", serde_json::to_string_pretty(&issued)?);
    Ok(())
}

fn verify(token: String) -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    let verifier = TokenVerifier::new(SecretKey::from_string(config.secret));
    match verifier.verify(&token) {
        Ok(claims) => {
            println!(
                "valid: bucket={} path={} expiry={}",
                claims.scope.bucket, claims.scope.path, claims.expiry
            );
            Ok(())
        }
        Err(rejected) => anyhow::bail!("{rejected}"),
    }
}
