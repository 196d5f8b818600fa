//! Token Gate
//!
//! Thin invocation wrapper around the authorizer library: reads one
//! invocation event (JSON) from stdin, writes the authorization decision
//! (JSON) to stdout. The hosting platform owns transport; this binary only
//! adapts it.

use anyhow::Context;
use gate_service::auth::{JwksClient, TokenVerifier};
use gate_service::models::AuthorizerEvent;
use gate_service::{Authorizer, Config};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gate_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Token Gate");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        jwks_url = %config.jwks_url,
        jwks_cache_ttl_seconds = config.jwks_cache_ttl_seconds,
        clock_skew_seconds = config.clock_skew_seconds,
        "Configuration loaded successfully"
    );

    let jwks_client = Arc::new(JwksClient::with_policy(
        config.jwks_url.clone(),
        Duration::from_secs(config.jwks_cache_ttl_seconds),
        Duration::from_secs(config.jwks_fetch_timeout_seconds),
    ));
    let verifier = Arc::new(TokenVerifier::new(jwks_client, config.clock_skew_seconds));
    let authorizer = Authorizer::new(verifier);

    // One event in, one decision out
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read invocation event from stdin")?;

    let event: AuthorizerEvent =
        serde_json::from_str(&input).context("Invocation event is not valid JSON")?;

    let decision = authorizer.authorize(&event).await;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(&serde_json::to_vec(&decision).context("Failed to serialize decision")?)
        .await
        .context("Failed to write decision to stdout")?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    Ok(())
}
