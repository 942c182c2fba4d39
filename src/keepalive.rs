//! Keep-alive pinger.
//!
//! Free hosting tiers put idle services to sleep. When `[keepalive]` is
//! configured, the server spawns a task that sends `GET <url>` every
//! `interval_secs` seconds. Failures are logged and never stop the task.

use anyhow::{bail, Result};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::KeepaliveConfig;

/// Spawn the ping loop on the current tokio runtime.
pub fn spawn(config: KeepaliveConfig) -> JoinHandle<()> {
    tokio::spawn(async move { run(config).await })
}

async fn run(config: KeepaliveConfig) {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Keep-alive disabled: failed to build HTTP client");
            return;
        }
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(config.interval_secs));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick fires immediately; skip it so the server is up first.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match ping(&client, &config.url).await {
            Ok(status) => debug!(url = %config.url, status, "Keep-alive ping"),
            Err(e) => warn!(url = %config.url, "Keep-alive ping failed: {:#}", e),
        }
    }
}

/// Send one ping and return the HTTP status code.
pub async fn ping(client: &reqwest::Client, url: &str) -> Result<u16> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        bail!("unexpected status {}", status);
    }
    Ok(status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ping_unreachable_host_errors() {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        // Port 9 (discard) on localhost is almost never listening.
        assert!(ping(&client, "http://127.0.0.1:9/health").await.is_err());
    }
}
