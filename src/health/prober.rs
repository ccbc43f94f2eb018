// src/health/prober.rs
use super::status::ProbeResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};
use url::Url;

/// Something that can tell whether a URL is serving.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &Url) -> ProbeResult;
}

/// Issues a single GET per probe with a hard deadline. No retries, no caching.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("home-brain/", env!("CARGO_PKG_VERSION")))
            // Probe targets are cluster-internal addresses.
            .no_proxy()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, url: &Url) -> ProbeResult {
        let start = Instant::now();

        let outcome = timeout(self.timeout, self.client.get(url.clone()).send()).await;

        // The response is dropped inside its arm, releasing the connection
        // before anything else happens.
        let result = match outcome {
            Ok(Ok(response)) => {
                let status = response.status();
                drop(response);
                if status == StatusCode::OK {
                    ProbeResult::healthy()
                } else {
                    debug!(%url, %status, "probe got non-200 status");
                    ProbeResult::unhealthy()
                }
            }
            Ok(Err(e)) => ProbeResult::failed(e.to_string()),
            Err(_) => ProbeResult::failed(format!(
                "request timed out after {}ms",
                self.timeout.as_millis()
            )),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        if result.healthy {
            debug!(%url, elapsed_ms, "probe healthy");
        } else {
            warn!(%url, elapsed_ms, error = %result.message, "probe unhealthy");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn prober(timeout_ms: u64) -> HttpProber {
        HttpProber::new(Duration::from_millis(timeout_ms)).unwrap()
    }

    #[tokio::test]
    async fn test_200_is_healthy() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/server-info/ping")
            .with_status(200)
            .with_body(r#"{"res":"pong"}"#)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/api/server-info/ping", server.url())).unwrap();
        let result = prober(5_000).probe(&url).await;

        assert_eq!(result, ProbeResult::healthy());
        assert_eq!(result.message, "healthy");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_is_unhealthy() {
        let mut server = mockito::Server::new_async().await;
        let url = Url::parse(&format!("{}/health", server.url())).unwrap();
        let prober = prober(5_000);

        for status in [204, 404, 500, 503] {
            let mock = server
                .mock("GET", "/health")
                .with_status(status)
                .create_async()
                .await;

            let result = prober.probe(&url).await;
            assert!(!result.healthy, "status {} reported healthy", status);
            assert_eq!(result.message, "unhealthy");

            mock.remove_async().await;
        }
    }

    #[tokio::test]
    async fn test_connection_refused_reports_error_text() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/health", addr)).unwrap();
        let result = prober(5_000).probe(&url).await;

        assert!(!result.healthy);
        assert!(!result.message.is_empty());
        assert_ne!(result.message, "unhealthy");
    }

    #[tokio::test]
    async fn test_stalled_peer_fails_within_deadline() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept connections and never answer.
        let stall = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let url = Url::parse(&format!("http://{}/health", addr)).unwrap();
        let start = Instant::now();
        let result = prober(200).probe(&url).await;

        assert!(!result.healthy);
        assert!(!result.message.is_empty());
        assert!(start.elapsed() < Duration::from_secs(2));

        stall.abort();
    }
}
