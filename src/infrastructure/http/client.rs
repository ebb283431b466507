//! reqwest-backed HTTP client.

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, warn};

use crate::domain::ports::{FetchRequest, FetchResponse, HttpError, HttpPort};

const USER_AGENT: &str = concat!("randcontent/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by every content request.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new client.
    ///
    /// # Errors
    /// Returns error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HttpError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn map_error(e: &reqwest::Error, request: &FetchRequest) -> HttpError {
        warn!(url = %request.url, error = %e, "HTTP request failed");
        if e.is_timeout() {
            HttpError::Timeout {
                timeout: request.timeout,
            }
        } else if e.is_connect() {
            HttpError::Connect(e.to_string())
        } else {
            HttpError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl HttpPort for ReqwestHttpClient {
    async fn get(&self, request: FetchRequest) -> Result<FetchResponse, HttpError> {
        debug!(url = %request.url, timeout_ms = request.timeout.as_millis(), "GET");

        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        if let Some(referer) = &request.referer {
            builder = builder.header(header::REFERER, referer);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, &request))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, &request))?;

        debug!(url = %request.url, status, size = body.len(), "Response received");

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves one request, replies with `body`, and reports the raw request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/list.json", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let reply = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&head).to_lowercase());
        });

        (url, rx)
    }

    #[tokio::test]
    async fn test_get_reads_status_and_body() {
        let (url, _head) = serve_once("200 OK", "[\"a\"]").await;
        let client = ReqwestHttpClient::new().unwrap();

        let response = client.get(FetchRequest::new(url)).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(&response.body[..], b"[\"a\"]");
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let (url, _head) = serve_once("404 Not Found", "").await;
        let client = ReqwestHttpClient::new().unwrap();

        let response = client.get(FetchRequest::new(url)).await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_referer_header_sent_when_set() {
        let (url, head) = serve_once("200 OK", "").await;
        let client = ReqwestHttpClient::new().unwrap();

        client
            .get(FetchRequest::new(url).with_referer(Some("https://www.pixiv.net/")))
            .await
            .unwrap();

        assert!(head.await.unwrap().contains("referer: https://www.pixiv.net/"));
    }

    #[tokio::test]
    async fn test_no_referer_header_by_default() {
        let (url, head) = serve_once("200 OK", "").await;
        let client = ReqwestHttpClient::new().unwrap();

        client.get(FetchRequest::new(url)).await.unwrap();

        assert!(!head.await.unwrap().contains("referer:"));
    }

    #[tokio::test]
    async fn test_timeout_resolves_within_bound() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/slow", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client = ReqwestHttpClient::new().unwrap();
        let started = Instant::now();
        let result = client
            .get(FetchRequest::new(url).with_timeout(Duration::from_millis(200)))
            .await;

        assert!(matches!(result, Err(HttpError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let client = ReqwestHttpClient::new().unwrap();
        let result = client.get(FetchRequest::new(url)).await;

        assert!(matches!(result, Err(HttpError::Connect(_))));
    }
}
