use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::{DEFAULT_API_BASE_URL, SendGridOptions};
use crate::error::SendGridError;
use crate::transport::{EmailTransport, TransportResponse};
use crate::types::SendGridMail;

/// Request timeout of the HTTP client built by [`SendGridClient::new`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`EmailTransport`] backed by the SendGrid v3 REST API.
pub struct SendGridClient {
    api_key: String,
    api_base_url: String,
    client: Client,
    /// Timeout configured on `client`, when known.
    request_timeout: Option<Duration>,
}

impl std::fmt::Debug for SendGridClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridClient")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl SendGridClient {
    /// Create a client for the public SendGrid API with a default
    /// `reqwest::Client`.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SendGridError> {
        Self::with_base_url(api_key, DEFAULT_API_BASE_URL)
    }

    /// Create a client for the API key and base URL in `options`.
    pub fn from_options(options: &SendGridOptions) -> Result<Self, SendGridError> {
        Self::with_base_url(options.api_key.clone(), options.api_base_url.clone())
    }

    /// Create a client against a custom base URL (regional endpoint, mock
    /// server).
    pub fn with_base_url(
        api_key: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Result<Self, SendGridError> {
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SendGridError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(api_key, api_base_url, client)
            .with_request_timeout(DEFAULT_REQUEST_TIMEOUT))
    }

    /// Create a client with a custom HTTP client.
    ///
    /// Useful for sharing a connection pool across providers. Timeouts of a
    /// custom client surface as [`SendGridError::Http`] unless the duration is
    /// declared with [`with_request_timeout`](Self::with_request_timeout).
    pub fn with_client(
        api_key: impl Into<String>,
        api_base_url: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: api_base_url.into(),
            client,
            request_timeout: None,
        }
    }

    /// Declare the timeout configured on the underlying HTTP client so that
    /// timeouts are reported as [`SendGridError::Timeout`] with that duration.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn mail_send_url(&self) -> String {
        format!("{}/v3/mail/send", self.api_base_url.trim_end_matches('/'))
    }

    fn map_http_error(&self, error: reqwest::Error) -> SendGridError {
        match self.request_timeout {
            Some(timeout) if error.is_timeout() => SendGridError::Timeout(timeout),
            _ => SendGridError::Http(error),
        }
    }
}

#[async_trait]
impl EmailTransport for SendGridClient {
    async fn send_email(&self, mail: &SendGridMail) -> Result<TransportResponse, SendGridError> {
        let url = self.mail_send_url();

        debug!(
            personalizations = mail.personalizations.len(),
            "posting mail to SendGrid"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(mail)
            .send()
            .await
            .map_err(|e| self.map_http_error(e))?;

        let status = response.status();

        // An accepted mail is queued; its body carries nothing we report.
        if status == StatusCode::ACCEPTED {
            debug!(%status, "SendGrid accepted mail");
            return Ok(TransportResponse::new(status, ""));
        }

        warn!(%status, "SendGrid rejected mail");
        let body = response.text().await.map_err(|e| self.map_http_error(e))?;

        Ok(TransportResponse { status, body })
    }

    async fn health_check(&self) -> Result<(), SendGridError> {
        // SendGrid has no side-effect-free endpoint keyed on the mail scope.
        if self.api_key.is_empty() {
            return Err(SendGridError::Configuration(
                "SendGrid API key is empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    /// A minimal mock HTTP server built on tokio that returns canned responses
    /// and hands back the raw request it received.
    pub(crate) struct MockSendGridServer {
        listener: tokio::net::TcpListener,
        pub(crate) base_url: String,
    }

    impl MockSendGridServer {
        pub(crate) async fn start() -> Self {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("failed to bind mock server");
            let port = listener.local_addr().unwrap().port();
            let base_url = format!("http://127.0.0.1:{port}");
            Self { listener, base_url }
        }

        pub(crate) async fn respond_once(self, status_code: u16, body: &str) -> String {
            self.respond_with_length(status_code, body.len(), body).await
        }

        /// Reply with a `Content-Length` that may not match the bytes written,
        /// then close the connection.
        pub(crate) async fn respond_with_length(
            self,
            status_code: u16,
            content_length: usize,
            body: &str,
        ) -> String {
            let (mut stream, _) = self.listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;

            let response = format!(
                "HTTP/1.1 {status_code} Mock\r\n\
                 Content-Type: text/plain\r\n\
                 Content-Length: {content_length}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}"
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        }
    }

    /// Read one HTTP/1.1 request: headers plus a `Content-Length` body.
    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&data);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(data).unwrap()
    }

    /// Split a raw request into its head and body.
    pub(crate) fn split_request(request: &str) -> (&str, &str) {
        request.split_once("\r\n\r\n").unwrap()
    }

    fn sample_mail() -> SendGridMail {
        SendGridMail::to_multiple_recipients(
            "sender@example.com",
            ["user@example.com"],
            Some("Test Email"),
            Some("Hello"),
            None,
        )
    }

    #[test]
    fn mail_send_url_joins_base() {
        let client = SendGridClient::with_base_url("SG.key", "http://localhost:9999/").unwrap();
        assert_eq!(client.mail_send_url(), "http://localhost:9999/v3/mail/send");

        let client = SendGridClient::new("SG.key").unwrap();
        assert_eq!(
            client.mail_send_url(),
            "https://api.sendgrid.com/v3/mail/send"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = SendGridClient::new("SG.test-placeholder-value").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-placeholder-value"));
    }

    #[tokio::test]
    async fn send_email_posts_json_with_bearer_auth() {
        let server = MockSendGridServer::start().await;
        let client = SendGridClient::with_base_url("SG.secret", &server.base_url).unwrap();

        let server_handle = tokio::spawn(async move { server.respond_once(202, "").await });

        let response = client.send_email(&sample_mail()).await.unwrap();
        let request = server_handle.await.unwrap();

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert!(response.is_accepted());
        assert_eq!(response.body, "");

        let (head, body) = split_request(&request);
        assert!(head.starts_with("POST /v3/mail/send HTTP/1.1"));
        assert!(
            head.lines()
                .any(|l| l.eq_ignore_ascii_case("authorization: Bearer SG.secret"))
        );
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json, serde_json::to_value(sample_mail()).unwrap());
    }

    #[tokio::test]
    async fn send_email_returns_rejection_body_verbatim() {
        let server = MockSendGridServer::start().await;
        let client = SendGridClient::with_base_url("SG.bad", &server.base_url).unwrap();

        let rejection = r#"{"errors":[{"message":"The provided authorization grant is invalid"}]}"#;
        let server_handle =
            tokio::spawn(async move { server.respond_once(401, rejection).await });

        let response = client.send_email(&sample_mail()).await.unwrap();
        server_handle.await.unwrap();

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(!response.is_accepted());
        assert_eq!(response.body, rejection);
    }

    #[tokio::test]
    async fn accepted_mail_does_not_depend_on_response_body() {
        let server = MockSendGridServer::start().await;
        let client = SendGridClient::with_base_url("SG.key", &server.base_url).unwrap();

        let server_handle =
            tokio::spawn(async move { server.respond_with_length(202, 100, "abc").await });

        let response = client.send_email(&sample_mail()).await.unwrap();
        server_handle.await.unwrap();

        assert!(response.is_accepted());
        assert_eq!(response.body, "");
    }

    #[tokio::test]
    async fn truncated_rejection_body_is_http_error() {
        let server = MockSendGridServer::start().await;
        let client = SendGridClient::with_base_url("SG.key", &server.base_url).unwrap();

        let server_handle =
            tokio::spawn(async move { server.respond_with_length(400, 100, "Err").await });

        let err = client.send_email(&sample_mail()).await.unwrap_err();
        server_handle.await.unwrap();

        assert!(matches!(err, SendGridError::Http(_)));
    }

    #[tokio::test]
    async fn timeout_reports_configured_duration() {
        // Bound but never answered: the request sits in the accept backlog.
        let server = MockSendGridServer::start().await;
        let timeout = Duration::from_millis(200);
        let http = Client::builder().timeout(timeout).build().unwrap();
        let client = SendGridClient::with_client("SG.key", &server.base_url, http)
            .with_request_timeout(timeout);

        let err = client.send_email(&sample_mail()).await.unwrap_err();

        assert!(matches!(err, SendGridError::Timeout(d) if d == timeout));
        drop(server);
    }

    #[tokio::test]
    async fn custom_client_timeout_without_declared_duration_is_http_error() {
        let server = MockSendGridServer::start().await;
        let http = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let client = SendGridClient::with_client("SG.key", &server.base_url, http);

        let err = client.send_email(&sample_mail()).await.unwrap_err();

        assert!(matches!(err, SendGridError::Http(ref e) if e.is_timeout()));
        drop(server);
    }

    #[tokio::test]
    async fn send_email_connection_refused_is_http_error() {
        let client = SendGridClient::with_base_url("SG.key", "http://127.0.0.1:1").unwrap();
        let err = client.send_email(&sample_mail()).await.unwrap_err();
        assert!(matches!(err, SendGridError::Http(_)));
    }

    #[tokio::test]
    async fn health_check_requires_api_key() {
        let client = SendGridClient::new("").unwrap();
        let err = client.health_check().await.unwrap_err();
        assert!(matches!(err, SendGridError::Configuration(_)));

        let client = SendGridClient::new("SG.key").unwrap();
        client.health_check().await.unwrap();
    }
}
